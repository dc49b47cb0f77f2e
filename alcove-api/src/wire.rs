//! Wire-format normalization
//!
//! The single place where historical response-shape drift is absorbed:
//! camelCase/snake_case field aliases, post lists that arrive either
//! wrapped in `{posts}` or as a bare array, account records whose school
//! field is sometimes a name and sometimes a bare ID. Everything past this
//! module is one canonical record type per entity.

use alcove_core::core_feed::{Comment, Post};
use alcove_core::core_invite::{Invitation, InvitationStatus};
use alcove_core::core_session::{AccountRole, User};
use alcove_core::core_space::{
    InvitationId, PostId, Space, SpaceId, SpaceMember, SpaceRole,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body of every message-only success and of all non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpacesEnvelope {
    pub spaces: Vec<SpaceRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpaceDetailsEnvelope {
    pub space: SpaceRecord,
    #[serde(alias = "userRole")]
    pub user_role: SpaceRole,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpaceRecord {
    #[serde(alias = "spaceId")]
    pub space_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "avatarUrl")]
    pub avatar_url: Option<String>,
    #[serde(alias = "creatorEmail")]
    pub creator_email: String,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "userRole")]
    pub user_role: Option<SpaceRole>,
    #[serde(alias = "memberCount")]
    pub member_count: u32,
    #[serde(alias = "postCount")]
    pub post_count: u32,
}

impl SpaceRecord {
    pub(crate) fn into_space_with_role(self, viewer_role: SpaceRole) -> Space {
        Space {
            id: SpaceId(self.space_id),
            name: self.name,
            description: self.description.unwrap_or_default(),
            avatar_url: self.avatar_url.unwrap_or_default(),
            creator_email: self.creator_email,
            created_at: self.created_at,
            member_count: self.member_count,
            post_count: self.post_count,
            viewer_role,
        }
    }

    /// A record missing its role degrades to `member`, the least
    /// privileged view
    pub(crate) fn into_space(self) -> Space {
        let role = self.user_role.unwrap_or(SpaceRole::Member);
        self.into_space_with_role(role)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MembersEnvelope {
    pub members: Vec<MemberRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MemberRecord {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub role: SpaceRole,
    #[serde(alias = "joinedAt")]
    pub joined_at: DateTime<Utc>,
}

impl MemberRecord {
    pub(crate) fn into_member(self) -> SpaceMember {
        SpaceMember {
            email: self.email,
            name: self.name,
            avatar: self.avatar,
            role: self.role,
            joined_at: self.joined_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvitationsEnvelope {
    pub invitations: Vec<InvitationRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvitationRecord {
    #[serde(alias = "invitationId")]
    pub invitation_id: u64,
    #[serde(alias = "spaceId")]
    pub space_id: u64,
    #[serde(alias = "spaceName")]
    pub space_name: String,
    #[serde(alias = "inviterEmail")]
    pub inviter_email: String,
    #[serde(default, alias = "inviterName")]
    pub inviter_name: String,
    #[serde(alias = "inviteeEmail")]
    pub invitee_email: String,
    #[serde(default = "pending")]
    pub status: InvitationStatus,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

fn pending() -> InvitationStatus {
    InvitationStatus::Pending
}

impl InvitationRecord {
    pub(crate) fn into_invitation(self) -> Invitation {
        Invitation {
            id: InvitationId(self.invitation_id),
            space_id: SpaceId(self.space_id),
            space_name: self.space_name,
            inviter_email: self.inviter_email,
            inviter_name: self.inviter_name,
            invitee_email: self.invitee_email,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Post lists have arrived both wrapped and bare over the backend's history
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PostsBody {
    Wrapped { posts: Vec<PostRecord> },
    Bare(Vec<PostRecord>),
}

impl PostsBody {
    pub(crate) fn into_posts(self) -> Vec<Post> {
        let records = match self {
            PostsBody::Wrapped { posts } => posts,
            PostsBody::Bare(posts) => posts,
        };
        records.into_iter().map(PostRecord::into_post).collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostRecord {
    #[serde(alias = "postId")]
    pub post_id: u64,
    #[serde(alias = "authorEmail")]
    pub author_email: String,
    #[serde(default, alias = "authorName")]
    pub author_name: Option<String>,
    pub content: String,
    #[serde(default, alias = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "commentCount")]
    pub comment_count: u32,
}

impl PostRecord {
    pub(crate) fn into_post(self) -> Post {
        // Older post records carried no display name
        let author_name = self.author_name.unwrap_or_else(|| self.author_email.clone());
        Post {
            id: PostId(self.post_id),
            author_email: self.author_email,
            author_name,
            content: self.content,
            file_url: self.file_url,
            created_at: self.created_at,
            comment_count: self.comment_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsEnvelope {
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentRecord {
    pub content: String,
    #[serde(alias = "authorName")]
    pub author_name: String,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl CommentRecord {
    pub(crate) fn into_comment(self) -> Comment {
        Comment {
            content: self.content,
            author_name: self.author_name,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvitableUsersEnvelope {
    pub users: Vec<alcove_core::core_invite::InvitableUser>,
}

/// Account lists arrive under `data` on the user-administration surface
#[derive(Debug, Deserialize)]
pub(crate) struct AccountsEnvelope {
    #[serde(default)]
    pub data: Vec<AccountRecord>,
}

/// Account records use the backend's PascalCase convention. The school
/// field drifted across backend versions: prefer `SchoolName`, fall back
/// to `SchoolID`, else empty.
#[derive(Debug, Deserialize)]
pub(crate) struct AccountRecord {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "SchoolName", default)]
    pub school_name: Option<String>,
    #[serde(rename = "SchoolID", default)]
    pub school_id: Option<String>,
    #[serde(rename = "Role")]
    pub role: AccountRole,
    #[serde(rename = "ProfilePicLink", default)]
    pub profile_pic: Option<String>,
}

impl AccountRecord {
    pub(crate) fn into_user(self) -> User {
        let school = self
            .school_name
            .or(self.school_id)
            .unwrap_or_default();
        User {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            school,
            role: self.role,
            profile_pic: self.profile_pic,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginEnvelope {
    pub token: String,
    pub user: AccountRecord,
    #[serde(default, alias = "requires2FA")]
    pub requires_2fa: bool,
}
