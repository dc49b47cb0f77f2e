//! Post and comment snapshots, content validation

use crate::core_space::{PostId, SpaceRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum post content length in characters, enforced client-side
pub const MAX_POST_CONTENT_LEN: usize = 1000;

/// Maximum comment content length in characters, enforced client-side
pub const MAX_COMMENT_CONTENT_LEN: usize = 500;

/// A post within a Space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier
    pub id: PostId,

    /// Author's email
    pub author_email: String,

    /// Author's display name
    pub author_name: String,

    /// Post body, at most [`MAX_POST_CONTENT_LEN`] characters
    pub content: String,

    /// Attached file URL, if any
    #[serde(default)]
    pub file_url: Option<String>,

    /// When the post was created
    pub created_at: DateTime<Utc>,

    /// Number of comments on this post
    pub comment_count: u32,
}

impl Post {
    /// Whether the delete action is offered: the author or a space admin.
    /// The server enforces this independently.
    pub fn can_be_deleted_by(&self, viewer_email: &str, viewer_role: SpaceRole) -> bool {
        viewer_role.is_admin() || self.author_email == viewer_email
    }
}

/// A comment on a post. No lifecycle of its own beyond its parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Comment body, at most [`MAX_COMMENT_CONTENT_LEN`] characters
    pub content: String,

    /// Author's display name
    pub author_name: String,

    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

/// Content validation errors. A failed validation means the request was
/// never sent.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("Content must not be empty")]
    BlankContent,

    #[error("Content exceeds {max} characters (got {len})")]
    ContentTooLong { max: usize, len: usize },
}

/// Validate post content: non-blank after trimming, within the post limit
pub fn validate_post_content(content: &str) -> Result<(), FeedError> {
    validate_content(content, MAX_POST_CONTENT_LEN)
}

/// Validate comment content: non-blank after trimming, within the comment limit
pub fn validate_comment_content(content: &str) -> Result<(), FeedError> {
    validate_content(content, MAX_COMMENT_CONTENT_LEN)
}

fn validate_content(content: &str, max: usize) -> Result<(), FeedError> {
    if content.trim().is_empty() {
        return Err(FeedError::BlankContent);
    }

    let len = content.chars().count();
    if len > max {
        return Err(FeedError::ContentTooLong { max, len });
    }

    Ok(())
}
