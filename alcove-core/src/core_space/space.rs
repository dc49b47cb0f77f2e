//! Space snapshot and role predicates

use super::types::SpaceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Space as seen by one user: server attributes plus that user's role.
///
/// Snapshots are immutable; a refetch is the only update mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    /// Unique identifier, server-assigned
    pub id: SpaceId,

    /// Human-readable name
    pub name: String,

    /// Description, possibly empty
    pub description: String,

    /// Avatar image URL, possibly empty
    pub avatar_url: String,

    /// Email of the creator. The creator's membership role is always
    /// `Admin` and the creator cannot be removed.
    pub creator_email: String,

    /// When the Space was created
    pub created_at: DateTime<Utc>,

    /// Total number of members
    pub member_count: u32,

    /// Total number of posts
    pub post_count: u32,

    /// The viewing user's role. Relationship data, not a space-wide
    /// property: two users see different values here.
    pub viewer_role: SpaceRole,
}

impl Space {
    /// Whether the viewing user may offer the invite action
    pub fn viewer_can_invite(&self) -> bool {
        self.viewer_role.can_invite()
    }

    /// Whether the viewing user may offer the dissolve action
    pub fn viewer_can_dissolve(&self) -> bool {
        self.viewer_role.can_dissolve()
    }

    /// Whether the viewing user may offer removal of a member with the
    /// given role. Admins (the creator included) are never removable.
    pub fn viewer_can_remove(&self, target_role: SpaceRole) -> bool {
        self.viewer_role.can_remove(target_role)
    }
}

/// Membership roles within a Space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceRole {
    /// Invite/remove/dissolve authority
    Admin,
    /// Default role, can participate
    Member,
}

impl SpaceRole {
    /// Only admins may invite
    pub fn can_invite(self) -> bool {
        matches!(self, SpaceRole::Admin)
    }

    /// Only admins may dissolve a Space
    pub fn can_dissolve(self) -> bool {
        matches!(self, SpaceRole::Admin)
    }

    /// Admins may remove members, but never another admin. The creator is
    /// always an admin, so this also protects the creator.
    pub fn can_remove(self, target: SpaceRole) -> bool {
        self == SpaceRole::Admin && target != SpaceRole::Admin
    }

    pub fn is_admin(self) -> bool {
        matches!(self, SpaceRole::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpaceRole::Admin => "admin",
            SpaceRole::Member => "member",
        }
    }
}
