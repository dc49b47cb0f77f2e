//! Space member snapshot

use super::space::SpaceRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One member of a Space, keyed by email within that Space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceMember {
    /// Member's email, unique per Space
    pub email: String,

    /// Display name
    pub name: String,

    /// Avatar image URL, if any
    #[serde(default)]
    pub avatar: Option<String>,

    /// Role in the Space
    pub role: SpaceRole,

    /// When the member joined
    pub joined_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_without_avatar() {
        let member: SpaceMember = serde_json::from_str(
            r#"{
                "email": "bob@x.com",
                "name": "Bob",
                "role": "member",
                "joined_at": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(member.email, "bob@x.com");
        assert_eq!(member.role, SpaceRole::Member);
        assert!(member.avatar.is_none());
    }
}
