//! Users eligible for invitation

use serde::{Deserialize, Serialize};

/// A user who can be invited to a Space: not a member, no pending
/// invitation. The server computes eligibility; this is display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitableUser {
    pub email: String,

    /// Display name
    pub name: String,

    /// Avatar image URL, if any
    #[serde(default)]
    pub avatar: Option<String>,

    /// School affiliation, if known
    #[serde(default)]
    pub school: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_deserializes() {
        let user: InvitableUser =
            serde_json::from_str(r#"{"email": "bob@x.com", "name": "Bob"}"#).unwrap();
        assert_eq!(user.email, "bob@x.com");
        assert!(user.avatar.is_none());
        assert!(user.school.is_none());
    }
}
