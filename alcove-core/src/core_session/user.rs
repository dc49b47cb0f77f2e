//! Account-level user snapshot

use serde::{Deserialize, Deserializer, Serialize};

/// A user account as returned by login and the user-administration surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    /// School affiliation, already normalized at the wire boundary
    /// (historical responses carried either a name or a bare ID)
    pub school: String,

    pub role: AccountRole,

    #[serde(default)]
    pub profile_pic: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Account-level role, distinct from per-space membership roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccountRole {
    Admin,
    Approved,
    /// Registered but not yet approved; cannot log in
    Pending,
}

impl AccountRole {
    /// Whether this account may use the app at all
    pub fn is_approved(self) -> bool {
        matches!(self, AccountRole::Admin | AccountRole::Approved)
    }
}

// Unrecognized server values degrade to `Pending`, the least privileged
// reading, instead of failing the whole response
impl<'de> Deserialize<'de> for AccountRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "Admin" => AccountRole::Admin,
            "Approved" => AccountRole::Approved,
            _ => AccountRole::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_gate() {
        assert!(AccountRole::Admin.is_approved());
        assert!(AccountRole::Approved.is_approved());
        assert!(!AccountRole::Pending.is_approved());
    }

    #[test]
    fn test_unknown_role_becomes_pending() {
        let role: AccountRole = serde_json::from_str("\"Suspended\"").unwrap();
        assert_eq!(role, AccountRole::Pending);
    }

    #[test]
    fn test_display_name() {
        let user = User {
            email: "bob@x.com".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Stone".to_string(),
            school: "Northwood".to_string(),
            role: AccountRole::Approved,
            profile_pic: None,
        };
        assert_eq!(user.display_name(), "Bob Stone");
    }
}
