//! Identifier types for server-assigned entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a Space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(pub u64);

/// Unique identifier for an Invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationId(pub u64);

/// Unique identifier for a Post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

macro_rules! id_impls {
    ($name:ident) => {
        impl $name {
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }
    };
}

id_impls!(SpaceId);
id_impls!(InvitationId);
id_impls!(PostId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_number() {
        assert_eq!(SpaceId(7).to_string(), "7");
        assert_eq!(InvitationId(42).to_string(), "42");
        assert_eq!(PostId(0).to_string(), "0");
    }

    #[test]
    fn test_transparent_serde() {
        let id: SpaceId = serde_json::from_str("9").unwrap();
        assert_eq!(id, SpaceId(9));
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
    }
}
