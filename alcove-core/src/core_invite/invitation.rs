//! Invitation snapshot and status transitions

use crate::core_space::{InvitationId, SpaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending offer of membership to a non-member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    /// Unique identifier
    pub id: InvitationId,

    /// Target Space
    pub space_id: SpaceId,

    /// Name of the target Space, for inbox rendering
    pub space_name: String,

    /// Who sent the invitation
    pub inviter_email: String,

    /// Inviter's display name
    pub inviter_name: String,

    /// Who the invitation is addressed to
    pub invitee_email: String,

    /// Current lifecycle state
    pub status: InvitationStatus,

    /// When the invitation was created
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }
}

/// Invitation lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    /// Outstanding, awaiting the invitee
    Pending,
    /// Accepted; a membership with role `member` exists
    Accepted,
    /// Declined or expired. Terminal, no membership created.
    Declined,
}

impl InvitationStatus {
    /// Transition to accepted. Only valid from `Pending`.
    pub fn accept(self) -> Result<Self, InviteError> {
        match self {
            InvitationStatus::Pending => Ok(InvitationStatus::Accepted),
            InvitationStatus::Accepted => Err(InviteError::AlreadyAccepted),
            InvitationStatus::Declined => Err(InviteError::AlreadyDeclined),
        }
    }

    /// Transition to declined. Only valid from `Pending`.
    pub fn decline(self) -> Result<Self, InviteError> {
        match self {
            InvitationStatus::Pending => Ok(InvitationStatus::Declined),
            InvitationStatus::Accepted => Err(InviteError::AlreadyAccepted),
            InvitationStatus::Declined => Err(InviteError::AlreadyDeclined),
        }
    }

    pub fn is_terminal(self) -> bool {
        self != InvitationStatus::Pending
    }
}

/// Invitation operation errors
#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error("Invitation has already been accepted")]
    AlreadyAccepted,

    #[error("Invitation has already been declined")]
    AlreadyDeclined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_accepts() {
        assert_eq!(
            InvitationStatus::Pending.accept().unwrap(),
            InvitationStatus::Accepted
        );
    }

    #[test]
    fn test_pending_declines() {
        assert_eq!(
            InvitationStatus::Pending.decline().unwrap(),
            InvitationStatus::Declined
        );
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        assert!(matches!(
            InvitationStatus::Accepted.accept(),
            Err(InviteError::AlreadyAccepted)
        ));
        assert!(matches!(
            InvitationStatus::Declined.accept(),
            Err(InviteError::AlreadyDeclined)
        ));
        assert!(matches!(
            InvitationStatus::Accepted.decline(),
            Err(InviteError::AlreadyAccepted)
        ));
    }

    #[test]
    fn test_terminality() {
        assert!(!InvitationStatus::Pending.is_terminal());
        assert!(InvitationStatus::Accepted.is_terminal());
        assert!(InvitationStatus::Declined.is_terminal());
    }

    #[test]
    fn test_status_serde_lowercase() {
        let status: InvitationStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, InvitationStatus::Pending);
        assert_eq!(
            serde_json::to_string(&InvitationStatus::Declined).unwrap(),
            "\"declined\""
        );
    }
}
