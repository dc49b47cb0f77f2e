//! Invitation lifecycle
//!
//! One state machine per `(space, invitee)` pair: `Pending` until accepted
//! (which produces a membership, role `member`) or declined. Terminal states
//! never transition again. The server rejects a second pending invitation
//! for the same pair; the client's job is to surface that, not mask it.

mod candidate;
mod invitation;

pub use candidate::InvitableUser;
pub use invitation::{Invitation, InvitationStatus, InviteError};
