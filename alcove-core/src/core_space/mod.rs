//! Space, membership, and role model
//!
//! A Space is an invite-only content group. The viewing user's role in each
//! Space decides which actions are offered; the predicates here are a
//! usability optimization only, the server is the authoritative enforcer.

mod directory;
mod member;
mod space;
mod types;

pub use directory::SpaceDirectory;
pub use member::SpaceMember;
pub use space::{Space, SpaceRole};
pub use types::{InvitationId, PostId, SpaceId};
