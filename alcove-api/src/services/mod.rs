//! One service per backend surface
//!
//! Services are thin: build a request, await the JSON response, map it
//! through the wire layer into a domain snapshot. No service retains
//! authority over another's state beyond read access.

mod auth;
mod feed;
mod invitations;
mod members;
mod spaces;
mod users;

pub use auth::{AppleCredential, AuthApi, GoogleAuthCode, LoginOutcome};
pub use feed::FeedApi;
pub use invitations::InvitationsApi;
pub use members::MembersApi;
pub use spaces::SpacesApi;
pub use users::UsersApi;
