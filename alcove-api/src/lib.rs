//! HTTP/JSON client for the Alcove backend
//!
//! One service struct per backend surface, all sharing an [`ApiClient`]
//! that owns the base URL, the bearer credential, and the request timeout.
//! Every operation is a single independent round trip returning
//! `Result<T, ApiError>`; presentation of failures is the caller's concern.
//! Non-2xx responses carry `{message}` and that message is surfaced
//! verbatim.

pub mod client;
pub mod error;
pub mod services;
mod wire;

pub use client::{init_metrics, ApiClient};
pub use error::{ApiError, ApiResult};
pub use services::{
    AppleCredential, AuthApi, FeedApi, GoogleAuthCode, InvitationsApi, LoginOutcome, MembersApi,
    SpacesApi, UsersApi,
};
