//! Domain model for the Alcove client.
//!
//! Everything here is a value snapshot of server state plus the small amount
//! of client-local bookkeeping the screens need: the session handle, the
//! space directory cache, the feed accumulator, and the role predicates that
//! decide which actions are offered. The server remains the authoritative
//! enforcer for all of them.

pub mod config;
pub mod core_feed;
pub mod core_invite;
pub mod core_session;
pub mod core_space;
pub mod core_task;
pub mod logging;

pub use logging::{init_logging, LogLevel};
