//! Session state
//!
//! A [`Session`] is the read-only handle every service borrows before each
//! request: the bearer credential plus a few identity fields. It is created
//! once after login and passed explicitly, usually as `Arc<Session>`;
//! there is no module-level login state, and nothing here outlives its
//! owner. Token refresh on 401 is not implemented; a rejected credential
//! surfaces as an authorization error.

mod user;

use secrecy::{ExposeSecret, SecretString};

pub use user::{AccountRole, User};

/// An authenticated user's session
pub struct Session {
    token: SecretString,
    email: String,
    display_name: String,
    account_role: AccountRole,
}

impl Session {
    pub fn new(token: String, email: String, display_name: String, role: AccountRole) -> Self {
        Self {
            token: SecretString::new(token),
            email,
            display_name,
            account_role: role,
        }
    }

    /// The bearer credential. Exposed only at the point a request is built.
    pub fn bearer_token(&self) -> &str {
        self.token.expose_secret()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn account_role(&self) -> AccountRole {
        self.account_role
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("account_role", &self.account_role)
            .finish()
    }
}

/// A profile field update, tagged explicitly.
///
/// The update call receives exactly which field changes and its new value;
/// nothing is inferred from UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileField {
    Name(String),
    Username(String),
    School(String),
}

impl ProfileField {
    /// Wire name of the field being updated
    pub fn field_name(&self) -> &'static str {
        match self {
            ProfileField::Name(_) => "name",
            ProfileField::Username(_) => "username",
            ProfileField::School(_) => "school",
        }
    }

    /// The new value
    pub fn value(&self) -> &str {
        match self {
            ProfileField::Name(v) | ProfileField::Username(v) | ProfileField::School(v) => v,
        }
    }
}
