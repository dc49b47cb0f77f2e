//! Authentication: password login and third-party identity providers
//!
//! Every provider normalizes to the same `{token, user}` success shape.
//! The second factor, when the server demands it, is completed out of
//! band; the client only reports the flag.

use std::sync::Arc;

use alcove_core::core_session::{Session, User};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::wire::LoginEnvelope;

/// Authentication surface. Uses an unauthenticated client: there is no
/// bearer token before login succeeds.
pub struct AuthApi {
    client: Arc<ApiClient>,
}

/// A successful login, before a session is established
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
    /// The server requires a one-time-passcode second factor before the
    /// token is usable
    pub requires_2fa: bool,
}

impl LoginOutcome {
    /// Build the session handle the rest of the client reads
    pub fn into_session(self) -> Session {
        let display_name = self.user.display_name();
        Session::new(self.token, self.user.email, display_name, self.user.role)
    }
}

/// Google OAuth authorization-code exchange payload (PKCE optional)
#[derive(Debug, Clone, Serialize)]
pub struct GoogleAuthCode {
    pub code: String,
    pub redirect_uri: String,
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
}

/// Apple identity payload
#[derive(Debug, Clone)]
pub struct AppleCredential {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub provider_id: String,
    pub identity_token: String,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Password login. Blank credentials fail locally; unapproved
    /// accounts are rejected after a successful exchange.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginOutcome> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password must not be blank".to_string(),
            ));
        }

        let body = json!({ "username": email, "password": password });
        let envelope: LoginEnvelope = self.client.post("login", "/login", &body).await?;
        finish_login(envelope)
    }

    /// Exchange a Google authorization code for a session
    pub async fn google_login(&self, auth: &GoogleAuthCode) -> ApiResult<LoginOutcome> {
        let envelope: LoginEnvelope = self
            .client
            .post("google_login", "/api/auth/google", auth)
            .await?;
        finish_login(envelope)
    }

    /// Exchange a LinkedIn authorization code for a session
    pub async fn linkedin_login(&self, code: &str) -> ApiResult<LoginOutcome> {
        let body = json!({ "code": code });
        let envelope: LoginEnvelope = self
            .client
            .post("linkedin_login", "/api/auth/linkedin", &body)
            .await?;
        finish_login(envelope)
    }

    /// Authenticate with an Apple identity credential
    pub async fn apple_login(&self, credential: &AppleCredential) -> ApiResult<LoginOutcome> {
        let body = json!({
            "provider": "apple",
            "email": credential.email,
            "firstName": credential.first_name,
            "lastName": credential.last_name,
            "providerId": credential.provider_id,
            "identityToken": credential.identity_token,
        });

        let envelope: LoginEnvelope = self
            .client
            .post("apple_login", "/api/auth/social", &body)
            .await?;
        finish_login(envelope)
    }
}

fn finish_login(envelope: LoginEnvelope) -> ApiResult<LoginOutcome> {
    let user = envelope.user.into_user();
    if !user.role.is_approved() {
        return Err(ApiError::AwaitingApproval);
    }

    info!(email = %user.email, requires_2fa = envelope.requires_2fa, "login succeeded");
    Ok(LoginOutcome {
        token: envelope.token,
        user,
        requires_2fa: envelope.requires_2fa,
    })
}
