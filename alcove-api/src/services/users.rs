//! User administration and profile updates

use std::sync::Arc;

use alcove_core::core_session::{ProfileField, User};
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::wire::{AccountRecord, AccountsEnvelope, MessageBody};

pub struct UsersApi {
    client: Arc<ApiClient>,
}

impl UsersApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Accounts awaiting approval (admin surface)
    pub async fn pending_users(&self) -> ApiResult<Vec<User>> {
        self.list_accounts("pending_users", "/getPendingUsers").await
    }

    /// Approved accounts (admin surface)
    pub async fn approved_users(&self) -> ApiResult<Vec<User>> {
        self.list_accounts("approved_users", "/getApprovedUsers")
            .await
    }

    /// Approve a pending account
    pub async fn approve_user(&self, email: &str) -> ApiResult<String> {
        let body = json!({ "email": email });
        let response: MessageBody = self.client.post("approve_user", "/approveUser", &body).await?;

        info!(email, "user approved");
        Ok(response.message)
    }

    /// Delete an account entirely
    pub async fn delete_user(&self, email: &str) -> ApiResult<String> {
        let response: MessageBody = self
            .client
            .delete("delete_user", &format!("/deleteUser/{}", email))
            .await?;

        info!(email, "user deleted");
        Ok(response.message)
    }

    /// Update one profile field of the session user. The field is an
    /// explicit tagged value; nothing is inferred from UI state.
    pub async fn update_profile_field(&self, field: &ProfileField) -> ApiResult<String> {
        let body = json!({
            "field": field.field_name(),
            "value": field.value(),
        });

        let response: MessageBody = self
            .client
            .post("update_profile_field", "/changeInfo", &body)
            .await?;

        info!(field = field.field_name(), "profile field updated");
        Ok(response.message)
    }

    async fn list_accounts(&self, op: &'static str, path: &str) -> ApiResult<Vec<User>> {
        let envelope: AccountsEnvelope = self.client.get(op, path).await?;
        Ok(envelope
            .data
            .into_iter()
            .map(AccountRecord::into_user)
            .collect())
    }
}
