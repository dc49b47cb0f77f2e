//! Space directory operations

use std::sync::{Arc, Mutex};

use alcove_core::core_space::{Space, SpaceDirectory, SpaceId};
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::wire::{MessageBody, SpaceDetailsEnvelope, SpaceRecord, SpacesEnvelope};

/// Spaces the user belongs to: listing, details, creation, dissolution.
///
/// Holds the client-local [`SpaceDirectory`] cache, replaced on each
/// listing and pruned when a dissolve succeeds.
pub struct SpacesApi {
    client: Arc<ApiClient>,
    directory: Mutex<SpaceDirectory>,
}

impl SpacesApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            directory: Mutex::new(SpaceDirectory::new()),
        }
    }

    /// Create a new Space. The caller becomes creator and admin.
    pub async fn create_space(
        &self,
        name: &str,
        description: &str,
        avatar_url: &str,
    ) -> ApiResult<Space> {
        if name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Space name must not be empty".to_string(),
            ));
        }

        let body = json!({
            "name": name,
            "description": description,
            "avatarUrl": avatar_url,
        });

        let record: SpaceRecord = self
            .client
            .post("create_space", "/createPrivateSpace", &body)
            .await?;

        let space = record.into_space();
        info!(space_id = %space.id, "created space");
        Ok(space)
    }

    /// List the Spaces the user is a member of, each annotated with the
    /// user's role, in server-defined order. Replaces the local cache.
    pub async fn list_my_spaces(&self) -> ApiResult<Vec<Space>> {
        let envelope: SpacesEnvelope = self
            .client
            .get("list_my_spaces", "/getUserPrivateSpaces")
            .await?;

        let spaces: Vec<Space> = envelope
            .spaces
            .into_iter()
            .map(SpaceRecord::into_space)
            .collect();

        self.lock_directory().replace_all(spaces.clone());
        Ok(spaces)
    }

    /// Full attributes of one Space plus the requester's role, for the
    /// space header and its action set
    pub async fn space_details(&self, space_id: SpaceId) -> ApiResult<Space> {
        let envelope: SpaceDetailsEnvelope = self
            .client
            .get(
                "space_details",
                &format!("/getPrivateSpaceDetails/{}", space_id),
            )
            .await?;

        Ok(envelope.space.into_space_with_role(envelope.user_role))
    }

    /// Dissolve a Space. Admin-only, irreversible: the server cascades
    /// deletion of posts, comments, memberships, and invitations. The
    /// local cache entry is pruned on success.
    pub async fn dissolve_space(&self, space_id: SpaceId) -> ApiResult<String> {
        let body: MessageBody = self
            .client
            .delete(
                "dissolve_space",
                &format!("/dissolvePrivateSpace/{}", space_id),
            )
            .await?;

        self.lock_directory().prune(space_id);
        info!(space_id = %space_id, "dissolved space");
        Ok(body.message)
    }

    /// Snapshot of the cached directory from the last listing
    pub fn cached_spaces(&self) -> Vec<Space> {
        self.lock_directory().spaces().to_vec()
    }

    /// One cached Space, if the last listing contained it
    pub fn cached_space(&self, space_id: SpaceId) -> Option<Space> {
        self.lock_directory().get(space_id).cloned()
    }

    fn lock_directory(&self) -> std::sync::MutexGuard<'_, SpaceDirectory> {
        self.directory.lock().expect("space directory lock poisoned")
    }
}
