//! Membership listing and removal

use std::sync::Arc;

use alcove_core::core_space::{SpaceId, SpaceMember};
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::wire::{MemberRecord, MembersEnvelope, MessageBody};

pub struct MembersApi {
    client: Arc<ApiClient>,
}

impl MembersApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List the members of a Space with their roles
    pub async fn list_members(&self, space_id: SpaceId) -> ApiResult<Vec<SpaceMember>> {
        let envelope: MembersEnvelope = self
            .client
            .get(
                "list_members",
                &format!("/getPrivateSpaceMembers/{}", space_id),
            )
            .await?;

        Ok(envelope
            .members
            .into_iter()
            .map(MemberRecord::into_member)
            .collect())
    }

    /// Remove a member from a Space. Admin-only and never the creator,
    /// both server-enforced; a rejection surfaces as an authorization
    /// error with the server's message.
    pub async fn remove_member(
        &self,
        space_id: SpaceId,
        member_email: &str,
    ) -> ApiResult<String> {
        let response: MessageBody = self
            .client
            .delete(
                "remove_member",
                &format!("/removePrivateSpaceMember/{}/{}", space_id, member_email),
            )
            .await?;

        info!(space_id = %space_id, member = member_email, "member removed");
        Ok(response.message)
    }
}
