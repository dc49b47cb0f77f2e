//! Invitation operations

use std::sync::Arc;

use alcove_core::core_invite::{InvitableUser, Invitation};
use alcove_core::core_space::{InvitationId, SpaceId};
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::wire::{InvitableUsersEnvelope, InvitationRecord, InvitationsEnvelope, MessageBody};

/// The invite → pending → accepted/declined workflow.
///
/// The server owns the duplicate policy: inviting someone with a pending
/// invitation, or who is already a member, is rejected there and surfaced
/// here as [`ApiError::Duplicate`], never masked.
pub struct InvitationsApi {
    client: Arc<ApiClient>,
}

impl InvitationsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Invite a user to a Space. Admin-only, server-enforced.
    pub async fn invite_user(&self, space_id: SpaceId, invitee_email: &str) -> ApiResult<String> {
        if invitee_email.trim().is_empty() {
            return Err(ApiError::Validation(
                "Invitee email must not be empty".to_string(),
            ));
        }

        let body = json!({ "inviteeEmail": invitee_email });
        let response: MessageBody = self
            .client
            .post(
                "invite_user",
                &format!("/inviteToPrivateSpace/{}", space_id),
                &body,
            )
            .await?;

        info!(space_id = %space_id, invitee = invitee_email, "invitation sent");
        Ok(response.message)
    }

    /// Accept a pending invitation addressed to the session user. On
    /// success the server creates a membership with role `member`; the
    /// space appears in the next directory listing.
    pub async fn accept_invitation(&self, invitation_id: InvitationId) -> ApiResult<String> {
        let response: MessageBody = self
            .client
            .post_empty(
                "accept_invitation",
                &format!("/acceptPrivateSpaceInvitation/{}", invitation_id),
            )
            .await?;

        info!(invitation_id = %invitation_id, "invitation accepted");
        Ok(response.message)
    }

    /// All pending invitations addressed to the session user, across all
    /// Spaces. The inbox, independent of the space directory.
    pub async fn pending_invitations(&self) -> ApiResult<Vec<Invitation>> {
        let envelope: InvitationsEnvelope = self
            .client
            .get("pending_invitations", "/getPendingInvitations")
            .await?;

        Ok(envelope
            .invitations
            .into_iter()
            .map(InvitationRecord::into_invitation)
            .collect())
    }

    /// Users eligible for invitation to a Space
    pub async fn invitable_users(&self, space_id: SpaceId) -> ApiResult<Vec<InvitableUser>> {
        let envelope: InvitableUsersEnvelope = self
            .client
            .get("invitable_users", &format!("/getInvitableUsers/{}", space_id))
            .await?;

        Ok(envelope.users)
    }

    /// Search eligible users by name or email
    pub async fn search_invitable_users(
        &self,
        space_id: SpaceId,
        query: &str,
    ) -> ApiResult<Vec<InvitableUser>> {
        let envelope: InvitableUsersEnvelope = self
            .client
            .get_with_query(
                "search_invitable_users",
                &format!("/searchInvitableUsers/{}", space_id),
                &[("query", query.to_string())],
            )
            .await?;

        Ok(envelope.users)
    }
}
