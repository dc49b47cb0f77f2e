//! Space-scoped feed operations

use std::sync::Arc;

use alcove_core::core_feed::{
    validate_comment_content, validate_post_content, Comment, FeedAccumulator, Post,
};
use alcove_core::core_space::{PostId, SpaceId};
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::wire::{CommentRecord, CommentsEnvelope, MessageBody, PostRecord, PostsBody};

pub struct FeedApi {
    client: Arc<ApiClient>,
}

impl FeedApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Create a post. Content is validated before any request is built:
    /// blank or oversize content fails locally.
    pub async fn create_post(
        &self,
        space_id: SpaceId,
        content: &str,
        file_url: Option<&str>,
    ) -> ApiResult<Post> {
        validate_post_content(content)?;

        let body = json!({
            "content": content,
            "fileUrl": file_url,
        });

        let record: PostRecord = self
            .client
            .post(
                "create_post",
                &format!("/createPrivateSpacePost/{}", space_id),
                &body,
            )
            .await?;

        let post = record.into_post();
        info!(space_id = %space_id, post_id = %post.id, "post created");
        Ok(post)
    }

    /// One page of posts, 1-indexed, newest first (server-defined order)
    pub async fn list_posts(
        &self,
        space_id: SpaceId,
        page: u32,
        limit: u32,
    ) -> ApiResult<Vec<Post>> {
        let body: PostsBody = self
            .client
            .get_with_query(
                "list_posts",
                &format!("/getPrivateSpacePosts/{}", space_id),
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        Ok(body.into_posts())
    }

    /// Fetch the accumulator's next page and append it. Returns the number
    /// of posts appended; zero clears `has_more`.
    pub async fn fetch_next_page(
        &self,
        space_id: SpaceId,
        feed: &mut FeedAccumulator,
    ) -> ApiResult<usize> {
        let page = self
            .list_posts(space_id, feed.next_page(), feed.limit())
            .await?;

        let fetched = page.len();
        feed.append_page(page);
        Ok(fetched)
    }

    /// Delete a post. Author or space admin only, server-enforced. On
    /// success the post is removed from the given feed.
    pub async fn delete_post(
        &self,
        feed: &mut FeedAccumulator,
        post_id: PostId,
    ) -> ApiResult<String> {
        let response: MessageBody = self
            .client
            .delete("delete_post", &format!("/deletePrivateSpacePost/{}", post_id))
            .await?;

        feed.remove(post_id);
        info!(post_id = %post_id, "post deleted");
        Ok(response.message)
    }

    /// Add a comment to a post. The caller refetches the comment list;
    /// there is no optimistic append.
    pub async fn add_comment(&self, post_id: PostId, content: &str) -> ApiResult<Comment> {
        validate_comment_content(content)?;

        let body = json!({ "content": content });
        let record: CommentRecord = self
            .client
            .post(
                "add_comment",
                &format!("/addPrivateSpaceComment/{}", post_id),
                &body,
            )
            .await?;

        Ok(record.into_comment())
    }

    /// All comments on a post
    pub async fn list_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>> {
        let envelope: CommentsEnvelope = self
            .client
            .get(
                "list_comments",
                &format!("/getPrivateSpaceComments/{}", post_id),
            )
            .await?;

        Ok(envelope
            .comments
            .into_iter()
            .map(CommentRecord::into_comment)
            .collect())
    }
}
