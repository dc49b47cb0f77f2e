//! Space-scoped content feed
//!
//! Posts and comments are value snapshots; pagination is plain page/limit
//! counters accumulated client-side. Content limits are enforced before a
//! request is ever built.

mod accumulator;
mod post;

pub use accumulator::FeedAccumulator;
pub use post::{
    validate_comment_content, validate_post_content, Comment, FeedError, Post,
    MAX_COMMENT_CONTENT_LEN, MAX_POST_CONTENT_LEN,
};
