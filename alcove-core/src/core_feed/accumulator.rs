//! Local feed accumulation over page/limit pagination

use super::post::Post;
use crate::core_space::PostId;

/// Accumulates pages of posts for one Space's feed.
///
/// Pages are 1-indexed and appended in order with no deduplication: fetching
/// the same page twice without [`reset`](Self::reset) duplicates its posts.
/// `has_more` is inferred from "last page was non-empty", an approximation
/// that reports one extra page when the final page is exactly full.
#[derive(Debug, Clone)]
pub struct FeedAccumulator {
    posts: Vec<Post>,
    next_page: u32,
    has_more: bool,
    limit: u32,
}

impl FeedAccumulator {
    /// Create an empty accumulator with the given page size
    pub fn new(limit: u32) -> Self {
        Self {
            posts: Vec::new(),
            next_page: 1,
            has_more: true,
            limit,
        }
    }

    /// Append one fetched page and advance the page counter
    pub fn append_page(&mut self, page: Vec<Post>) {
        self.has_more = !page.is_empty();
        self.next_page += 1;
        self.posts.extend(page);
    }

    /// Remove a post after a successful delete. Returns true if it was held.
    pub fn remove(&mut self, post_id: PostId) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != post_id);
        self.posts.len() != before
    }

    /// Discard everything and start over from page 1. The only way to
    /// refresh; there is no in-place reconciliation.
    pub fn reset(&mut self) {
        self.posts.clear();
        self.next_page = 1;
        self.has_more = true;
    }

    /// The page to fetch next (1-indexed)
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Whether another fetch is worth attempting
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Page size to request
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Accumulated posts, newest first within each page (server order)
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
