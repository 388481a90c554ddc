//! Port for the forum tables.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{
    ForumCategory, ForumCategoryId, ForumPost, ForumThread, PostId, ThreadFlag, ThreadId,
};

use super::StoreError;

/// Forum persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Categories ordered by position.
    async fn list_categories(&self) -> Result<Vec<ForumCategory>, StoreError>;

    /// Fetch a category by id.
    async fn find_category(
        &self,
        id: &ForumCategoryId,
    ) -> Result<Option<ForumCategory>, StoreError>;

    /// Threads of a category, pinned first then newest. Returns up to
    /// `page.fetch_limit()` rows starting at `page.offset()`.
    async fn list_threads(
        &self,
        category: &ForumCategoryId,
        page: &PageRequest,
    ) -> Result<Vec<ForumThread>, StoreError>;

    /// Fetch a thread by id.
    async fn find_thread(&self, id: &ThreadId) -> Result<Option<ForumThread>, StoreError>;

    /// Insert a thread.
    async fn insert_thread(&self, thread: &ForumThread) -> Result<(), StoreError>;

    /// Set one moderation flag and leave every other column unchanged.
    async fn set_thread_flag(
        &self,
        id: &ThreadId,
        flag: ThreadFlag,
        value: bool,
    ) -> Result<Option<ForumThread>, StoreError>;

    /// Posts of a thread, oldest first.
    async fn list_posts(&self, thread: &ThreadId) -> Result<Vec<ForumPost>, StoreError>;

    /// Insert a post.
    async fn insert_post(&self, post: &ForumPost) -> Result<(), StoreError>;

    /// Delete a post; returns whether a row was removed.
    async fn delete_post(&self, id: &PostId) -> Result<bool, StoreError>;
}
