//! Port for the `blog_articles` table.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{ArticleId, BlogArticle, Publication};

use super::StoreError;

/// Blog persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Published articles, newest first. Returns up to `page.fetch_limit()`
    /// rows starting at `page.offset()`.
    async fn list_published(&self, page: &PageRequest) -> Result<Vec<BlogArticle>, StoreError>;

    /// Every article, newest first.
    async fn list_all(&self) -> Result<Vec<BlogArticle>, StoreError>;

    /// Fetch a published article by slug.
    async fn find_published_by_slug(&self, slug: &str)
    -> Result<Option<BlogArticle>, StoreError>;

    /// Fetch an article by id.
    async fn find(&self, id: &ArticleId) -> Result<Option<BlogArticle>, StoreError>;

    /// Insert an article. Duplicate slugs raise [`StoreError::Conflict`].
    async fn insert(&self, article: &BlogArticle) -> Result<(), StoreError>;

    /// Set `published` and `published_at` only.
    async fn set_publication(
        &self,
        id: &ArticleId,
        publication: Publication,
    ) -> Result<Option<BlogArticle>, StoreError>;
}
