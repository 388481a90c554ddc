//! `blog_articles` table adapter.

use async_trait::async_trait;
use pagination::PageRequest;
use serde_json::json;

use crate::domain::ports::{BlogRepository, StoreError};
use crate::domain::{ArticleId, BlogArticle, Publication};

use super::client::RestStoreClient;
use super::query::{Direction, TableQuery};
use super::rows::BlogArticleRow;

const TABLE: &str = "blog_articles";

/// Store-backed [`BlogRepository`].
#[derive(Debug, Clone)]
pub struct RestBlogRepository {
    client: RestStoreClient,
}

impl RestBlogRepository {
    /// Create a repository sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }

    async fn rows(&self, query: &TableQuery) -> Result<Vec<BlogArticle>, StoreError> {
        let rows: Vec<BlogArticleRow> = self.client.select(TABLE, query).await?;
        Ok(rows.into_iter().map(BlogArticle::from).collect())
    }
}

#[async_trait]
impl BlogRepository for RestBlogRepository {
    async fn list_published(&self, page: &PageRequest) -> Result<Vec<BlogArticle>, StoreError> {
        let query = TableQuery::new()
            .eq("published", true)
            .order("published_at", Direction::Desc)
            .order("created_at", Direction::Desc)
            .page(page);
        self.rows(&query).await
    }

    async fn list_all(&self) -> Result<Vec<BlogArticle>, StoreError> {
        self.rows(&TableQuery::new().order("created_at", Direction::Desc))
            .await
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BlogArticle>, StoreError> {
        let row: Option<BlogArticleRow> = self
            .client
            .select_one(TABLE, TableQuery::new().eq("slug", slug).eq("published", true))
            .await?;
        Ok(row.map(BlogArticle::from))
    }

    async fn find(&self, id: &ArticleId) -> Result<Option<BlogArticle>, StoreError> {
        let row: Option<BlogArticleRow> = self
            .client
            .select_one(TABLE, TableQuery::new().eq("id", id))
            .await?;
        Ok(row.map(BlogArticle::from))
    }

    async fn insert(&self, article: &BlogArticle) -> Result<(), StoreError> {
        self.client.insert(TABLE, &BlogArticleRow::from(article)).await
    }

    async fn set_publication(
        &self,
        id: &ArticleId,
        publication: Publication,
    ) -> Result<Option<BlogArticle>, StoreError> {
        let changes = json!({
            "published": publication.published,
            "published_at": publication.published_at,
        });
        let rows: Vec<BlogArticleRow> = self
            .client
            .update(TABLE, &TableQuery::new().eq("id", id), &changes)
            .await?;
        Ok(rows.into_iter().next().map(BlogArticle::from))
    }
}
