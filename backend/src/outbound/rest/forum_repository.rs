//! `forum_categories`, `forum_threads` and `forum_posts` table adapter.

use async_trait::async_trait;
use pagination::PageRequest;
use serde_json::{Map, Value};

use crate::domain::ports::{ForumRepository, StoreError};
use crate::domain::{
    ForumCategory, ForumCategoryId, ForumPost, ForumThread, PostId, ThreadFlag, ThreadId,
};

use super::client::RestStoreClient;
use super::query::{Direction, TableQuery};
use super::rows::{ForumCategoryRow, ForumPostRow, ForumThreadRow};

const CATEGORIES: &str = "forum_categories";
const THREADS: &str = "forum_threads";
const POSTS: &str = "forum_posts";

/// Store-backed [`ForumRepository`].
#[derive(Debug, Clone)]
pub struct RestForumRepository {
    client: RestStoreClient,
}

impl RestForumRepository {
    /// Create a repository sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }
}

/// `PATCH` body touching only the column of `flag`.
fn flag_change(flag: ThreadFlag, value: bool) -> Value {
    let mut changes = Map::new();
    changes.insert(flag.column().to_owned(), Value::Bool(value));
    Value::Object(changes)
}

#[async_trait]
impl ForumRepository for RestForumRepository {
    async fn list_categories(&self) -> Result<Vec<ForumCategory>, StoreError> {
        let query = TableQuery::new().order("position", Direction::Asc);
        let rows: Vec<ForumCategoryRow> = self.client.select(CATEGORIES, &query).await?;
        Ok(rows.into_iter().map(ForumCategory::from).collect())
    }

    async fn find_category(
        &self,
        id: &ForumCategoryId,
    ) -> Result<Option<ForumCategory>, StoreError> {
        let row: Option<ForumCategoryRow> = self
            .client
            .select_one(CATEGORIES, TableQuery::new().eq("id", id))
            .await?;
        Ok(row.map(ForumCategory::from))
    }

    async fn list_threads(
        &self,
        category: &ForumCategoryId,
        page: &PageRequest,
    ) -> Result<Vec<ForumThread>, StoreError> {
        let query = TableQuery::new()
            .eq("category_id", category)
            .order("pinned", Direction::Desc)
            .order("created_at", Direction::Desc)
            .page(page);
        let rows: Vec<ForumThreadRow> = self.client.select(THREADS, &query).await?;
        Ok(rows.into_iter().map(ForumThread::from).collect())
    }

    async fn find_thread(&self, id: &ThreadId) -> Result<Option<ForumThread>, StoreError> {
        let row: Option<ForumThreadRow> = self
            .client
            .select_one(THREADS, TableQuery::new().eq("id", id))
            .await?;
        Ok(row.map(ForumThread::from))
    }

    async fn insert_thread(&self, thread: &ForumThread) -> Result<(), StoreError> {
        self.client
            .insert(THREADS, &ForumThreadRow::from(thread))
            .await
    }

    async fn set_thread_flag(
        &self,
        id: &ThreadId,
        flag: ThreadFlag,
        value: bool,
    ) -> Result<Option<ForumThread>, StoreError> {
        let rows: Vec<ForumThreadRow> = self
            .client
            .update(
                THREADS,
                &TableQuery::new().eq("id", id),
                &flag_change(flag, value),
            )
            .await?;
        Ok(rows.into_iter().next().map(ForumThread::from))
    }

    async fn list_posts(&self, thread: &ThreadId) -> Result<Vec<ForumPost>, StoreError> {
        let query = TableQuery::new()
            .eq("thread_id", thread)
            .order("created_at", Direction::Asc);
        let rows: Vec<ForumPostRow> = self.client.select(POSTS, &query).await?;
        Ok(rows.into_iter().map(ForumPost::from).collect())
    }

    async fn insert_post(&self, post: &ForumPost) -> Result<(), StoreError> {
        self.client.insert(POSTS, &ForumPostRow::from(post)).await
    }

    async fn delete_post(&self, id: &PostId) -> Result<bool, StoreError> {
        let removed = self
            .client
            .delete(POSTS, &TableQuery::new().eq("id", id))
            .await?;
        Ok(removed > 0)
    }
}
