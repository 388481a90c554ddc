//! `resources` table adapter.
//!
//! Lesson attachments live in the `lesson_resources` link table; a resource
//! is linked to at most one lesson.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{ResourceRepository, StoreError};
use crate::domain::{LessonId, Resource, ResourceId};

use super::client::RestStoreClient;
use super::query::{Direction, TableQuery};
use super::rows::{LessonResourceRow, ResourceRow};

const RESOURCES: &str = "resources";
const LINKS: &str = "lesson_resources";

/// Store-backed [`ResourceRepository`].
#[derive(Debug, Clone)]
pub struct RestResourceRepository {
    client: RestStoreClient,
}

impl RestResourceRepository {
    /// Create a repository sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }

    async fn links(&self, query: TableQuery) -> Result<Vec<LessonResourceRow>, StoreError> {
        self.client.select(LINKS, &query).await
    }
}

#[async_trait]
impl ResourceRepository for RestResourceRepository {
    async fn list(&self) -> Result<Vec<Resource>, StoreError> {
        let query = TableQuery::new().order("created_at", Direction::Desc);
        let rows: Vec<ResourceRow> = self.client.select(RESOURCES, &query).await?;
        let lessons: HashMap<ResourceId, LessonId> = self
            .links(TableQuery::new())
            .await?
            .into_iter()
            .map(|link| (link.resource_id, link.lesson_id))
            .collect();
        Ok(rows
            .into_iter()
            .map(|row| {
                let lesson = lessons.get(&row.id).copied();
                row.into_resource(lesson)
            })
            .collect())
    }

    async fn list_for_lesson(&self, lesson: &LessonId) -> Result<Vec<Resource>, StoreError> {
        let links = self
            .links(TableQuery::new().eq("lesson_id", lesson))
            .await?;
        if links.is_empty() {
            return Ok(Vec::new());
        }
        let query = TableQuery::new()
            .in_list("id", links.iter().map(|link| link.resource_id))
            .order("created_at", Direction::Asc);
        let rows: Vec<ResourceRow> = self.client.select(RESOURCES, &query).await?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_resource(Some(*lesson)))
            .collect())
    }

    async fn find(&self, id: &ResourceId) -> Result<Option<Resource>, StoreError> {
        let row: Option<ResourceRow> = self
            .client
            .select_one(RESOURCES, TableQuery::new().eq("id", id))
            .await?;
        let Some(found) = row else {
            return Ok(None);
        };
        let link = self
            .links(TableQuery::new().eq("resource_id", id).limit(1))
            .await?
            .into_iter()
            .next();
        Ok(Some(found.into_resource(link.map(|row| row.lesson_id))))
    }

    async fn insert(&self, resource: &Resource) -> Result<(), StoreError> {
        self.client
            .insert(RESOURCES, &ResourceRow::from(resource))
            .await?;
        if let Some(lesson_id) = resource.lesson_id {
            let link = LessonResourceRow {
                lesson_id,
                resource_id: resource.id,
            };
            self.client.insert(LINKS, &link).await?;
        }
        Ok(())
    }

    async fn delete(&self, id: &ResourceId) -> Result<bool, StoreError> {
        self.client
            .delete(LINKS, &TableQuery::new().eq("resource_id", id))
            .await?;
        let removed = self
            .client
            .delete(RESOURCES, &TableQuery::new().eq("id", id))
            .await?;
        Ok(removed > 0)
    }
}
