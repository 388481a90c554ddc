//! Port for the `resources` and `lesson_resources` tables.

use async_trait::async_trait;

use crate::domain::{LessonId, Resource, ResourceId};

use super::StoreError;

/// Downloadable resource persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Every resource, newest first.
    async fn list(&self) -> Result<Vec<Resource>, StoreError>;

    /// Resources attached to a lesson.
    async fn list_for_lesson(&self, lesson: &LessonId) -> Result<Vec<Resource>, StoreError>;

    /// Fetch a resource by id.
    async fn find(&self, id: &ResourceId) -> Result<Option<Resource>, StoreError>;

    /// Insert a resource and its lesson link, if any.
    async fn insert(&self, resource: &Resource) -> Result<(), StoreError>;

    /// Delete a resource; returns whether a row was removed.
    async fn delete(&self, id: &ResourceId) -> Result<bool, StoreError>;
}
