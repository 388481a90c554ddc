//! Port for the `courses`, `modules` and `lessons` tables.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, CourseModule, Lesson, LessonId, ModuleId};

use super::StoreError;

/// Course catalogue persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Courses ordered by creation time, newest first.
    async fn list_courses(&self, include_unpublished: bool) -> Result<Vec<Course>, StoreError>;

    /// Fetch a course by slug regardless of publication state.
    async fn find_course_by_slug(&self, slug: &str) -> Result<Option<Course>, StoreError>;

    /// Fetch a course by id.
    async fn find_course(&self, id: &CourseId) -> Result<Option<Course>, StoreError>;

    /// Insert a course. Duplicate slugs raise [`StoreError::Conflict`].
    async fn insert_course(&self, course: &Course) -> Result<(), StoreError>;

    /// Replace the editable fields of a course.
    async fn update_course(&self, course: &Course) -> Result<(), StoreError>;

    /// Set `published` only.
    async fn set_course_published(
        &self,
        id: &CourseId,
        published: bool,
    ) -> Result<Option<Course>, StoreError>;

    /// Modules of a course ordered by position.
    async fn list_modules(&self, course: &CourseId) -> Result<Vec<CourseModule>, StoreError>;

    /// Fetch a module by id.
    async fn find_module(&self, id: &ModuleId) -> Result<Option<CourseModule>, StoreError>;

    /// Insert a module.
    async fn insert_module(&self, module: &CourseModule) -> Result<(), StoreError>;

    /// Lessons belonging to any of `modules`, ordered by position.
    async fn list_lessons(&self, modules: &[ModuleId]) -> Result<Vec<Lesson>, StoreError>;

    /// Fetch a lesson by id.
    async fn find_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, StoreError>;

    /// Insert a lesson.
    async fn insert_lesson(&self, lesson: &Lesson) -> Result<(), StoreError>;
}
