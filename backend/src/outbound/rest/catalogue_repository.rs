//! `courses`, `modules` and `lessons` table adapter.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{CatalogueRepository, StoreError};
use crate::domain::{Course, CourseId, CourseModule, Lesson, LessonId, ModuleId};

use super::client::RestStoreClient;
use super::query::{Direction, TableQuery};
use super::rows::{CourseRow, LessonRow, ModuleRow};

const COURSES: &str = "courses";
const MODULES: &str = "modules";
const LESSONS: &str = "lessons";

/// Store-backed [`CatalogueRepository`].
#[derive(Debug, Clone)]
pub struct RestCatalogueRepository {
    client: RestStoreClient,
}

impl RestCatalogueRepository {
    /// Create a repository sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogueRepository for RestCatalogueRepository {
    async fn list_courses(&self, include_unpublished: bool) -> Result<Vec<Course>, StoreError> {
        let mut query = TableQuery::new().order("created_at", Direction::Desc);
        if !include_unpublished {
            query = query.eq("published", true);
        }
        let rows: Vec<CourseRow> = self.client.select(COURSES, &query).await?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn find_course_by_slug(&self, slug: &str) -> Result<Option<Course>, StoreError> {
        let row: Option<CourseRow> = self
            .client
            .select_one(COURSES, TableQuery::new().eq("slug", slug))
            .await?;
        Ok(row.map(Course::from))
    }

    async fn find_course(&self, id: &CourseId) -> Result<Option<Course>, StoreError> {
        let row: Option<CourseRow> = self
            .client
            .select_one(COURSES, TableQuery::new().eq("id", id))
            .await?;
        Ok(row.map(Course::from))
    }

    async fn insert_course(&self, course: &Course) -> Result<(), StoreError> {
        self.client.insert(COURSES, &CourseRow::from(course)).await
    }

    async fn update_course(&self, course: &Course) -> Result<(), StoreError> {
        let updated: Vec<CourseRow> = self
            .client
            .update(
                COURSES,
                &TableQuery::new().eq("id", course.id),
                &CourseRow::from(course),
            )
            .await?;
        if updated.is_empty() {
            return Err(StoreError::not_found(format!("course {} not found", course.id)));
        }
        Ok(())
    }

    async fn set_course_published(
        &self,
        id: &CourseId,
        published: bool,
    ) -> Result<Option<Course>, StoreError> {
        let rows: Vec<CourseRow> = self
            .client
            .update(
                COURSES,
                &TableQuery::new().eq("id", id),
                &json!({ "published": published }),
            )
            .await?;
        Ok(rows.into_iter().next().map(Course::from))
    }

    async fn list_modules(&self, course: &CourseId) -> Result<Vec<CourseModule>, StoreError> {
        let query = TableQuery::new()
            .eq("course_id", course)
            .order("position", Direction::Asc);
        let rows: Vec<ModuleRow> = self.client.select(MODULES, &query).await?;
        Ok(rows.into_iter().map(CourseModule::from).collect())
    }

    async fn find_module(&self, id: &ModuleId) -> Result<Option<CourseModule>, StoreError> {
        let row: Option<ModuleRow> = self
            .client
            .select_one(MODULES, TableQuery::new().eq("id", id))
            .await?;
        Ok(row.map(CourseModule::from))
    }

    async fn insert_module(&self, module: &CourseModule) -> Result<(), StoreError> {
        self.client.insert(MODULES, &ModuleRow::from(module)).await
    }

    async fn list_lessons(&self, modules: &[ModuleId]) -> Result<Vec<Lesson>, StoreError> {
        if modules.is_empty() {
            return Ok(Vec::new());
        }
        let query = TableQuery::new()
            .in_list("module_id", modules)
            .order("position", Direction::Asc);
        let rows: Vec<LessonRow> = self.client.select(LESSONS, &query).await?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    async fn find_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, StoreError> {
        let row: Option<LessonRow> = self
            .client
            .select_one(LESSONS, TableQuery::new().eq("id", id))
            .await?;
        Ok(row.map(Lesson::from))
    }

    async fn insert_lesson(&self, lesson: &Lesson) -> Result<(), StoreError> {
        self.client.insert(LESSONS, &LessonRow::from(lesson)).await
    }
}
