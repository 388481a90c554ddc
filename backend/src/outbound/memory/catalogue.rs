//! Courses, lessons, questions and resources.

use async_trait::async_trait;

use crate::domain::ports::{
    AssessmentRepository, CatalogueRepository, ResourceRepository, StoreError,
};
use crate::domain::{
    Course, CourseId, CourseModule, Lesson, LessonId, Mcq, McqAnswerRecord, McqId, ModuleId,
    Resource, ResourceId,
};

use super::InMemoryStore;

fn duplicate(kind: &str, id: impl std::fmt::Display) -> StoreError {
    StoreError::conflict(format!("{kind} {id} already exists"))
}

#[async_trait]
impl CatalogueRepository for InMemoryStore {
    async fn list_courses(&self, include_unpublished: bool) -> Result<Vec<Course>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<Course> = tables
            .courses
            .iter()
            .filter(|course| include_unpublished || course.published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_course_by_slug(&self, slug: &str) -> Result<Option<Course>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.courses.iter().find(|row| row.slug == slug).cloned())
    }

    async fn find_course(&self, id: &CourseId) -> Result<Option<Course>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.courses.iter().find(|row| row.id == *id).cloned())
    }

    async fn insert_course(&self, course: &Course) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables
            .courses
            .iter()
            .any(|row| row.id == course.id || row.slug == course.slug)
        {
            return Err(duplicate("course", &course.slug));
        }
        tables.courses.push(course.clone());
        Ok(())
    }

    async fn update_course(&self, course: &Course) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables
            .courses
            .iter()
            .any(|row| row.id != course.id && row.slug == course.slug)
        {
            return Err(duplicate("course", &course.slug));
        }
        let row = tables
            .courses
            .iter_mut()
            .find(|row| row.id == course.id)
            .ok_or_else(|| StoreError::not_found(format!("course {} not found", course.id)))?;
        *row = course.clone();
        Ok(())
    }

    async fn set_course_published(
        &self,
        id: &CourseId,
        published: bool,
    ) -> Result<Option<Course>, StoreError> {
        let mut tables = self.lock()?;
        Ok(tables
            .courses
            .iter_mut()
            .find(|row| row.id == *id)
            .map(|row| {
                row.published = published;
                row.clone()
            }))
    }

    async fn list_modules(&self, course: &CourseId) -> Result<Vec<CourseModule>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<CourseModule> = tables
            .modules
            .iter()
            .filter(|row| row.course_id == *course)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.position);
        Ok(rows)
    }

    async fn find_module(&self, id: &ModuleId) -> Result<Option<CourseModule>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.modules.iter().find(|row| row.id == *id).cloned())
    }

    async fn insert_module(&self, module: &CourseModule) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.modules.iter().any(|row| row.id == module.id) {
            return Err(duplicate("module", module.id));
        }
        tables.modules.push(module.clone());
        Ok(())
    }

    async fn list_lessons(&self, modules: &[ModuleId]) -> Result<Vec<Lesson>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<Lesson> = tables
            .lessons
            .iter()
            .filter(|row| modules.contains(&row.module_id))
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.position);
        Ok(rows)
    }

    async fn find_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.lessons.iter().find(|row| row.id == *id).cloned())
    }

    async fn insert_lesson(&self, lesson: &Lesson) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.lessons.iter().any(|row| row.id == lesson.id) {
            return Err(duplicate("lesson", lesson.id));
        }
        tables.lessons.push(lesson.clone());
        Ok(())
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryStore {
    async fn list_mcqs(&self, lesson: &LessonId) -> Result<Vec<Mcq>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<Mcq> = tables
            .mcqs
            .iter()
            .filter(|row| row.lesson_id == *lesson)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.position);
        Ok(rows)
    }

    async fn find_mcq(&self, id: &McqId) -> Result<Option<Mcq>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.mcqs.iter().find(|row| row.id == *id).cloned())
    }

    async fn insert_mcq(&self, mcq: &Mcq) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.mcqs.iter().any(|row| row.id == mcq.id) {
            return Err(duplicate("question", mcq.id));
        }
        tables.mcqs.push(mcq.clone());
        Ok(())
    }

    async fn insert_answers(&self, answers: &[McqAnswerRecord]) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables.answers.extend_from_slice(answers);
        Ok(())
    }
}

#[async_trait]
impl ResourceRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Resource>, StoreError> {
        let tables = self.lock()?;
        let mut rows = tables.resources.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_for_lesson(&self, lesson: &LessonId) -> Result<Vec<Resource>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<Resource> = tables
            .resources
            .iter()
            .filter(|row| row.lesson_id == Some(*lesson))
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.created_at);
        Ok(rows)
    }

    async fn find(&self, id: &ResourceId) -> Result<Option<Resource>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.resources.iter().find(|row| row.id == *id).cloned())
    }

    async fn insert(&self, resource: &Resource) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.resources.iter().any(|row| row.id == resource.id) {
            return Err(duplicate("resource", resource.id));
        }
        tables.resources.push(resource.clone());
        Ok(())
    }

    async fn delete(&self, id: &ResourceId) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.resources.len();
        tables.resources.retain(|row| row.id != *id);
        Ok(tables.resources.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocalizedText;
    use chrono::{Duration, Utc};

    fn course(slug: &str, published: bool, age_days: i64) -> Course {
        Course {
            id: CourseId::random(),
            slug: slug.to_owned(),
            title: LocalizedText::english(slug),
            description: LocalizedText::default(),
            level: crate::domain::CourseLevel::Beginner,
            published,
            created_by: None,
            created_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[tokio::test]
    async fn hides_unpublished_courses_unless_asked() {
        let store = InMemoryStore::new();
        store.insert_course(&course("floods", true, 2)).await.expect("insert");
        store.insert_course(&course("fires", false, 1)).await.expect("insert");

        let public = store.list_courses(false).await.expect("list");
        assert_eq!(public.len(), 1);
        let all = store.list_courses(true).await.expect("list");
        assert_eq!(all.first().map(|c| c.slug.as_str()), Some("fires"));
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts() {
        let store = InMemoryStore::new();
        store.insert_course(&course("floods", true, 0)).await.expect("insert");
        let error = store
            .insert_course(&course("floods", false, 0))
            .await
            .expect_err("duplicate");
        assert!(matches!(error, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went() {
        let store = InMemoryStore::new();
        let resource = Resource {
            id: ResourceId::random(),
            title: LocalizedText::english("Go-bag checklist"),
            description: LocalizedText::default(),
            file_url: "https://files.example.org/go-bag.pdf".to_owned(),
            lesson_id: None,
            created_at: Utc::now(),
        };
        ResourceRepository::insert(&store, &resource).await.expect("insert");
        assert!(store.delete(&resource.id).await.expect("delete"));
        assert!(!store.delete(&resource.id).await.expect("delete"));
    }
}
