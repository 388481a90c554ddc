//! Back-office operations for courses, users and resources.
//!
//! Callers must pass the matching [`super::RoleGate`] check first.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use super::ports::{AssessmentRepository, CatalogueRepository, ProfileRepository, ResourceRepository};
use super::{
    Course, CourseForm, CourseId, CourseModule, Error, Lesson, LessonForm, LessonId, Mcq, McqForm,
    McqId, ModuleForm, ModuleId, Profile, Resource, ResourceForm, ResourceId, Role, UserId,
};

/// Administrative writes.
#[derive(Clone)]
pub struct AdminService {
    profiles: Arc<dyn ProfileRepository>,
    catalogue: Arc<dyn CatalogueRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    resources: Arc<dyn ResourceRepository>,
    clock: Arc<dyn Clock>,
}

fn next_position(existing: usize) -> i32 {
    i32::try_from(existing).map_or(i32::MAX, |count| count.saturating_add(1))
}

impl AdminService {
    /// Create the service.
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        catalogue: Arc<dyn CatalogueRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        resources: Arc<dyn ResourceRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            catalogue,
            assessments,
            resources,
            clock,
        }
    }

    /// Every course including drafts.
    pub async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        Ok(self.catalogue.list_courses(true).await?)
    }

    /// Create an unpublished course owned by `creator`.
    pub async fn create_course(&self, creator: UserId, form: &CourseForm) -> Result<Course, Error> {
        let draft = form.validate()?;
        let course = Course {
            id: CourseId::random(),
            slug: draft.slug,
            title: draft.title,
            description: draft.description,
            level: draft.level,
            published: false,
            created_by: Some(creator),
            created_at: self.clock.utc(),
        };
        self.catalogue.insert_course(&course).await?;
        info!(course_id = %course.id, slug = %course.slug, %creator, "course created");
        Ok(course)
    }

    /// Replace the editable fields of a course; publication is unchanged.
    pub async fn update_course(&self, id: &CourseId, form: &CourseForm) -> Result<Course, Error> {
        let draft = form.validate()?;
        let mut course = self.require_course(id).await?;
        course.slug = draft.slug;
        course.title = draft.title;
        course.description = draft.description;
        course.level = draft.level;
        self.catalogue.update_course(&course).await?;
        info!(course_id = %id, "course updated");
        Ok(course)
    }

    /// Flip `published` on a course.
    pub async fn toggle_course_published(&self, id: &CourseId) -> Result<Course, Error> {
        let current = self.require_course(id).await?;
        let updated = self
            .catalogue
            .set_course_published(id, !current.published)
            .await?
            .ok_or_else(|| Error::not_found(format!("course {id} not found")))?;
        info!(course_id = %id, published = updated.published, "course publication toggled");
        Ok(updated)
    }

    /// Append a module to a course.
    pub async fn create_module(
        &self,
        course_id: &CourseId,
        form: ModuleForm,
    ) -> Result<CourseModule, Error> {
        let course = self.require_course(course_id).await?;
        let existing = self.catalogue.list_modules(&course.id).await?;
        let module = form.into_module(ModuleId::random(), course.id, next_position(existing.len()))?;
        self.catalogue.insert_module(&module).await?;
        info!(module_id = %module.id, %course_id, "module created");
        Ok(module)
    }

    /// Append a lesson to a module.
    pub async fn create_lesson(
        &self,
        module_id: &ModuleId,
        form: LessonForm,
    ) -> Result<Lesson, Error> {
        let module = self
            .catalogue
            .find_module(module_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("module {module_id} not found")))?;
        let existing = self.catalogue.list_lessons(&[module.id]).await?;
        let lesson = form.into_lesson(LessonId::random(), module.id, next_position(existing.len()))?;
        self.catalogue.insert_lesson(&lesson).await?;
        info!(lesson_id = %lesson.id, %module_id, "lesson created");
        Ok(lesson)
    }

    /// Add a question to a lesson.
    pub async fn create_mcq(&self, lesson_id: &LessonId, form: McqForm) -> Result<Mcq, Error> {
        let lesson = self.require_lesson(lesson_id).await?;
        let existing = self.assessments.list_mcqs(&lesson.id).await?;
        let mcq = form.into_mcq(McqId::random(), lesson.id, next_position(existing.len()))?;
        self.assessments.insert_mcq(&mcq).await?;
        info!(mcq_id = %mcq.id, %lesson_id, kind = mcq.kind.as_str(), "question created");
        Ok(mcq)
    }

    /// One page of profiles, newest first.
    pub async fn list_users(&self, page: &PageRequest) -> Result<Page<Profile>, Error> {
        let rows = self.profiles.list(page).await?;
        Ok(Page::from_overfetch(rows, page))
    }

    /// Set `role_approved`, or flip it when `approved` is `None`.
    pub async fn set_approval(
        &self,
        user_id: &UserId,
        approved: Option<bool>,
    ) -> Result<Profile, Error> {
        let approved = match approved {
            Some(value) => value,
            None => !self.require_profile(user_id).await?.role_approved,
        };
        let profile = self
            .profiles
            .set_role_approved(user_id, approved)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;
        info!(%user_id, approved, "role approval changed");
        Ok(profile)
    }

    /// Change a user's role. Approval is left as it is.
    pub async fn change_role(&self, user_id: &UserId, role: Role) -> Result<Profile, Error> {
        let profile = self
            .profiles
            .set_role(user_id, role)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;
        info!(%user_id, role = role.as_str(), "role changed");
        Ok(profile)
    }

    /// Create a resource, optionally attached to an existing lesson.
    pub async fn create_resource(&self, form: ResourceForm) -> Result<Resource, Error> {
        if let Some(lesson_id) = form.lesson_id {
            self.require_lesson(&lesson_id).await?;
        }
        let resource = form.into_resource(ResourceId::random(), self.clock.utc())?;
        self.resources.insert(&resource).await?;
        info!(resource_id = %resource.id, "resource created");
        Ok(resource)
    }

    /// Delete a resource.
    pub async fn delete_resource(&self, id: &ResourceId) -> Result<(), Error> {
        if self.resources.delete(id).await? {
            info!(resource_id = %id, "resource deleted");
            Ok(())
        } else {
            Err(Error::not_found(format!("resource {id} not found")))
        }
    }

    async fn require_course(&self, id: &CourseId) -> Result<Course, Error> {
        self.catalogue
            .find_course(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("course {id} not found")))
    }

    async fn require_lesson(&self, id: &LessonId) -> Result<Lesson, Error> {
        self.catalogue
            .find_lesson(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("lesson {id} not found")))
    }

    async fn require_profile(&self, id: &UserId) -> Result<Profile, Error> {
        self.profiles
            .find(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}
