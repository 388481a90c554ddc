//! Course listing, outlines and the lesson viewer.

use std::sync::Arc;

use tracing::debug;

use super::ports::{AssessmentRepository, CatalogueRepository, ResourceRepository};
use super::{
    Course, CourseOutline, Error, Lesson, LessonId, LessonNeighbours, LearningEventKind,
    LearningEventRecorder, Mcq, McqKind, Resource, UserId,
};

/// Everything the lesson viewer shows for one lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDetail {
    pub course: Course,
    pub lesson: Lesson,
    /// Introductory questions; answer keys are stripped by the view layer.
    pub introductory: Vec<Mcq>,
    pub resources: Vec<Resource>,
    pub neighbours: LessonNeighbours,
}

/// Read side of the course catalogue.
#[derive(Clone)]
pub struct CatalogueService {
    catalogue: Arc<dyn CatalogueRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    resources: Arc<dyn ResourceRepository>,
    events: LearningEventRecorder,
}

impl CatalogueService {
    /// Create the service.
    pub fn new(
        catalogue: Arc<dyn CatalogueRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        resources: Arc<dyn ResourceRepository>,
        events: LearningEventRecorder,
    ) -> Self {
        Self {
            catalogue,
            assessments,
            resources,
            events,
        }
    }

    /// Published courses, newest first.
    pub async fn list_published(&self) -> Result<Vec<Course>, Error> {
        Ok(self.catalogue.list_courses(false).await?)
    }

    /// Outline of a published course.
    pub async fn course_outline(&self, slug: &str) -> Result<CourseOutline, Error> {
        let course = self
            .catalogue
            .find_course_by_slug(slug)
            .await?
            .filter(|course| course.published)
            .ok_or_else(|| Error::not_found(format!("course {slug} not found")))?;
        self.outline_for(course).await
    }

    /// Lesson detail for the viewer. Signed-in viewers get a
    /// `lesson_viewed` event.
    pub async fn lesson_detail(
        &self,
        lesson_id: &LessonId,
        viewer: Option<UserId>,
    ) -> Result<LessonDetail, Error> {
        let lesson = self
            .catalogue
            .find_lesson(lesson_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("lesson {lesson_id} not found")))?;
        let outline = self.published_outline_of(&lesson).await?;
        let neighbours = outline
            .neighbours(lesson.id)
            .ok_or_else(|| Error::internal("lesson missing from its course outline"))?;
        let introductory = self
            .assessments
            .list_mcqs(lesson_id)
            .await?
            .into_iter()
            .filter(|mcq| mcq.kind == McqKind::Introductory)
            .collect();
        let resources = self.resources.list_for_lesson(lesson_id).await?;

        if let Some(user_id) = viewer {
            self.events
                .record(
                    user_id,
                    LearningEventKind::LessonViewed,
                    *lesson.id.as_uuid(),
                    None,
                )
                .await;
        }

        Ok(LessonDetail {
            course: outline.course,
            lesson,
            introductory,
            resources,
            neighbours,
        })
    }

    /// Outline of the published course that contains `lesson`.
    pub(crate) async fn published_outline_of(&self, lesson: &Lesson) -> Result<CourseOutline, Error> {
        let module = self
            .catalogue
            .find_module(&lesson.module_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("lesson {} not found", lesson.id)))?;
        let course = self
            .catalogue
            .find_course(&module.course_id)
            .await?
            .filter(|course| course.published)
            .ok_or_else(|| Error::not_found(format!("lesson {} not found", lesson.id)))?;
        self.outline_for(course).await
    }

    async fn outline_for(&self, course: Course) -> Result<CourseOutline, Error> {
        let modules = self.catalogue.list_modules(&course.id).await?;
        let module_ids: Vec<_> = modules.iter().map(|module| module.id).collect();
        let lessons = if module_ids.is_empty() {
            Vec::new()
        } else {
            self.catalogue.list_lessons(&module_ids).await?
        };
        debug!(course = %course.slug, modules = modules.len(), lessons = lessons.len(), "outline loaded");
        Ok(CourseOutline::assemble(course, modules, lessons))
    }
}
