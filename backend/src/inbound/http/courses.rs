//! Public course catalogue handlers.
//!
//! ```text
//! GET /api/v1/courses
//! GET /api/v1/courses/{slug}
//! GET /api/v1/lessons/{id}
//! ```
//!
//! Text is rendered in the negotiated [`RequestLanguage`].

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, Course, CourseOutline, Language, LessonDetail, LessonId, OutlineModule,
};
use crate::inbound::http::assessments::McqPromptResponse;
use crate::inbound::http::language::RequestLanguage;
use crate::inbound::http::resources::ResourceResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Course card in the catalogue listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummaryResponse {
    pub id: String,
    #[schema(example = "earthquake-preparedness")]
    pub slug: String,
    pub title: String,
    pub description: String,
    #[schema(example = "beginner")]
    pub level: String,
}

impl CourseSummaryResponse {
    fn render(course: &Course, language: Language) -> Self {
        Self {
            id: course.id.to_string(),
            slug: course.slug.clone(),
            title: course.title.resolve(language).to_owned(),
            description: course.description.resolve(language).to_owned(),
            level: course.level.as_str().to_owned(),
        }
    }
}

/// Lesson entry of a course outline.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutlineLessonResponse {
    pub id: String,
    pub title: String,
    pub position: i32,
}

/// Module of a course outline with its lessons in order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutlineModuleResponse {
    pub id: String,
    pub title: String,
    pub position: i32,
    pub lessons: Vec<OutlineLessonResponse>,
}

impl OutlineModuleResponse {
    fn render(entry: &OutlineModule, language: Language) -> Self {
        Self {
            id: entry.module.id.to_string(),
            title: entry.module.title.resolve(language).to_owned(),
            position: entry.module.position,
            lessons: entry
                .lessons
                .iter()
                .map(|lesson| OutlineLessonResponse {
                    id: lesson.id.to_string(),
                    title: lesson.title.resolve(language).to_owned(),
                    position: lesson.position,
                })
                .collect(),
        }
    }
}

/// Course page: the course and its ordered modules.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseOutlineResponse {
    pub course: CourseSummaryResponse,
    pub modules: Vec<OutlineModuleResponse>,
}

impl CourseOutlineResponse {
    fn render(outline: &CourseOutline, language: Language) -> Self {
        Self {
            course: CourseSummaryResponse::render(&outline.course, language),
            modules: outline
                .modules
                .iter()
                .map(|entry| OutlineModuleResponse::render(entry, language))
                .collect(),
        }
    }
}

/// Lesson viewer payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub id: String,
    pub course_slug: String,
    pub course_title: String,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    /// Warm-up questions, without answer keys.
    pub introductory: Vec<McqPromptResponse>,
    pub resources: Vec<ResourceResponse>,
    pub previous_lesson_id: Option<String>,
    pub next_lesson_id: Option<String>,
}

impl LessonResponse {
    fn render(detail: &LessonDetail, language: Language) -> Self {
        let lesson = &detail.lesson;
        Self {
            id: lesson.id.to_string(),
            course_slug: detail.course.slug.clone(),
            course_title: detail.course.title.resolve(language).to_owned(),
            title: lesson.title.resolve(language).to_owned(),
            content: lesson.content.resolve(language).to_owned(),
            video_url: lesson.video_url.clone(),
            introductory: detail
                .introductory
                .iter()
                .map(|mcq| McqPromptResponse::from(mcq.prompt(language)))
                .collect(),
            resources: detail
                .resources
                .iter()
                .map(|resource| ResourceResponse::render(resource, language))
                .collect(),
            previous_lesson_id: detail.neighbours.previous.map(|id| id.to_string()),
            next_lesson_id: detail.neighbours.next.map(|id| id.to_string()),
        }
    }
}

/// Published courses, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(("lang" = Option<String>, Query, description = "`en` or `ne`")),
    responses(
        (status = 200, description = "Published courses", body = [CourseSummaryResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
) -> ApiResult<web::Json<Vec<CourseSummaryResponse>>> {
    let courses = state.catalogue.list_published().await?;
    Ok(web::Json(
        courses
            .iter()
            .map(|course| CourseSummaryResponse::render(course, language))
            .collect(),
    ))
}

/// Outline of a published course.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{slug}",
    params(
        ("slug" = String, Path, description = "Course slug"),
        ("lang" = Option<String>, Query, description = "`en` or `ne`")
    ),
    responses(
        (status = 200, description = "Course outline", body = CourseOutlineResponse),
        (status = 404, description = "Unknown or unpublished course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseOutline",
    security([])
)]
#[get("/courses/{slug}")]
pub async fn course_outline(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseOutlineResponse>> {
    let outline = state.catalogue.course_outline(path.as_str()).await?;
    Ok(web::Json(CourseOutlineResponse::render(&outline, language)))
}

/// Lesson with warm-up questions, resources and navigation.
#[utoipa::path(
    get,
    path = "/api/v1/lessons/{id}",
    params(
        ("id" = String, Path, description = "Lesson id"),
        ("lang" = Option<String>, Query, description = "`en` or `ne`")
    ),
    responses(
        (status = 200, description = "Lesson", body = LessonResponse),
        (status = 400, description = "Invalid lesson id", body = ErrorSchema),
        (status = 404, description = "Unknown lesson or unpublished course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "lessonDetail",
    security([])
)]
#[get("/lessons/{id}")]
pub async fn lesson_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    RequestLanguage(language): RequestLanguage,
    path: web::Path<String>,
) -> ApiResult<web::Json<LessonResponse>> {
    let lesson_id: LessonId = parse_id(path.as_str(), FieldName::new("id"))?;
    let detail = state
        .catalogue
        .lesson_detail(&lesson_id, session.user_id()?)
        .await?;
    Ok(web::Json(LessonResponse::render(&detail, language)))
}
