//! Course structure and resource management.
//!
//! ```text
//! GET    /api/v1/admin/courses
//! POST   /api/v1/admin/courses
//! PUT    /api/v1/admin/courses/{id}
//! POST   /api/v1/admin/courses/{id}/publish
//! POST   /api/v1/admin/courses/{id}/modules
//! POST   /api/v1/admin/modules/{id}/lessons
//! POST   /api/v1/admin/lessons/{id}/mcqs
//! POST   /api/v1/admin/resources
//! DELETE /api/v1/admin/resources/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{LocalizedTextResponse, require_course_manager};
use crate::domain::{
    AnswerKey, ApiResult, Course, CourseForm, CourseId, CourseModule, Lesson, LessonForm,
    LessonId, Mcq, McqForm, McqKind, ModuleForm, ModuleId, Resource, ResourceForm, ResourceId,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Course fields; English title and description are required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseRequest {
    #[schema(example = "flood-safety")]
    pub slug: String,
    pub title_en: String,
    pub title_ne: Option<String>,
    pub description_en: String,
    pub description_ne: Option<String>,
    /// `beginner` (default), `intermediate` or `advanced`.
    pub level: Option<String>,
}

impl From<CourseRequest> for CourseForm {
    fn from(value: CourseRequest) -> Self {
        Self {
            slug: value.slug,
            title_en: value.title_en,
            title_ne: value.title_ne,
            description_en: value.description_en,
            description_ne: value.description_ne,
            level: value.level,
        }
    }
}

/// Course including drafts, in both languages.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCourseResponse {
    pub id: String,
    pub slug: String,
    pub title: LocalizedTextResponse,
    pub description: LocalizedTextResponse,
    pub level: String,
    pub published: bool,
    pub created_by: Option<String>,
    pub created_at: String,
}

impl From<Course> for AdminCourseResponse {
    fn from(value: Course) -> Self {
        Self {
            id: value.id.to_string(),
            title: (&value.title).into(),
            description: (&value.description).into(),
            slug: value.slug,
            level: value.level.as_str().to_owned(),
            published: value.published,
            created_by: value.created_by.map(|id| id.to_string()),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Module fields. Position defaults to the end of the course.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ModuleRequest {
    pub title_en: String,
    pub title_ne: Option<String>,
    pub position: Option<i32>,
}

/// Stored module.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminModuleResponse {
    pub id: String,
    pub course_id: String,
    pub title: LocalizedTextResponse,
    pub position: i32,
}

impl From<CourseModule> for AdminModuleResponse {
    fn from(value: CourseModule) -> Self {
        Self {
            id: value.id.to_string(),
            course_id: value.course_id.to_string(),
            title: (&value.title).into(),
            position: value.position,
        }
    }
}

/// Lesson fields. Position defaults to the end of the module.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LessonRequest {
    pub title_en: String,
    pub title_ne: Option<String>,
    pub content_en: String,
    pub content_ne: Option<String>,
    pub video_url: Option<String>,
    pub position: Option<i32>,
}

/// Stored lesson.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLessonResponse {
    pub id: String,
    pub module_id: String,
    pub title: LocalizedTextResponse,
    pub content: LocalizedTextResponse,
    pub video_url: Option<String>,
    pub position: i32,
}

impl From<Lesson> for AdminLessonResponse {
    fn from(value: Lesson) -> Self {
        Self {
            id: value.id.to_string(),
            module_id: value.module_id.to_string(),
            title: (&value.title).into(),
            content: (&value.content).into(),
            video_url: value.video_url,
            position: value.position,
        }
    }
}

/// Question fields. Exactly four English options are required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct McqRequest {
    pub question_en: String,
    pub question_ne: Option<String>,
    pub options_en: Vec<String>,
    pub options_ne: Option<Vec<String>>,
    /// `A` to `D`.
    pub correct: String,
    /// `assessment` (default) or `introductory`.
    pub kind: Option<String>,
    pub position: Option<i32>,
}

impl McqRequest {
    fn into_form(self) -> ApiResult<McqForm> {
        let correct = AnswerKey::parse("correct", &self.correct)?;
        let kind = McqKind::parse("kind", self.kind.as_deref())?;
        Ok(McqForm {
            question_en: self.question_en,
            question_ne: self.question_ne,
            options_en: self.options_en,
            options_ne: self.options_ne,
            correct,
            kind,
            position: self.position,
        })
    }
}

/// Stored question, answer key included.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminMcqResponse {
    pub id: String,
    pub lesson_id: String,
    pub question: LocalizedTextResponse,
    pub options: Vec<LocalizedTextResponse>,
    pub correct: String,
    pub kind: String,
    pub position: i32,
}

impl From<Mcq> for AdminMcqResponse {
    fn from(value: Mcq) -> Self {
        Self {
            id: value.id.to_string(),
            lesson_id: value.lesson_id.to_string(),
            question: (&value.question).into(),
            options: value.options.iter().map(Into::into).collect(),
            correct: value.correct.as_str().to_owned(),
            kind: value.kind.as_str().to_owned(),
            position: value.position,
        }
    }
}

/// Resource fields.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceRequest {
    pub title_en: String,
    pub title_ne: Option<String>,
    pub description_en: Option<String>,
    pub description_ne: Option<String>,
    pub file_url: String,
    /// Lesson to attach the resource to.
    pub lesson_id: Option<String>,
}

impl ResourceRequest {
    fn into_form(self) -> ApiResult<ResourceForm> {
        let lesson_id = self
            .lesson_id
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_id::<LessonId>(raw, FieldName::new("lessonId")))
            .transpose()?;
        Ok(ResourceForm {
            title_en: self.title_en,
            title_ne: self.title_ne,
            description_en: self.description_en,
            description_ne: self.description_ne,
            file_url: self.file_url,
            lesson_id,
        })
    }
}

/// Stored resource.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResourceResponse {
    pub id: String,
    pub title: LocalizedTextResponse,
    pub description: LocalizedTextResponse,
    pub file_url: String,
    pub lesson_id: Option<String>,
    pub created_at: String,
}

impl From<Resource> for AdminResourceResponse {
    fn from(value: Resource) -> Self {
        Self {
            id: value.id.to_string(),
            title: (&value.title).into(),
            description: (&value.description).into(),
            file_url: value.file_url,
            lesson_id: value.lesson_id.map(|id| id.to_string()),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Every course including drafts.
#[utoipa::path(
    get,
    path = "/api/v1/admin/courses",
    responses(
        (status = 200, description = "Courses", body = [AdminCourseResponse]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not a course manager", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListCourses"
)]
#[get("/courses")]
pub async fn admin_list_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AdminCourseResponse>>> {
    require_course_manager(&state, &session).await?;
    let courses = state.admin.list_courses().await?;
    Ok(web::Json(courses.into_iter().map(Into::into).collect()))
}

/// Create an unpublished course.
#[utoipa::path(
    post,
    path = "/api/v1/admin/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Created", body = AdminCourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a course manager", body = ErrorSchema),
        (status = 409, description = "Slug taken", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateCourse"
)]
#[post("/courses")]
pub async fn admin_create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let creator = require_course_manager(&state, &session).await?;
    let form = CourseForm::from(payload.into_inner());
    let course = state.admin.create_course(creator, &form).await?;
    Ok(HttpResponse::Created().json(AdminCourseResponse::from(course)))
}

/// Replace a course's editable fields.
#[utoipa::path(
    put,
    path = "/api/v1/admin/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Updated", body = AdminCourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a course manager", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateCourse"
)]
#[put("/courses/{id}")]
pub async fn admin_update_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<AdminCourseResponse>> {
    require_course_manager(&state, &session).await?;
    let course_id: CourseId = parse_id(path.as_str(), FieldName::new("id"))?;
    let form = CourseForm::from(payload.into_inner());
    let course = state.admin.update_course(&course_id, &form).await?;
    Ok(web::Json(course.into()))
}

/// Publish or unpublish a course.
#[utoipa::path(
    post,
    path = "/api/v1/admin/courses/{id}/publish",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Toggled", body = AdminCourseResponse),
        (status = 403, description = "Not a course manager", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminToggleCoursePublished"
)]
#[post("/courses/{id}/publish")]
pub async fn admin_toggle_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AdminCourseResponse>> {
    require_course_manager(&state, &session).await?;
    let course_id: CourseId = parse_id(path.as_str(), FieldName::new("id"))?;
    let course = state.admin.toggle_course_published(&course_id).await?;
    Ok(web::Json(course.into()))
}

/// Append a module to a course.
#[utoipa::path(
    post,
    path = "/api/v1/admin/courses/{id}/modules",
    params(("id" = String, Path, description = "Course id")),
    request_body = ModuleRequest,
    responses(
        (status = 201, description = "Created", body = AdminModuleResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateModule"
)]
#[post("/courses/{id}/modules")]
pub async fn admin_create_module(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ModuleRequest>,
) -> ApiResult<HttpResponse> {
    require_course_manager(&state, &session).await?;
    let course_id: CourseId = parse_id(path.as_str(), FieldName::new("id"))?;
    let ModuleRequest {
        title_en,
        title_ne,
        position,
    } = payload.into_inner();
    let module = state
        .admin
        .create_module(
            &course_id,
            ModuleForm {
                title_en,
                title_ne,
                position,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(AdminModuleResponse::from(module)))
}

/// Append a lesson to a module.
#[utoipa::path(
    post,
    path = "/api/v1/admin/modules/{id}/lessons",
    params(("id" = String, Path, description = "Module id")),
    request_body = LessonRequest,
    responses(
        (status = 201, description = "Created", body = AdminLessonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown module", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateLesson"
)]
#[post("/modules/{id}/lessons")]
pub async fn admin_create_lesson(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<LessonRequest>,
) -> ApiResult<HttpResponse> {
    require_course_manager(&state, &session).await?;
    let module_id: ModuleId = parse_id(path.as_str(), FieldName::new("id"))?;
    let request = payload.into_inner();
    let form = LessonForm {
        title_en: request.title_en,
        title_ne: request.title_ne,
        content_en: request.content_en,
        content_ne: request.content_ne,
        video_url: request.video_url,
        position: request.position,
    };
    let lesson = state.admin.create_lesson(&module_id, form).await?;
    Ok(HttpResponse::Created().json(AdminLessonResponse::from(lesson)))
}

/// Add a question to a lesson.
#[utoipa::path(
    post,
    path = "/api/v1/admin/lessons/{id}/mcqs",
    params(("id" = String, Path, description = "Lesson id")),
    request_body = McqRequest,
    responses(
        (status = 201, description = "Created", body = AdminMcqResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown lesson", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateMcq"
)]
#[post("/lessons/{id}/mcqs")]
pub async fn admin_create_mcq(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<McqRequest>,
) -> ApiResult<HttpResponse> {
    require_course_manager(&state, &session).await?;
    let lesson_id: LessonId = parse_id(path.as_str(), FieldName::new("id"))?;
    let form = payload.into_inner().into_form()?;
    let mcq = state.admin.create_mcq(&lesson_id, form).await?;
    Ok(HttpResponse::Created().json(AdminMcqResponse::from(mcq)))
}

/// Add a resource, optionally attached to a lesson.
#[utoipa::path(
    post,
    path = "/api/v1/admin/resources",
    request_body = ResourceRequest,
    responses(
        (status = 201, description = "Created", body = AdminResourceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown lesson", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateResource"
)]
#[post("/resources")]
pub async fn admin_create_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ResourceRequest>,
) -> ApiResult<HttpResponse> {
    require_course_manager(&state, &session).await?;
    let form = payload.into_inner().into_form()?;
    let resource = state.admin.create_resource(form).await?;
    Ok(HttpResponse::Created().json(AdminResourceResponse::from(resource)))
}

/// Delete a resource.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/resources/{id}",
    params(("id" = String, Path, description = "Resource id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown resource", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteResource"
)]
#[delete("/resources/{id}")]
pub async fn admin_delete_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    require_course_manager(&state, &session).await?;
    let resource_id: ResourceId = parse_id(path.as_str(), FieldName::new("id"))?;
    state.admin.delete_resource(&resource_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
