//! Resource library handlers.
//!
//! ```text
//! GET  /api/v1/resources[?lessonId=]
//! POST /api/v1/resources/{id}/download
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ApiResult, Download, Language, LessonId, Resource, ResourceId};
use crate::inbound::http::language::RequestLanguage;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Downloadable resource in the requested language.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub lesson_id: Option<String>,
    pub created_at: String,
}

impl ResourceResponse {
    pub(crate) fn render(resource: &Resource, language: Language) -> Self {
        Self {
            id: resource.id.to_string(),
            title: resource.title.resolve(language).to_owned(),
            description: resource.description.resolve(language).to_owned(),
            file_url: resource.file_url.clone(),
            lesson_id: resource.lesson_id.map(|id| id.to_string()),
            created_at: resource.created_at.to_rfc3339(),
        }
    }
}

/// Optional lesson filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ResourceQuery {
    /// Only resources attached to this lesson.
    pub lesson_id: Option<String>,
}

/// Download target and coins earned.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub file_url: String,
    /// Zero for anonymous downloads.
    pub coins_awarded: i64,
}

impl From<Download> for DownloadResponse {
    fn from(value: Download) -> Self {
        Self {
            file_url: value.file_url,
            coins_awarded: value.coins_awarded,
        }
    }
}

/// Resource library, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    params(
        ResourceQuery,
        ("lang" = Option<String>, Query, description = "`en` or `ne`")
    ),
    responses(
        (status = 200, description = "Resources", body = [ResourceResponse]),
        (status = 400, description = "Invalid lesson id", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "listResources",
    security([])
)]
#[get("/resources")]
pub async fn list_resources(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
    query: web::Query<ResourceQuery>,
) -> ApiResult<web::Json<Vec<ResourceResponse>>> {
    let resources = match query.lesson_id.as_deref() {
        Some(raw) => {
            let lesson_id: LessonId = parse_id(raw, FieldName::new("lessonId"))?;
            state.resources.list_for_lesson(&lesson_id).await?
        }
        None => state.resources.list().await?,
    };
    Ok(web::Json(
        resources
            .iter()
            .map(|resource| ResourceResponse::render(resource, language))
            .collect(),
    ))
}

/// Resolve a download. Signed-in users earn EduCoins.
#[utoipa::path(
    post,
    path = "/api/v1/resources/{id}/download",
    params(("id" = String, Path, description = "Resource id")),
    responses(
        (status = 200, description = "Download target", body = DownloadResponse),
        (status = 404, description = "Unknown resource", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "downloadResource"
)]
#[post("/resources/{id}/download")]
pub async fn download_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DownloadResponse>> {
    let resource_id: ResourceId = parse_id(path.as_str(), FieldName::new("id"))?;
    let download = state
        .resources
        .download(&resource_id, session.user_id()?)
        .await?;
    Ok(web::Json(download.into()))
}
