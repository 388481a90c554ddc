//! Forum moderation and blog authoring.
//!
//! ```text
//! POST   /api/v1/admin/forum/threads/{id}/pin
//! POST   /api/v1/admin/forum/threads/{id}/lock
//! DELETE /api/v1/admin/forum/posts/{id}
//! GET    /api/v1/admin/blog
//! POST   /api/v1/admin/blog
//! POST   /api/v1/admin/blog/{id}/publish
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{LocalizedTextResponse, require_admin};
use crate::domain::{
    ApiResult, ArticleForm, ArticleId, BlogArticle, PostId, ThreadFlag, ThreadId,
};
use crate::inbound::http::forum::ThreadResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Article fields; English title, summary and body are required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ArticleRequest {
    #[schema(example = "monsoon-landslide-signs")]
    pub slug: String,
    pub title_en: String,
    pub title_ne: Option<String>,
    pub summary_en: String,
    pub summary_ne: Option<String>,
    pub body_en: String,
    pub body_ne: Option<String>,
    pub cover_image_url: Option<String>,
}

impl From<ArticleRequest> for ArticleForm {
    fn from(value: ArticleRequest) -> Self {
        Self {
            slug: value.slug,
            title_en: value.title_en,
            title_ne: value.title_ne,
            summary_en: value.summary_en,
            summary_ne: value.summary_ne,
            body_en: value.body_en,
            body_ne: value.body_ne,
            cover_image_url: value.cover_image_url,
        }
    }
}

/// Article including drafts, in both languages.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminArticleResponse {
    pub id: String,
    pub slug: String,
    pub title: LocalizedTextResponse,
    pub summary: LocalizedTextResponse,
    pub body: LocalizedTextResponse,
    pub cover_image_url: Option<String>,
    pub author_id: Option<String>,
    pub published: bool,
    pub published_at: Option<String>,
    pub created_at: String,
}

impl From<BlogArticle> for AdminArticleResponse {
    fn from(value: BlogArticle) -> Self {
        Self {
            id: value.id.to_string(),
            title: (&value.title).into(),
            summary: (&value.summary).into(),
            body: (&value.body).into(),
            slug: value.slug,
            cover_image_url: value.cover_image_url,
            author_id: value.author_id.map(|id| id.to_string()),
            published: value.published,
            published_at: value.published_at.map(|at| at.to_rfc3339()),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

async fn toggle_thread(
    state: &HttpState,
    session: &SessionContext,
    raw_id: &str,
    flag: ThreadFlag,
) -> ApiResult<web::Json<ThreadResponse>> {
    require_admin(state, session).await?;
    let thread_id: ThreadId = parse_id(raw_id, FieldName::new("id"))?;
    let thread = state.forum.toggle_flag(&thread_id, flag).await?;
    Ok(web::Json(thread.into()))
}

/// Pin or unpin a thread.
#[utoipa::path(
    post,
    path = "/api/v1/admin/forum/threads/{id}/pin",
    params(("id" = String, Path, description = "Thread id")),
    responses(
        (status = 200, description = "Toggled", body = ThreadResponse),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown thread", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminTogglePin"
)]
#[post("/forum/threads/{id}/pin")]
pub async fn admin_toggle_pin(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ThreadResponse>> {
    toggle_thread(&state, &session, path.as_str(), ThreadFlag::Pinned).await
}

/// Lock or unlock a thread.
#[utoipa::path(
    post,
    path = "/api/v1/admin/forum/threads/{id}/lock",
    params(("id" = String, Path, description = "Thread id")),
    responses(
        (status = 200, description = "Toggled", body = ThreadResponse),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown thread", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminToggleLock"
)]
#[post("/forum/threads/{id}/lock")]
pub async fn admin_toggle_lock(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ThreadResponse>> {
    toggle_thread(&state, &session, path.as_str(), ThreadFlag::Locked).await
}

/// Delete a forum post.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/forum/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown post", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeletePost"
)]
#[delete("/forum/posts/{id}")]
pub async fn admin_delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let post_id: PostId = parse_id(path.as_str(), FieldName::new("id"))?;
    state.forum.delete_post(&post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Every article including drafts.
#[utoipa::path(
    get,
    path = "/api/v1/admin/blog",
    responses(
        (status = 200, description = "Articles", body = [AdminArticleResponse]),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListArticles"
)]
#[get("/blog")]
pub async fn admin_list_articles(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AdminArticleResponse>>> {
    require_admin(&state, &session).await?;
    let articles = state.blog.list_all().await?;
    Ok(web::Json(articles.into_iter().map(Into::into).collect()))
}

/// Store an unpublished draft.
#[utoipa::path(
    post,
    path = "/api/v1/admin/blog",
    request_body = ArticleRequest,
    responses(
        (status = 201, description = "Created", body = AdminArticleResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 409, description = "Slug taken", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateArticle"
)]
#[post("/blog")]
pub async fn admin_create_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ArticleRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = require_admin(&state, &session).await?;
    let form = ArticleForm::from(payload.into_inner());
    let article = state.blog.create_article(author_id, form).await?;
    Ok(HttpResponse::Created().json(AdminArticleResponse::from(article)))
}

/// Publish or unpublish an article.
#[utoipa::path(
    post,
    path = "/api/v1/admin/blog/{id}/publish",
    params(("id" = String, Path, description = "Article id")),
    responses(
        (status = 200, description = "Toggled", body = AdminArticleResponse),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown article", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminToggleArticle"
)]
#[post("/blog/{id}/publish")]
pub async fn admin_toggle_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AdminArticleResponse>> {
    require_admin(&state, &session).await?;
    let article_id: ArticleId = parse_id(path.as_str(), FieldName::new("id"))?;
    let article = state.blog.toggle_publication(&article_id).await?;
    Ok(web::Json(article.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    use crate::inbound::http::forum::{CategoryResponse, PostResponse};
    use crate::inbound::http::test_utils::{admin_cookie, demo_state, test_app};

    #[actix_web::test]
    async fn locking_blocks_replies_and_posts_can_be_removed() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let admin = admin_cookie(&app).await;
        let categories: Vec<CategoryResponse> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/v1/forum/categories").to_request(),
        )
        .await;
        let thread: ThreadResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/forum/threads")
                .cookie(admin.clone())
                .set_json(json!({
                    "categoryId": categories[0].id,
                    "title": "Drill schedule",
                    "body": "When is the next drill?",
                }))
                .to_request(),
        )
        .await;
        let post: PostResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/forum/threads/{}/posts", thread.id))
                .cookie(admin.clone())
                .set_json(json!({ "body": "Friday." }))
                .to_request(),
        )
        .await;

        let locked: ThreadResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/admin/forum/threads/{}/lock", thread.id))
                .cookie(admin.clone())
                .to_request(),
        )
        .await;
        assert!(locked.locked);
        assert!(!locked.pinned);

        let rejected = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/forum/threads/{}/posts", thread.id))
                .cookie(admin.clone())
                .set_json(json!({ "body": "Too late" }))
                .to_request(),
        )
        .await;
        assert_eq!(rejected.status(), StatusCode::CONFLICT);

        let deleted = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/v1/admin/forum/posts/{}", post.id))
                .cookie(admin)
                .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn drafts_stay_hidden_until_published() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let admin = admin_cookie(&app).await;

        let draft: AdminArticleResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/admin/blog")
                .cookie(admin.clone())
                .set_json(json!({
                    "slug": "go-bag-basics",
                    "titleEn": "Go-bag basics",
                    "summaryEn": "What to pack",
                    "bodyEn": "Water, torch, radio.",
                }))
                .to_request(),
        )
        .await;
        assert!(!draft.published);
        assert!(draft.published_at.is_none());

        let hidden = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/blog/go-bag-basics").to_request(),
        )
        .await;
        assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

        let published: AdminArticleResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/admin/blog/{}/publish", draft.id))
                .cookie(admin.clone())
                .to_request(),
        )
        .await;
        assert!(published.published);
        assert!(published.published_at.is_some());

        let all: Vec<Value> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/admin/blog")
                .cookie(admin)
                .to_request(),
        )
        .await;
        assert_eq!(all.len(), 2);

        let visible = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/blog/go-bag-basics").to_request(),
        )
        .await;
        assert_eq!(visible.status(), StatusCode::OK);
    }
}
