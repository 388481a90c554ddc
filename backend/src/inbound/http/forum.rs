//! Discussion forum handlers.
//!
//! ```text
//! GET  /api/v1/forum/categories
//! GET  /api/v1/forum/categories/{id}/threads?limit=&cursor=
//! POST /api/v1/forum/threads
//! GET  /api/v1/forum/threads/{id}
//! POST /api/v1/forum/threads/{id}/posts
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, ForumCategory, ForumCategoryId, ForumPost, ForumThread, Language, NewThreadForm,
    ThreadDetail, ThreadId,
};
use crate::inbound::http::language::RequestLanguage;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, PageQuery, parse_id};

/// Forum category in the requested language.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub position: i32,
}

impl CategoryResponse {
    fn render(category: &ForumCategory, language: Language) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.resolve(language).to_owned(),
            description: category.description.resolve(language).to_owned(),
            position: category.position,
        }
    }
}

/// Forum thread.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub id: String,
    pub category_id: String,
    pub author_id: String,
    pub title: String,
    pub body: String,
    pub pinned: bool,
    pub locked: bool,
    pub created_at: String,
}

impl From<ForumThread> for ThreadResponse {
    fn from(value: ForumThread) -> Self {
        Self {
            id: value.id.to_string(),
            category_id: value.category_id.to_string(),
            author_id: value.author_id.to_string(),
            title: value.title,
            body: value.body,
            pinned: value.pinned,
            locked: value.locked,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Reply in a thread.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub thread_id: String,
    pub author_id: String,
    pub body: String,
    pub created_at: String,
}

impl From<ForumPost> for PostResponse {
    fn from(value: ForumPost) -> Self {
        Self {
            id: value.id.to_string(),
            thread_id: value.thread_id.to_string(),
            author_id: value.author_id.to_string(),
            body: value.body,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// One page of threads.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPage {
    pub items: Vec<ThreadResponse>,
    /// Pass as `cursor` to fetch the next page; absent on the last page.
    pub next_cursor: Option<String>,
}

/// Thread with its replies, oldest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDetailResponse {
    pub thread: ThreadResponse,
    pub posts: Vec<PostResponse>,
}

impl From<ThreadDetail> for ThreadDetailResponse {
    fn from(value: ThreadDetail) -> Self {
        Self {
            thread: value.thread.into(),
            posts: value.posts.into_iter().map(Into::into).collect(),
        }
    }
}

/// New thread payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NewThreadRequest {
    pub category_id: String,
    #[schema(example = "How do you store drinking water?")]
    pub title: String,
    pub body: String,
}

/// Reply payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ReplyRequest {
    pub body: String,
}

/// Categories ordered by position.
#[utoipa::path(
    get,
    path = "/api/v1/forum/categories",
    params(("lang" = Option<String>, Query, description = "`en` or `ne`")),
    responses((status = 200, description = "Categories", body = [CategoryResponse])),
    tags = ["forum"],
    operation_id = "listForumCategories",
    security([])
)]
#[get("/forum/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state.forum.list_categories().await?;
    Ok(web::Json(
        categories
            .iter()
            .map(|category| CategoryResponse::render(category, language))
            .collect(),
    ))
}

/// Threads of a category, pinned first then newest.
#[utoipa::path(
    get,
    path = "/api/v1/forum/categories/{id}/threads",
    params(("id" = String, Path, description = "Category id"), PageQuery),
    responses(
        (status = 200, description = "Threads", body = ThreadPage),
        (status = 400, description = "Invalid id or paging", body = ErrorSchema),
        (status = 404, description = "Unknown category", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "listForumThreads",
    security([])
)]
#[get("/forum/categories/{id}/threads")]
pub async fn list_threads(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<ThreadPage>> {
    let category_id: ForumCategoryId = parse_id(path.as_str(), FieldName::new("id"))?;
    let page = query.page_request()?;
    let (items, next_cursor) = state
        .forum
        .list_threads(&category_id, &page)
        .await?
        .map(ThreadResponse::from)
        .into_parts();
    Ok(web::Json(ThreadPage { items, next_cursor }))
}

/// Open a thread.
#[utoipa::path(
    post,
    path = "/api/v1/forum/threads",
    request_body = NewThreadRequest,
    responses(
        (status = 201, description = "Created", body = ThreadResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown category", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "createForumThread"
)]
#[post("/forum/threads")]
pub async fn create_thread(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewThreadRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let NewThreadRequest {
        category_id,
        title,
        body,
    } = payload.into_inner();
    let category_id: ForumCategoryId = parse_id(&category_id, FieldName::new("categoryId"))?;
    let thread = state
        .forum
        .create_thread(author_id, category_id, NewThreadForm { title, body })
        .await?;
    Ok(HttpResponse::Created().json(ThreadResponse::from(thread)))
}

/// Thread with replies.
#[utoipa::path(
    get,
    path = "/api/v1/forum/threads/{id}",
    params(("id" = String, Path, description = "Thread id")),
    responses(
        (status = 200, description = "Thread", body = ThreadDetailResponse),
        (status = 404, description = "Unknown thread", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "forumThreadDetail",
    security([])
)]
#[get("/forum/threads/{id}")]
pub async fn thread_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ThreadDetailResponse>> {
    let thread_id: ThreadId = parse_id(path.as_str(), FieldName::new("id"))?;
    let detail = state.forum.thread_detail(&thread_id).await?;
    Ok(web::Json(detail.into()))
}

/// Reply to an unlocked thread.
#[utoipa::path(
    post,
    path = "/api/v1/forum/threads/{id}/posts",
    params(("id" = String, Path, description = "Thread id")),
    request_body = ReplyRequest,
    responses(
        (status = 201, description = "Created", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown thread", body = ErrorSchema),
        (status = 409, description = "Thread locked", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "replyToForumThread"
)]
#[post("/forum/threads/{id}/posts")]
pub async fn reply(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReplyRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let thread_id: ThreadId = parse_id(path.as_str(), FieldName::new("id"))?;
    let post = state
        .forum
        .reply(author_id, &thread_id, &payload.body)
        .await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{admin_cookie, demo_state, test_app};

    #[actix_web::test]
    async fn thread_lifecycle() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let cookie = admin_cookie(&app).await;
        let categories: Vec<CategoryResponse> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/forum/categories?lang=ne")
                .to_request(),
        )
        .await;
        assert_eq!(categories[0].name, "पूर्वतयारी");
        let category = &categories[0].id;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/forum/threads")
                .cookie(cookie.clone())
                .set_json(json!({
                    "categoryId": category,
                    "title": "  Water storage ",
                    "body": "How many litres per person?",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let thread: ThreadResponse = test::read_body_json(res).await;
        assert_eq!(thread.title, "Water storage");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/forum/threads/{}/posts", thread.id))
                .cookie(cookie)
                .set_json(json!({ "body": "Four litres a day." }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let detail: ThreadDetailResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/forum/threads/{}", thread.id))
                .to_request(),
        )
        .await;
        assert_eq!(detail.posts.len(), 1);

        let page: ThreadPage = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/forum/categories/{category}/threads"))
                .to_request(),
        )
        .await;
        assert_eq!(page.items.len(), 1);
        assert!(page.next_cursor.is_none());
    }

    #[rstest]
    #[case("ab", "too_short")]
    #[case("   ", "missing_field")]
    #[actix_web::test]
    async fn thread_title_is_validated(#[case] title: &str, #[case] code: &str) {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let cookie = admin_cookie(&app).await;
        let categories: Vec<CategoryResponse> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/v1/forum/categories").to_request(),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/forum/threads")
                .cookie(cookie)
                .set_json(json!({
                    "categoryId": categories[0].id,
                    "title": title,
                    "body": "Body",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "title");
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn posting_requires_login() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/forum/threads")
                .set_json(json!({ "title": "Hello", "body": "World" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("?limit=0", "limit")]
    #[case("?cursor=!!!!", "cursor")]
    #[actix_web::test]
    async fn paging_parameters_are_validated(#[case] query: &str, #[case] field: &str) {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let categories: Vec<CategoryResponse> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/v1/forum/categories").to_request(),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!(
                    "/api/v1/forum/categories/{}/threads{query}",
                    categories[0].id
                ))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }
}
