//! Public blog handlers.
//!
//! ```text
//! GET /api/v1/blog?limit=&cursor=
//! GET /api/v1/blog/{slug}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, BlogArticle, Language};
use crate::inbound::http::language::RequestLanguage;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::PageQuery;

/// Article card in the blog listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummaryResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub cover_image_url: Option<String>,
    pub published_at: Option<String>,
}

impl ArticleSummaryResponse {
    fn render(article: &BlogArticle, language: Language) -> Self {
        Self {
            id: article.id.to_string(),
            slug: article.slug.clone(),
            title: article.title.resolve(language).to_owned(),
            summary: article.summary.resolve(language).to_owned(),
            cover_image_url: article.cover_image_url.clone(),
            published_at: article.published_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// Full article.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    #[serde(flatten)]
    pub summary: ArticleSummaryResponse,
    pub body: String,
}

/// One page of published articles.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub items: Vec<ArticleSummaryResponse>,
    /// Pass as `cursor` to fetch the next page; absent on the last page.
    pub next_cursor: Option<String>,
}

/// Published articles, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/blog",
    params(PageQuery, ("lang" = Option<String>, Query, description = "`en` or `ne`")),
    responses(
        (status = 200, description = "Articles", body = ArticlePage),
        (status = 400, description = "Invalid paging", body = ErrorSchema)
    ),
    tags = ["blog"],
    operation_id = "listArticles",
    security([])
)]
#[get("/blog")]
pub async fn list_articles(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<ArticlePage>> {
    let page = query.page_request()?;
    let (items, next_cursor) = state
        .blog
        .list_published(&page)
        .await?
        .map(|article| ArticleSummaryResponse::render(&article, language))
        .into_parts();
    Ok(web::Json(ArticlePage { items, next_cursor }))
}

/// A published article.
#[utoipa::path(
    get,
    path = "/api/v1/blog/{slug}",
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("lang" = Option<String>, Query, description = "`en` or `ne`")
    ),
    responses(
        (status = 200, description = "Article", body = ArticleResponse),
        (status = 404, description = "Unknown or unpublished article", body = ErrorSchema)
    ),
    tags = ["blog"],
    operation_id = "articleBySlug",
    security([])
)]
#[get("/blog/{slug}")]
pub async fn article_by_slug(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
    path: web::Path<String>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let article = state.blog.find_published(path.as_str()).await?;
    Ok(web::Json(ArticleResponse {
        summary: ArticleSummaryResponse::render(&article, language),
        body: article.body.resolve(language).to_owned(),
    }))
}
