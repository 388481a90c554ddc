//! Home page content handlers.
//!
//! ```text
//! GET /api/v1/testimonials
//! GET /api/v1/statistics
//! GET /api/v1/quotes/today
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, Language, Quote, Statistic, Testimonial};
use crate::inbound::http::language::RequestLanguage;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Approved testimonial.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialResponse {
    pub author_name: String,
    pub author_role: String,
    pub quote: String,
}

impl TestimonialResponse {
    fn render(testimonial: &Testimonial, language: Language) -> Self {
        Self {
            author_name: testimonial.author_name.clone(),
            author_role: testimonial.author_role.resolve(language).to_owned(),
            quote: testimonial.quote.resolve(language).to_owned(),
        }
    }
}

/// Headline figure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatisticResponse {
    pub label: String,
    #[schema(example = "12,000+")]
    pub value: String,
}

impl StatisticResponse {
    fn render(statistic: &Statistic, language: Language) -> Self {
        Self {
            label: statistic.label.resolve(language).to_owned(),
            value: statistic.value.clone(),
        }
    }
}

/// Quote of the day.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub text: String,
    pub author: String,
}

impl QuoteResponse {
    fn render(quote: &Quote, language: Language) -> Self {
        Self {
            text: quote.text.resolve(language).to_owned(),
            author: quote.author.clone(),
        }
    }
}

/// Approved testimonials.
#[utoipa::path(
    get,
    path = "/api/v1/testimonials",
    params(("lang" = Option<String>, Query, description = "`en` or `ne`")),
    responses((status = 200, description = "Testimonials", body = [TestimonialResponse])),
    tags = ["content"],
    operation_id = "listTestimonials",
    security([])
)]
#[get("/testimonials")]
pub async fn testimonials(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
) -> ApiResult<web::Json<Vec<TestimonialResponse>>> {
    let rows = state.content.testimonials().await?;
    Ok(web::Json(
        rows.iter()
            .map(|row| TestimonialResponse::render(row, language))
            .collect(),
    ))
}

/// Headline statistics in display order.
#[utoipa::path(
    get,
    path = "/api/v1/statistics",
    params(("lang" = Option<String>, Query, description = "`en` or `ne`")),
    responses((status = 200, description = "Statistics", body = [StatisticResponse])),
    tags = ["content"],
    operation_id = "listStatistics",
    security([])
)]
#[get("/statistics")]
pub async fn statistics(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
) -> ApiResult<web::Json<Vec<StatisticResponse>>> {
    let rows = state.content.statistics().await?;
    Ok(web::Json(
        rows.iter()
            .map(|row| StatisticResponse::render(row, language))
            .collect(),
    ))
}

/// Quote chosen for today.
#[utoipa::path(
    get,
    path = "/api/v1/quotes/today",
    params(("lang" = Option<String>, Query, description = "`en` or `ne`")),
    responses(
        (status = 200, description = "Quote", body = QuoteResponse),
        (status = 404, description = "No quotes stored", body = ErrorSchema)
    ),
    tags = ["content"],
    operation_id = "quoteOfTheDay",
    security([])
)]
#[get("/quotes/today")]
pub async fn quote_of_the_day(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
) -> ApiResult<web::Json<QuoteResponse>> {
    let quote = state.content.quote_of_the_day().await?;
    Ok(web::Json(QuoteResponse::render(&quote, language)))
}
