//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound handler, the error envelope schemas and
//! the session cookie security scheme. Request and response bodies named by
//! the handlers are collected automatically. Swagger UI serves the document in
//! debug builds and `openapi-dump` prints it for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login or /api/v1/auth/signup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "EduWarn Nepal API",
        description = "Bilingual disaster-preparedness learning platform: courses, \
                       assessments, EduCoins, community, public forms and administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::sign_up,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_profile,
        crate::inbound::http::accounts::update_language,
        crate::inbound::http::accounts::coin_balance,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::course_outline,
        crate::inbound::http::courses::lesson_detail,
        crate::inbound::http::assessments::assessment_questions,
        crate::inbound::http::assessments::submit_assessment,
        crate::inbound::http::assessments::answer_mcq,
        crate::inbound::http::resources::list_resources,
        crate::inbound::http::resources::download_resource,
        crate::inbound::http::forum::list_categories,
        crate::inbound::http::forum::list_threads,
        crate::inbound::http::forum::create_thread,
        crate::inbound::http::forum::thread_detail,
        crate::inbound::http::forum::reply,
        crate::inbound::http::blog::list_articles,
        crate::inbound::http::blog::article_by_slug,
        crate::inbound::http::forms::donate,
        crate::inbound::http::forms::apply_for_partnership,
        crate::inbound::http::forms::contact,
        crate::inbound::http::forms::apply_as_mentor,
        crate::inbound::http::content::testimonials,
        crate::inbound::http::content::statistics,
        crate::inbound::http::content::quote_of_the_day,
        crate::inbound::http::admin::catalogue::admin_list_courses,
        crate::inbound::http::admin::catalogue::admin_create_course,
        crate::inbound::http::admin::catalogue::admin_update_course,
        crate::inbound::http::admin::catalogue::admin_toggle_course,
        crate::inbound::http::admin::catalogue::admin_create_module,
        crate::inbound::http::admin::catalogue::admin_create_lesson,
        crate::inbound::http::admin::catalogue::admin_create_mcq,
        crate::inbound::http::admin::catalogue::admin_create_resource,
        crate::inbound::http::admin::catalogue::admin_delete_resource,
        crate::inbound::http::admin::users::admin_list_users,
        crate::inbound::http::admin::users::admin_set_approval,
        crate::inbound::http::admin::users::admin_change_role,
        crate::inbound::http::admin::community::admin_toggle_pin,
        crate::inbound::http::admin::community::admin_toggle_lock,
        crate::inbound::http::admin::community::admin_delete_post,
        crate::inbound::http::admin::community::admin_list_articles,
        crate::inbound::http::admin::community::admin_create_article,
        crate::inbound::http::admin::community::admin_toggle_article,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "accounts", description = "Sign-up, sessions, language and EduCoin balance"),
        (name = "courses", description = "Published courses and lessons"),
        (name = "assessments", description = "Lesson assessments and warm-up questions"),
        (name = "resources", description = "Downloadable learning resources"),
        (name = "forum", description = "Community forum"),
        (name = "blog", description = "Published articles"),
        (name = "forms", description = "Donations, partnerships, contact and mentors"),
        (name = "content", description = "Testimonials, statistics and quotes"),
        (name = "admin", description = "Administration for approved staff"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
