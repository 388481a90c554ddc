//! HTTP inbound adapter exposing the `/api/v1` REST endpoints.

use actix_web::web;

pub mod accounts;
pub mod admin;
pub mod assessments;
pub mod blog;
pub mod content;
pub mod courses;
pub mod error;
pub mod forms;
pub mod forum;
pub mod health;
pub mod language;
pub mod resources;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

/// Register every `/api/v1` route and the extractor error envelopes.
///
/// The caller provides the scope, the session middleware and
/// `web::Data<HttpState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(accounts::sign_up)
        .service(accounts::login)
        .service(accounts::logout)
        .service(accounts::current_profile)
        .service(accounts::update_language)
        .service(accounts::coin_balance)
        .service(courses::list_courses)
        .service(courses::course_outline)
        .service(assessments::assessment_questions)
        .service(assessments::submit_assessment)
        .service(courses::lesson_detail)
        .service(assessments::answer_mcq)
        .service(resources::list_resources)
        .service(resources::download_resource)
        .service(forum::list_categories)
        .service(forum::list_threads)
        .service(forum::create_thread)
        .service(forum::thread_detail)
        .service(forum::reply)
        .service(blog::list_articles)
        .service(blog::article_by_slug)
        .service(forms::donate)
        .service(forms::apply_for_partnership)
        .service(forms::contact)
        .service(forms::apply_as_mentor)
        .service(content::testimonials)
        .service(content::statistics)
        .service(content::quote_of_the_day)
        .service(web::scope("/admin").configure(admin::configure));
}
