//! Back-office HTTP handlers mounted under `/api/v1/admin`.
//!
//! Course structure and resources need an approved teacher or admin. User
//! management, forum moderation and blog authoring need an approved admin.
//! Views here carry both languages so editors can see missing translations.

use actix_web::web;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, LocalizedText, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub mod catalogue;
pub mod community;
pub mod users;

/// English text with its optional Nepali translation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocalizedTextResponse {
    pub en: String,
    pub ne: Option<String>,
}

impl From<&LocalizedText> for LocalizedTextResponse {
    fn from(value: &LocalizedText) -> Self {
        Self {
            en: value.en().to_owned(),
            ne: value.ne().map(str::to_owned),
        }
    }
}

/// Signed-in approved admin.
pub(crate) async fn require_admin(
    state: &HttpState,
    session: &SessionContext,
) -> ApiResult<UserId> {
    let user_id = session.require_user_id()?;
    state.gate.require_admin(&user_id).await?;
    Ok(user_id)
}

/// Signed-in approved teacher or admin.
pub(crate) async fn require_course_manager(
    state: &HttpState,
    session: &SessionContext,
) -> ApiResult<UserId> {
    let user_id = session.require_user_id()?;
    state.gate.require_course_manager(&user_id).await?;
    Ok(user_id)
}

/// Register every admin route on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(catalogue::admin_list_courses)
        .service(catalogue::admin_create_course)
        .service(catalogue::admin_update_course)
        .service(catalogue::admin_toggle_course)
        .service(catalogue::admin_create_module)
        .service(catalogue::admin_create_lesson)
        .service(catalogue::admin_create_mcq)
        .service(catalogue::admin_create_resource)
        .service(catalogue::admin_delete_resource)
        .service(users::admin_list_users)
        .service(users::admin_set_approval)
        .service(users::admin_change_role)
        .service(community::admin_toggle_pin)
        .service(community::admin_toggle_lock)
        .service(community::admin_delete_post)
        .service(community::admin_list_articles)
        .service(community::admin_create_article)
        .service(community::admin_toggle_article);
}
