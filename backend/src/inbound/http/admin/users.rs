//! User management.
//!
//! ```text
//! GET  /api/v1/admin/users?limit=&cursor=
//! POST /api/v1/admin/users/{id}/approval
//! POST /api/v1/admin/users/{id}/role
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::require_admin;
use crate::domain::{ApiResult, Role, UserId};
use crate::inbound::http::accounts::ProfileResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, PageQuery, parse_id};

/// One page of profiles, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub items: Vec<ProfileResponse>,
    /// Pass as `cursor` to fetch the next page; absent on the last page.
    pub next_cursor: Option<String>,
}

/// Approval change. Without a body, or with `approved` absent, the flag flips.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ApprovalRequest {
    pub approved: Option<bool>,
}

/// Role change.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RoleRequest {
    /// `student`, `teacher` or `admin`.
    #[schema(example = "teacher")]
    pub role: String,
}

/// Registered users.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Users", body = UserPage),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListUsers"
)]
#[get("/users")]
pub async fn admin_list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<UserPage>> {
    require_admin(&state, &session).await?;
    let page = query.page_request()?;
    let (items, next_cursor) = state
        .admin
        .list_users(&page)
        .await?
        .map(ProfileResponse::from)
        .into_parts();
    Ok(web::Json(UserPage { items, next_cursor }))
}

/// Approve, revoke or flip a user's role approval.
#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{id}/approval",
    params(("id" = String, Path, description = "User id")),
    request_body(content = Option<ApprovalRequest>, description = "Omit to flip"),
    responses(
        (status = 200, description = "Updated", body = ProfileResponse),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminSetApproval"
)]
#[post("/users/{id}/approval")]
pub async fn admin_set_approval(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<web::Json<ApprovalRequest>>,
) -> ApiResult<web::Json<ProfileResponse>> {
    require_admin(&state, &session).await?;
    let user_id: UserId = parse_id(path.as_str(), FieldName::new("id"))?;
    let approved = payload.and_then(|body| body.approved);
    let profile = state.admin.set_approval(&user_id, approved).await?;
    Ok(web::Json(profile.into()))
}

/// Change a user's role; approval is left as it is.
#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{id}/role",
    params(("id" = String, Path, description = "User id")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Updated", body = ProfileResponse),
        (status = 400, description = "Unknown role", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminChangeRole"
)]
#[post("/users/{id}/role")]
pub async fn admin_change_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RoleRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    require_admin(&state, &session).await?;
    let user_id: UserId = parse_id(path.as_str(), FieldName::new("id"))?;
    let role: Role = payload.role.parse()?;
    let profile = state.admin.change_role(&user_id, role).await?;
    Ok(web::Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    use crate::inbound::http::test_utils::{admin_cookie, demo_state, session_cookie, test_app};

    #[actix_web::test]
    async fn approving_a_teacher_unlocks_course_management() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let admin = admin_cookie(&app).await;
        let signup = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(json!({
                    "fullName": "Laxmi",
                    "email": "laxmi@example.org",
                    "password": "secret1",
                    "confirmPassword": "secret1",
                    "role": "teacher",
                }))
                .to_request(),
        )
        .await;
        let teacher_cookie = session_cookie(&signup);
        let teacher: ProfileResponse = test::read_body_json(signup).await;
        assert!(!teacher.role_approved);

        let approved: ProfileResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/admin/users/{}/approval", teacher.id))
                .cookie(admin.clone())
                .to_request(),
        )
        .await;
        assert!(approved.role_approved);

        let courses = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/admin/courses")
                .cookie(teacher_cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(courses.status(), StatusCode::OK);

        let users = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/admin/users")
                .cookie(teacher_cookie)
                .to_request(),
        )
        .await;
        assert_eq!(users.status(), StatusCode::FORBIDDEN);

        let revoked: ProfileResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/admin/users/{}/approval", teacher.id))
                .cookie(admin)
                .set_json(json!({ "approved": false }))
                .to_request(),
        )
        .await;
        assert!(!revoked.role_approved);
    }

    #[actix_web::test]
    async fn lists_users_and_changes_roles() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let admin = admin_cookie(&app).await;

        let page: UserPage = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/admin/users?limit=10")
                .cookie(admin.clone())
                .to_request(),
        )
        .await;
        assert_eq!(page.items.len(), 1);
        let me = &page.items[0];

        let bad = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/admin/users/{}/role", me.id))
                .cookie(admin.clone())
                .set_json(json!({ "role": "principal" }))
                .to_request(),
        )
        .await;
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let unknown = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/admin/users/{}/role", UserId::random()))
                .cookie(admin)
                .set_json(json!({ "role": "teacher" }))
                .to_request(),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }
}
