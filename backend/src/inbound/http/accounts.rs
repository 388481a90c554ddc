//! Account HTTP handlers.
//!
//! ```text
//! POST /api/v1/auth/signup
//! POST /api/v1/auth/login
//! POST /api/v1/auth/logout
//! GET  /api/v1/me
//! PUT  /api/v1/me/language
//! GET  /api/v1/me/coins
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::forms::FieldError;
use crate::domain::{
    ApiResult, CoinBalance, CoinTransaction, Language, LoginCredentials, Profile, SignUpForm,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration payload. Blank or missing fields are reported per field.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SignUpRequest {
    #[schema(example = "Sita Sharma")]
    pub full_name: String,
    #[schema(example = "sita@example.org")]
    pub email: String,
    #[schema(value_type = String)]
    pub password: Zeroizing<String>,
    #[schema(value_type = String)]
    pub confirm_password: Zeroizing<String>,
    /// `student`, `teacher` or `admin`.
    #[schema(example = "student")]
    pub role: String,
}

impl From<SignUpRequest> for SignUpForm {
    fn from(value: SignUpRequest) -> Self {
        Self {
            full_name: value.full_name,
            email: value.email,
            password: value.password,
            confirm_password: value.confirm_password,
            role: value.role,
        }
    }
}

/// Login payload.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "sita@example.org")]
    pub email: String,
    #[schema(value_type = String)]
    pub password: Zeroizing<String>,
}

/// Preferred language update.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LanguageRequest {
    /// `en` or `ne`.
    #[schema(example = "ne")]
    pub language: String,
}

/// Profile of a user as returned to its owner and to admins.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[schema(example = "student")]
    pub role: String,
    pub role_approved: bool,
    pub edu_coins: i64,
    #[schema(example = "en")]
    pub preferred_language: String,
    pub created_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id.to_string(),
            email: value.email,
            full_name: value.full_name,
            role: value.role.as_str().to_owned(),
            role_approved: value.role_approved,
            edu_coins: value.edu_coins,
            preferred_language: value.preferred_language.code().to_owned(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// One EduCoins ledger entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoinTransactionResponse {
    pub id: String,
    pub amount: i64,
    /// `correct_answer` or `resource_download`.
    pub reason: String,
    pub subject_id: Option<String>,
    pub created_at: String,
}

impl From<CoinTransaction> for CoinTransactionResponse {
    fn from(value: CoinTransaction) -> Self {
        Self {
            id: value.id.to_string(),
            amount: value.amount,
            reason: value.reason.as_str().to_owned(),
            subject_id: value.subject_id.map(|id| id.to_string()),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Balance with the most recent transactions, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoinBalanceResponse {
    pub balance: i64,
    pub transactions: Vec<CoinTransactionResponse>,
}

impl From<CoinBalance> for CoinBalanceResponse {
    fn from(value: CoinBalance) -> Self {
        Self {
            balance: value.balance,
            transactions: value.transactions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Register an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "E-mail already registered", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let form = SignUpForm::from(payload.into_inner());
    let profile = state.accounts.sign_up(&form).await?;
    session.persist_user(&profile.id)?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(profile)))
}

/// Authenticate and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Signed in",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = ProfileResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)?;
    let profile = state.accounts.sign_in(&credentials).await?;
    session.persist_user(&profile.id)?;
    Ok(web::Json(profile.into()))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Profile of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "currentProfile"
)]
#[get("/me")]
pub async fn current_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state.accounts.current_profile(&user_id).await?;
    Ok(web::Json(profile.into()))
}

/// Store the signed-in user's display language.
#[utoipa::path(
    put,
    path = "/api/v1/me/language",
    request_body = LanguageRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Unsupported language", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "updateLanguage"
)]
#[put("/me/language")]
pub async fn update_language(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LanguageRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let language = parse_language(&payload.language)?;
    let profile = state.accounts.update_language(&user_id, language).await?;
    Ok(web::Json(profile.into()))
}

fn parse_language(raw: &str) -> Result<Language, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::Missing { field: "language" });
    }
    Language::parse(raw).ok_or(FieldError::Invalid { field: "language" })
}

/// EduCoins balance and recent history of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/me/coins",
    responses(
        (status = 200, description = "Balance and history", body = CoinBalanceResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "coinBalance"
)]
#[get("/me/coins")]
pub async fn coin_balance(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CoinBalanceResponse>> {
    let user_id = session.require_user_id()?;
    let balance = state.rewards.balance(&user_id).await?;
    Ok(web::Json(balance.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{
        ADMIN_EMAIL, ADMIN_PASSWORD, demo_state, login_request, session_cookie, test_app,
    };

    fn signup_body(role: &str) -> Value {
        json!({
            "fullName": " Hari Bista ",
            "email": "hari@example.org",
            "password": "secret1",
            "confirmPassword": "secret1",
            "role": role,
        })
    }

    #[rstest]
    #[case("student", true)]
    #[case("teacher", false)]
    #[actix_web::test]
    async fn signup_creates_profile_and_session(#[case] role: &str, #[case] approved: bool) {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(signup_body(role))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let cookie = session_cookie(&res);
        let created: ProfileResponse = test::read_body_json(res).await;
        assert_eq!(created.full_name, "Hari Bista");
        assert_eq!(created.role_approved, approved);

        let me = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::OK);
        let profile: ProfileResponse = test::read_body_json(me).await;
        assert_eq!(profile.id, created.id);
    }

    #[actix_web::test]
    async fn signup_rejects_mismatched_confirmation() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let mut body = signup_body("student");
        body["confirmPassword"] = json!("secret2");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: Value = test::read_body_json(res).await;
        assert_eq!(error["details"]["code"], "password_mismatch");
    }

    #[actix_web::test]
    async fn signup_reports_missing_field() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(json!({ "email": "x@example.org" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: Value = test::read_body_json(res).await;
        assert_eq!(error["details"]["field"], "fullName");
    }

    #[actix_web::test]
    async fn login_with_wrong_password_is_unauthorised() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;

        let res = test::call_service(
            &app,
            login_request(ADMIN_EMAIL, "not-the-password").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_forgets_the_user() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let signed_in =
            test::call_service(&app, login_request(ADMIN_EMAIL, ADMIN_PASSWORD).to_request()).await;
        assert_eq!(signed_in.status(), StatusCode::OK);

        let signed_out = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/logout")
                .cookie(session_cookie(&signed_in))
                .to_request(),
        )
        .await;
        assert_eq!(signed_out.status(), StatusCode::NO_CONTENT);

        let me = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/me")
                .cookie(session_cookie(&signed_out))
                .to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("ne", StatusCode::OK)]
    #[case("fr", StatusCode::BAD_REQUEST)]
    #[case("", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn language_update_validates_code(#[case] code: &str, #[case] status: StatusCode) {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let signed_in =
            test::call_service(&app, login_request(ADMIN_EMAIL, ADMIN_PASSWORD).to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/me/language")
                .cookie(session_cookie(&signed_in))
                .set_json(json!({ "language": code }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), status);
        if status == StatusCode::OK {
            let profile: ProfileResponse = test::read_body_json(res).await;
            assert_eq!(profile.preferred_language, "ne");
        }
    }

    #[actix_web::test]
    async fn coins_require_login() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/v1/me/coins").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
