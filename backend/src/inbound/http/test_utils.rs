//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{DateTime, Utc};
use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::EmailAddress;
use crate::domain::test_support::{FixtureClock, clock};
use crate::inbound::http::configure;
use crate::inbound::http::courses::CourseOutlineResponse;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{DemoAdmin, InMemoryStore};
use crate::server::in_memory_ports;

/// Password of the seeded administrator.
pub const ADMIN_PASSWORD: &str = "admin-secret";
/// E-mail of the seeded administrator.
pub const ADMIN_EMAIL: &str = "admin@eduwarn.test";

/// Session middleware with a fresh key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Instant every handler test runs at.
pub fn fixed_now() -> DateTime<Utc> {
    FixtureClock::default().0
}

/// Demo store with an approved administrator plus state wired to it.
pub fn demo_state() -> (InMemoryStore, HttpState) {
    let admin = DemoAdmin {
        email: EmailAddress::parse("email", ADMIN_EMAIL).expect("valid email"),
        password: Zeroizing::new(ADMIN_PASSWORD.to_owned()),
        full_name: "Site Admin".to_owned(),
    };
    let store = InMemoryStore::with_demo_content(fixed_now(), Some(&admin)).expect("seeded store");
    let state = HttpState::new(in_memory_ports(&store, clock()));
    (store, state)
}

/// `/api/v1` routes over `state` with a test session middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(configure))
}

/// `POST /api/v1/auth/login` with the given credentials.
pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": email, "password": password }))
}

/// Session cookie of the seeded administrator.
pub async fn admin_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, login_request(ADMIN_EMAIL, ADMIN_PASSWORD).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res)
}

/// Outline of the seeded course, in English.
pub async fn demo_outline<S, B>(app: &S) -> CourseOutlineResponse
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/api/v1/courses/earthquake-preparedness")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    test::read_body_json(res).await
}
