//! Shared harness for end-to-end tests over the in-memory store.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use mockable::{Clock, DefaultClock};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use zeroize::Zeroizing;

use eduwarn::domain::EmailAddress;
use eduwarn::inbound::http::health::HealthState;
use eduwarn::inbound::http::state::HttpState;
use eduwarn::outbound::memory::{DemoAdmin, InMemoryStore};
use eduwarn::server::{AppDependencies, in_memory_ports};

pub const ADMIN_EMAIL: &str = "ops@eduwarn.test";
pub const ADMIN_PASSWORD: &str = "ops-secret-pass";
pub const PASSWORD: &str = "learner-pass";

/// Demo store with a seeded administrator and the dependencies to serve it.
pub fn demo_deps() -> (InMemoryStore, AppDependencies) {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let admin = DemoAdmin {
        email: EmailAddress::parse("email", ADMIN_EMAIL).expect("admin email"),
        password: Zeroizing::new(ADMIN_PASSWORD.to_owned()),
        full_name: "Operations".to_owned(),
    };
    let store =
        InMemoryStore::with_demo_content(clock.utc(), Some(&admin)).expect("demo store seeded");
    let health = HealthState::new();
    health.mark_ready();
    let deps = AppDependencies {
        health_state: web::Data::new(health),
        http_state: web::Data::new(HttpState::new(in_memory_ports(&store, clock))),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    (store, deps)
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// Send `req` with an optional session cookie and return the status and JSON
/// body (`Value::Null` for empty bodies).
pub async fn call<S, B>(
    app: &S,
    req: test::TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    };
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

/// Like [`call`] but decode a successful body into `T`.
pub async fn call_ok<S, B, T>(app: &S, req: test::TestRequest, cookie: Option<&Cookie<'static>>) -> T
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    T: DeserializeOwned,
{
    let (status, body) = call(app, req, cookie).await;
    assert!(status.is_success(), "unexpected {status}: {body}");
    serde_json::from_value(body).expect("typed body")
}

/// Register `email` with `role` and return the session cookie.
pub async fn sign_up<S, B>(app: &S, email: &str, role: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(json!({
                "fullName": "Test Person",
                "email": email,
                "password": PASSWORD,
                "confirmPassword": PASSWORD,
                "role": role,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    session_cookie(&res)
}

/// Sign in and return the session cookie.
pub async fn log_in<S, B>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res)
}
