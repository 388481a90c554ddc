//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::{in_memory_ports, rest_ports};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::configure;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;

/// Per-worker inputs of [`build_app`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Assemble the application: traced, with the session-wrapped `/api/v1`
/// scope and the health probes at the root.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1").wrap(session).configure(configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over the configured store ports.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ports,
    } = config;
    let http_state = web::Data::new(HttpState::new(ports));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;

    use crate::domain::TRACE_ID_HEADER;
    use crate::domain::test_support::clock;
    use crate::outbound::memory::InMemoryStore;

    fn deps(is_ready: bool) -> AppDependencies {
        let health = HealthState::new();
        if is_ready {
            health.mark_ready();
        }
        let store = InMemoryStore::new();
        AppDependencies {
            health_state: web::Data::new(health),
            http_state: web::Data::new(HttpState::new(in_memory_ports(&store, clock()))),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[actix_web::test]
    async fn probes_sit_outside_the_api_scope() {
        let app = test::init_service(build_app(deps(true))).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/health/ready").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn readiness_reflects_health_state() {
        let app = test::init_service(build_app(deps(false))).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn api_responses_carry_a_trace_id() {
        let app = test::init_service(build_app(deps(true))).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/v1/courses").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn login_issues_a_private_session_cookie() {
        let app = test::init_service(build_app(deps(true))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(serde_json::json!({
                    "fullName": "Maya Gurung",
                    "email": "maya@example.com",
                    "password": "secret-pass",
                    "confirmPassword": "secret-pass",
                    "role": "student",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie");
        assert_eq!(cookie.http_only(), Some(true));
        assert!(cookie.max_age().is_some());
    }
}
