//! Credential adapter for the store's companion auth endpoint.
//!
//! Sign-up posts to `auth/v1/signup`; sign-in uses the password grant on
//! `auth/v1/token`. Only the returned user id is kept: access tokens stay
//! with the endpoint and the service tracks sessions itself.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{AuthGateway, AuthGatewayError, StoreError};
use crate::domain::{EmailAddress, LoginCredentials, UserId};

use super::client::{RestStoreClient, body_preview};

#[derive(Serialize)]
struct PasswordPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserRef {
    id: UserId,
}

/// The endpoint answers with the user at the top level or nested under
/// `user`, depending on whether e-mail confirmation is enabled.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserReply {
    Nested { user: UserRef },
    Flat(UserRef),
}

impl UserReply {
    fn id(self) -> UserId {
        match self {
            Self::Nested { user } | Self::Flat(user) => user.id,
        }
    }
}

/// Store-backed [`AuthGateway`].
#[derive(Debug, Clone)]
pub struct RestAuthGateway {
    client: RestStoreClient,
}

impl RestAuthGateway {
    /// Create a gateway sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }
}

fn map_store_error(error: StoreError) -> AuthGatewayError {
    match error {
        StoreError::Connection { message } => AuthGatewayError::connection(message),
        other => AuthGatewayError::unexpected(other.to_string()),
    }
}

fn user_id(body: &[u8]) -> Result<UserId, AuthGatewayError> {
    serde_json::from_slice::<UserReply>(body)
        .map(UserReply::id)
        .map_err(|error| AuthGatewayError::unexpected(format!("invalid auth payload: {error}")))
}

fn looks_like_duplicate(body: &[u8]) -> bool {
    let text = String::from_utf8_lossy(body).to_ascii_lowercase();
    text.contains("already registered") || text.contains("already exists")
}

fn map_failure(status: StatusCode, body: &[u8]) -> AuthGatewayError {
    let preview = body_preview(body);
    if status.is_server_error() {
        return AuthGatewayError::connection(format!("status {}: {preview}", status.as_u16()));
    }
    AuthGatewayError::unexpected(format!("status {}: {preview}", status.as_u16()))
}

pub(crate) fn map_signup_reply(
    status: StatusCode,
    body: &[u8],
) -> Result<UserId, AuthGatewayError> {
    if status.is_success() {
        return user_id(body);
    }
    match status {
        StatusCode::CONFLICT => Err(AuthGatewayError::email_taken()),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
            if looks_like_duplicate(body) =>
        {
            Err(AuthGatewayError::email_taken())
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Err(AuthGatewayError::rejected(body_preview(body)))
        }
        _ => Err(map_failure(status, body)),
    }
}

pub(crate) fn map_token_reply(
    status: StatusCode,
    body: &[u8],
) -> Result<UserId, AuthGatewayError> {
    if status.is_success() {
        return user_id(body);
    }
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(AuthGatewayError::invalid_credentials())
        }
        _ => Err(map_failure(status, body)),
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    async fn sign_up(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<UserId, AuthGatewayError> {
        let payload = PasswordPayload {
            email: email.as_str(),
            password,
        };
        let reply = self
            .client
            .auth_post("signup", &[], &payload)
            .await
            .map_err(map_store_error)?;
        debug!(status = reply.status.as_u16(), "auth sign-up answered");
        map_signup_reply(reply.status, &reply.body)
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<UserId, AuthGatewayError> {
        let payload = PasswordPayload {
            email: credentials.email().as_str(),
            password: credentials.password(),
        };
        let reply = self
            .client
            .auth_post("token", &[("grant_type", "password")], &payload)
            .await
            .map_err(map_store_error)?;
        debug!(status = reply.status.as_u16(), "auth sign-in answered");
        map_token_reply(reply.status, &reply.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const USER: &str = "4f8d2c1a-6b3e-4a5f-9c7d-0e1f2a3b4c5d";

    fn expected_user() -> UserId {
        UserId::parse(USER).expect("valid id")
    }

    #[rstest]
    #[case::flat(format!(r#"{{"id":"{USER}","email":"a@b.co"}}"#))]
    #[case::nested(format!(r#"{{"access_token":"t","user":{{"id":"{USER}"}}}}"#))]
    fn accepts_both_user_shapes(#[case] body: String) {
        let id = map_signup_reply(StatusCode::OK, body.as_bytes()).expect("user id");
        assert_eq!(id, expected_user());
    }

    #[rstest]
    #[case::conflict(StatusCode::CONFLICT, "{}", AuthGatewayError::email_taken())]
    #[case::registered(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"msg":"User already registered"}"#,
        AuthGatewayError::email_taken()
    )]
    #[case::weak(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"msg":"weak password"}"#,
        AuthGatewayError::rejected(r#"{"msg":"weak password"}"#)
    )]
    fn maps_signup_failures(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: AuthGatewayError,
    ) {
        assert_eq!(
            map_signup_reply(status, body.as_bytes()).expect_err("failure"),
            expected
        );
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::UNAUTHORIZED)]
    fn wrong_password_is_invalid_credentials(#[case] status: StatusCode) {
        let error = map_token_reply(status, br#"{"error":"invalid_grant"}"#).expect_err("failure");
        assert_eq!(error, AuthGatewayError::invalid_credentials());
    }

    #[test]
    fn server_errors_are_connection_failures() {
        let error = map_token_reply(StatusCode::BAD_GATEWAY, b"upstream").expect_err("failure");
        assert!(matches!(error, AuthGatewayError::Connection { .. }));
    }

    #[test]
    fn garbage_success_body_is_unexpected() {
        let error = map_token_reply(StatusCode::OK, b"<html>").expect_err("failure");
        assert!(matches!(error, AuthGatewayError::Unexpected { .. }));
    }
}
