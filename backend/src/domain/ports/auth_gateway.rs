//! Port for the hosted credential endpoint.
//!
//! Credentials never touch the table store directly: sign-up and password
//! checks are delegated to the auth endpoint, which returns the user id that
//! keys the `profiles` row.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, LoginCredentials, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by credential adapters.
    pub enum AuthGatewayError {
        /// The auth endpoint could not be reached.
        Connection { message: String } => "auth endpoint unavailable: {message}",
        /// E-mail and password did not match.
        InvalidCredentials => "invalid email or password",
        /// An account with this e-mail already exists.
        EmailTaken => "an account with this email already exists",
        /// The endpoint refused the request, for example a weak password.
        Rejected { message: String } => "auth endpoint rejected the request: {message}",
        /// The endpoint answered with something unexpected.
        Unexpected { message: String } => "auth endpoint failed: {message}",
    }
}

impl From<AuthGatewayError> for Error {
    fn from(value: AuthGatewayError) -> Self {
        match value {
            AuthGatewayError::Connection { message } => {
                Self::service_unavailable(format!("auth endpoint unavailable: {message}"))
            }
            AuthGatewayError::InvalidCredentials => Self::unauthorized("invalid email or password"),
            AuthGatewayError::EmailTaken => {
                Self::conflict("an account with this email already exists")
            }
            AuthGatewayError::Rejected { message } => Self::invalid_request(message),
            AuthGatewayError::Unexpected { message } => {
                Self::internal(format!("auth endpoint failed: {message}"))
            }
        }
    }
}

/// Credential creation and verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Register credentials and return the new user id.
    async fn sign_up(&self, email: &EmailAddress, password: &str)
    -> Result<UserId, AuthGatewayError>;

    /// Verify credentials and return the matching user id.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<UserId, AuthGatewayError>;
}
