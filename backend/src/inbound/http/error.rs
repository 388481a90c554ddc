//! HTTP mapping for domain errors.
//!
//! The domain error stays transport agnostic; this module decides status
//! codes, copies the trace id into a response header and hides internal
//! messages from clients.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(message = self.message(), trace_id = ?self.trace_id(), "internal error");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

/// Turn malformed JSON bodies into the shared error envelope.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON payload");
    let details = json!({ "field": "body", "code": "invalid_json" });
    Error::invalid_request(format!("request body is not valid JSON: {err}"))
        .with_details(details)
        .into()
}

/// Turn malformed query strings into the shared error envelope.
pub(crate) fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    Error::invalid_request(format!("query string is not valid: {err}"))
        .with_details(json!({ "field": "query", "code": "invalid_query" }))
        .into()
}

/// Turn undecodable path segments into the shared error envelope.
pub(crate) fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameters");
    Error::invalid_request(format!("path is not valid: {err}"))
        .with_details(json!({ "field": "path", "code": "invalid_path" }))
        .into()
}
