//! Shared request parsing helpers for inbound HTTP adapters.

use std::str::FromStr;

use pagination::{PageRequest, PaginationError};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::Error;

/// Field name as clients send it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    Error::invalid_request(format!("{name} must be a valid UUID")).with_details(json!({
        "field": name,
        "value": value,
        "code": "invalid_uuid",
    }))
}

/// Parse a typed identifier from a path segment or body field.
pub(crate) fn parse_id<T: FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid_uuid_error(field, value))
}

/// `?limit=&cursor=` on listing endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page size, 1 to 100; defaults to 20.
    pub limit: Option<u32>,
    /// Opaque cursor from a previous page's `nextCursor`.
    pub cursor: Option<String>,
}

impl PageQuery {
    pub(crate) fn page_request(&self) -> Result<PageRequest, Error> {
        PageRequest::new(self.limit, self.cursor.as_deref()).map_err(|error| {
            let field = match error {
                PaginationError::InvalidLimit { .. } => "limit",
                PaginationError::InvalidCursor => "cursor",
            };
            Error::invalid_request(error.to_string()).with_details(json!({
                "field": field,
                "code": "invalid_value",
            }))
        })
    }
}
