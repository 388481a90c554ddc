//! Error type shared by every table-store port.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Failures raised by table-store adapters.
    pub enum StoreError {
        /// The store could not be reached or timed out.
        Connection { message: String } => "store connection failed: {message}",
        /// The store rejected or failed the query.
        Query { message: String } => "store query failed: {message}",
        /// A write conflicted with existing data, such as a duplicate slug.
        Conflict { message: String } => "store rejected conflicting write: {message}",
        /// A row the operation depends on does not exist.
        NotFound { message: String } => "store record not found: {message}",
        /// The store answered with a payload the adapter cannot decode.
        Decode { message: String } => "store response could not be decoded: {message}",
    }
}

impl From<StoreError> for Error {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Connection { message } => {
                Self::service_unavailable(format!("store unavailable: {message}"))
            }
            StoreError::Conflict { message } => Self::conflict(message),
            StoreError::NotFound { message } => Self::not_found(message),
            StoreError::Query { message } => Self::internal(format!("store query failed: {message}")),
            StoreError::Decode { message } => {
                Self::internal(format!("store response could not be decoded: {message}"))
            }
        }
    }
}
