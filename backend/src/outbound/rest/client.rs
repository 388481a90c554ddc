//! Reqwest client for the hosted table store.
//!
//! The adapter owns transport details only: headers, query strings, status
//! mapping and JSON decoding. Requests carry the caller's `trace-id`. Repositories built on it translate rows into
//! domain types.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::query::TableQuery;
use crate::domain::ports::StoreError;
use crate::domain::{TRACE_ID_HEADER, TraceId};

const PREFER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Where the store lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct StoreEndpoint {
    /// Project base URL, e.g. `https://project.example.co/`.
    pub base_url: Url,
    /// API key sent as `apikey` and bearer token.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl StoreEndpoint {
    /// Endpoint whose base path always ends in `/` so relative joins keep
    /// any path prefix.
    #[must_use]
    pub fn new(mut base_url: Url, api_key: impl Into<String>, timeout: Duration) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            api_key: api_key.into(),
            timeout,
        }
    }
}

/// Shared HTTP client for table, RPC and auth requests.
#[derive(Debug, Clone)]
pub struct RestStoreClient {
    client: Client,
    base_url: Url,
}

/// Raw reply from the auth endpoint, mapped by the auth adapter.
#[derive(Debug)]
pub(crate) struct AuthReply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RestStoreClient {
    /// Build a client that sends the API key with every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the key is not a valid header value or the
    /// reqwest client cannot be constructed.
    pub fn new(endpoint: StoreEndpoint) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&endpoint.api_key)
            .map_err(|error| StoreError::connection(format!("invalid API key: {error}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", endpoint.api_key))
            .map_err(|error| StoreError::connection(format!("invalid API key: {error}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        let client = Client::builder()
            .timeout(endpoint.timeout)
            .default_headers(headers)
            .build()
            .map_err(|error| StoreError::connection(error.to_string()))?;
        Ok(Self {
            client,
            base_url: endpoint.base_url,
        })
    }

    fn url(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|error| StoreError::query(format!("invalid store path {path}: {error}")))
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.url(&format!("rest/v1/{table}"))
    }

    /// `GET` rows matching `query`.
    pub async fn select<T>(&self, table: &str, query: &TableQuery) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let request = self.client.get(self.table_url(table)?).query(&query.to_pairs());
        let body = send(request, table).await?;
        decode(&body, table)
    }

    /// First row matching `query`.
    pub async fn select_one<T>(
        &self,
        table: &str,
        query: TableQuery,
    ) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let rows = self.select(table, &query.limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// `POST` one row or an array of rows.
    pub async fn insert<B>(&self, table: &str, rows: &B) -> Result<(), StoreError>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .client
            .post(self.table_url(table)?)
            .header(PREFER, RETURN_REPRESENTATION)
            .json(rows);
        send(request, table).await.map(|_| ())
    }

    /// `PATCH` rows matching `filters` and return the updated rows.
    pub async fn update<B, T>(
        &self,
        table: &str,
        filters: &TableQuery,
        changes: &B,
    ) -> Result<Vec<T>, StoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .patch(self.table_url(table)?)
            .query(&filters.filter_pairs())
            .header(PREFER, RETURN_REPRESENTATION)
            .json(changes);
        let body = send(request, table).await?;
        decode(&body, table)
    }

    /// `DELETE` rows matching `filters` and return how many were removed.
    pub async fn delete(&self, table: &str, filters: &TableQuery) -> Result<usize, StoreError> {
        let request = self
            .client
            .delete(self.table_url(table)?)
            .query(&filters.filter_pairs())
            .header(PREFER, RETURN_REPRESENTATION);
        let body = send(request, table).await?;
        let removed: Vec<serde_json::Value> = decode(&body, table)?;
        Ok(removed.len())
    }

    /// Call a server-side function.
    pub async fn rpc<B, T>(&self, function: &str, arguments: &B) -> Result<T, StoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .post(self.url(&format!("rest/v1/rpc/{function}"))?)
            .json(arguments);
        let body = send(request, function).await?;
        decode(&body, function)
    }

    /// `POST` to the auth endpoint and hand back the raw reply.
    pub(crate) async fn auth_post<B>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        payload: &B,
    ) -> Result<AuthReply, StoreError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(&format!("auth/v1/{path}"))?;
        let response = traced(self.client.post(url).query(query).json(payload))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(AuthReply {
            status,
            body: body.to_vec(),
        })
    }
}

fn traced(request: RequestBuilder) -> RequestBuilder {
    match TraceId::current() {
        Some(trace_id) => request.header(TRACE_ID_HEADER, trace_id.to_string()),
        None => request,
    }
}

async fn send(request: RequestBuilder, resource: &str) -> Result<Vec<u8>, StoreError> {
    let response = traced(request).send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        debug!(resource, status = status.as_u16(), "store request failed");
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8], resource: &str) -> Result<T, StoreError> {
    serde_json::from_slice(body).map_err(|error| {
        StoreError::decode(format!("invalid {resource} payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> StoreError {
    StoreError::connection(error.to_string())
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> StoreError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    match status {
        StatusCode::CONFLICT => StoreError::conflict(message),
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            StoreError::connection(message)
        }
        _ => StoreError::query(message),
    }
}

pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
