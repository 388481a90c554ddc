//! Opaque cursor and page envelope primitives shared by listing endpoints.
//!
//! Listing endpoints fetch one row more than the requested page size. The
//! extra row only signals that another page exists; it is dropped before the
//! page is returned and the next cursor encodes the offset of the following
//! page. Cursors are URL-safe base64 JSON so clients treat them as opaque.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when the client does not provide one.
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised while parsing client pagination input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The requested page size is outside `1..=MAX_LIMIT`.
    #[error("limit must be between 1 and {max}")]
    InvalidLimit {
        /// Upper bound accepted for the limit.
        max: u32,
    },
    /// The cursor could not be decoded.
    #[error("cursor is not valid")]
    InvalidCursor,
}

#[derive(Debug, Serialize, Deserialize)]
struct CursorPayload {
    offset: u64,
}

/// Position of the first row of a page within a stable ordering.
///
/// # Examples
/// ```
/// use pagination::Cursor;
///
/// let cursor = Cursor::from_offset(40);
/// let decoded = Cursor::decode(&cursor.encode()).expect("round trip");
/// assert_eq!(decoded.offset(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    offset: u64,
}

impl Cursor {
    /// Build a cursor pointing at `offset`.
    #[must_use]
    pub const fn from_offset(offset: u64) -> Self {
        Self { offset }
    }

    /// Offset of the first row on the page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Encode the cursor as an opaque token.
    #[must_use]
    pub fn encode(&self) -> String {
        let payload = serde_json::json!({ "offset": self.offset }).to_string();
        URL_SAFE_NO_PAD.encode(payload.as_bytes())
    }

    /// Decode a token produced by [`Cursor::encode`].
    ///
    /// # Errors
    /// Returns [`PaginationError::InvalidCursor`] for malformed tokens.
    pub fn decode(token: &str) -> Result<Self, PaginationError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| PaginationError::InvalidCursor)?;
        let payload: CursorPayload =
            serde_json::from_slice(&bytes).map_err(|_| PaginationError::InvalidCursor)?;
        Ok(Self::from_offset(payload.offset))
    }
}

/// Validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    cursor: Option<Cursor>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            cursor: None,
        }
    }
}

impl PageRequest {
    /// Validate raw client input.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when the limit is out of range or the
    /// cursor cannot be decoded.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::new(Some(10), None).expect("valid request");
    /// assert_eq!(request.limit(), 10);
    /// assert_eq!(request.offset(), 0);
    /// ```
    pub fn new(limit: Option<u32>, cursor: Option<&str>) -> Result<Self, PaginationError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PaginationError::InvalidLimit { max: MAX_LIMIT });
        }
        let cursor = match cursor.map(str::trim) {
            Some("") | None => None,
            Some(token) => Some(Cursor::decode(token)?),
        };
        Ok(Self { limit, cursor })
    }

    /// Requested page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.cursor.map_or(0, |cursor| cursor.offset())
    }

    /// Number of rows adapters should fetch: one more than the page size.
    #[must_use]
    pub const fn fetch_limit(&self) -> u32 {
        self.limit + 1
    }
}

/// A page of items with the cursor for the following page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`PageRequest::fetch_limit`].
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let request = PageRequest::new(Some(2), None).expect("valid request");
    /// let page = Page::from_overfetch(vec![1, 2, 3], &request);
    /// assert_eq!(page.items(), &[1, 2]);
    /// assert!(page.next_cursor().is_some());
    /// ```
    #[must_use]
    pub fn from_overfetch(mut rows: Vec<T>, request: &PageRequest) -> Self {
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        let next_cursor = has_more.then(|| {
            Cursor::from_offset(request.offset() + u64::from(request.limit())).encode()
        });
        Self {
            items: rows,
            next_cursor,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Cursor for the next page, if another page exists.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Transform every item while keeping the cursor.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }

    /// Split the page into its items and next cursor.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.items, self.next_cursor)
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for cursor parsing and page assembly.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(0))]
    #[case(Some(MAX_LIMIT + 1))]
    fn rejects_out_of_range_limits(#[case] limit: Option<u32>) {
        let err = PageRequest::new(limit, None).expect_err("limit must fail");
        assert_eq!(err, PaginationError::InvalidLimit { max: MAX_LIMIT });
    }

    #[rstest]
    #[case("not base64!")]
    #[case("bm90LWpzb24")]
    fn rejects_malformed_cursors(#[case] token: &str) {
        let err = PageRequest::new(None, Some(token)).expect_err("cursor must fail");
        assert_eq!(err, PaginationError::InvalidCursor);
    }

    #[rstest]
    fn blank_cursor_means_first_page() {
        let request = PageRequest::new(None, Some("  ")).expect("blank cursor accepted");
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), DEFAULT_LIMIT);
    }

    #[rstest]
    fn last_page_has_no_cursor() {
        let request = PageRequest::new(Some(3), None).expect("valid request");
        let page = Page::from_overfetch(vec!["a", "b"], &request);
        assert_eq!(page.items(), &["a", "b"]);
        assert!(page.next_cursor().is_none());
    }

    #[rstest]
    fn next_cursor_advances_by_limit() {
        let first = PageRequest::new(Some(2), None).expect("valid request");
        let page = Page::from_overfetch(vec![1, 2, 3], &first);
        let token = page.next_cursor().expect("more rows").to_owned();

        let second = PageRequest::new(Some(2), Some(&token)).expect("cursor accepted");
        assert_eq!(second.offset(), 2);
        assert_eq!(second.fetch_limit(), 3);
    }

    #[rstest]
    fn serialises_camel_case_envelope() {
        let request = PageRequest::new(Some(1), None).expect("valid request");
        let page = Page::from_overfetch(vec![10, 11], &request);
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(value["items"], serde_json::json!([10]));
        assert!(value.get("nextCursor").is_some());
    }
}
