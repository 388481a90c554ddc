//! PostgREST query-string builder.
//!
//! Filters use the `column=op.value` convention, ordering is a single
//! comma-separated `order` parameter and paging maps onto `limit`/`offset`.

use std::fmt::Display;

use pagination::PageRequest;

/// Sort direction for [`TableQuery::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filters, ordering and paging for one table request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<u32>,
    offset: Option<u64>,
}

impl TableQuery {
    /// Empty query selecting every column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the returned columns.
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_owned());
        self
    }

    /// `column = value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    /// `column IN (values)`.
    #[must_use]
    pub fn in_list<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let joined = values
            .into_iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.filters.push((column.to_owned(), format!("in.({joined})")));
        self
    }

    /// Append a sort key.
    #[must_use]
    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order.push(format!("{column}.{}", direction.as_str()));
        self
    }

    /// Cap the number of rows.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip rows.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Fetch one row beyond the page so the caller can tell whether another
    /// page exists.
    #[must_use]
    pub fn page(self, page: &PageRequest) -> Self {
        self.limit(page.fetch_limit()).offset(page.offset())
    }

    /// Query-string pairs in a stable order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![(
            "select".to_owned(),
            self.select.clone().unwrap_or_else(|| "*".to_owned()),
        )];
        pairs.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            pairs.push(("order".to_owned(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_owned(), offset.to_string()));
        }
        pairs
    }

    /// Filter pairs only, for `PATCH` and `DELETE`.
    #[must_use]
    pub fn filter_pairs(&self) -> Vec<(String, String)> {
        self.filters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagination::Cursor;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_owned(), value.to_owned())
    }

    #[test]
    fn renders_filters_order_and_paging() {
        let pairs = TableQuery::new()
            .eq("category_id", "c1")
            .order("pinned", Direction::Desc)
            .order("created_at", Direction::Desc)
            .limit(21)
            .offset(40)
            .to_pairs();
        assert_eq!(
            pairs,
            vec![
                pair("select", "*"),
                pair("category_id", "eq.c1"),
                pair("order", "pinned.desc,created_at.desc"),
                pair("limit", "21"),
                pair("offset", "40"),
            ]
        );
    }

    #[test]
    fn in_list_joins_values() {
        let pairs = TableQuery::new()
            .select("id,title_en")
            .in_list("module_id", ["a", "b", "c"])
            .to_pairs();
        assert_eq!(pairs[0], pair("select", "id,title_en"));
        assert_eq!(pairs[1], pair("module_id", "in.(a,b,c)"));
    }

    #[test]
    fn page_overfetches_by_one() {
        let cursor = Cursor::from_offset(10).encode();
        let page = PageRequest::new(Some(5), Some(&cursor)).expect("valid page");
        let pairs = TableQuery::new().page(&page).to_pairs();
        assert!(pairs.contains(&pair("limit", "6")));
        assert!(pairs.contains(&pair("offset", "10")));
    }
}
