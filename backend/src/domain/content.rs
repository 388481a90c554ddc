//! Marketing content: testimonials, statistics and quotes.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::LocalizedText;

/// A row of the `testimonials` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: Uuid,
    pub author_name: String,
    pub author_role: LocalizedText,
    pub quote: LocalizedText,
    pub approved: bool,
    pub position: i32,
}

/// A row of the `statistics` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub id: Uuid,
    pub label: LocalizedText,
    pub value: String,
    pub position: i32,
}

/// A row of the `quotes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub text: LocalizedText,
    pub author: String,
}

/// Quote shown on `date`: the entry at `day_of_year % quotes.len()`.
///
/// `quotes` must be in a stable order (the store orders by id).
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use eduwarn::domain::quote_of_the_day;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
/// assert!(quote_of_the_day(&[], date).is_none());
/// ```
#[must_use]
pub fn quote_of_the_day(quotes: &[Quote], date: NaiveDate) -> Option<&Quote> {
    if quotes.is_empty() {
        return None;
    }
    let day = usize::try_from(date.ordinal()).unwrap_or_default();
    quotes.get(day % quotes.len())
}
