//! Site content: testimonials, statistics and the quote of the day.

use std::sync::Arc;

use mockable::Clock;

use super::ports::ContentRepository;
use super::{Error, Quote, Statistic, Testimonial, quote_of_the_day};

/// Read-only marketing content.
#[derive(Clone)]
pub struct ContentService {
    content: Arc<dyn ContentRepository>,
    clock: Arc<dyn Clock>,
}

impl ContentService {
    /// Create the service.
    pub fn new(content: Arc<dyn ContentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { content, clock }
    }

    /// Approved testimonials.
    pub async fn testimonials(&self) -> Result<Vec<Testimonial>, Error> {
        Ok(self.content.approved_testimonials().await?)
    }

    /// Statistics ordered by position.
    pub async fn statistics(&self) -> Result<Vec<Statistic>, Error> {
        Ok(self.content.statistics().await?)
    }

    /// Today's quote, chosen by day of year.
    pub async fn quote_of_the_day(&self) -> Result<Quote, Error> {
        let quotes = self.content.quotes().await?;
        let today = self.clock.utc().date_naive();
        quote_of_the_day(&quotes, today)
            .cloned()
            .ok_or_else(|| Error::not_found("no quotes available"))
    }
}
