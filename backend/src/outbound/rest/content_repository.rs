//! Read-only site content: testimonials, statistics and quotes.

use async_trait::async_trait;

use crate::domain::ports::{ContentRepository, StoreError};
use crate::domain::{Quote, Statistic, Testimonial};

use super::client::RestStoreClient;
use super::query::{Direction, TableQuery};
use super::rows::{QuoteRow, StatisticRow, TestimonialRow};

/// Store-backed [`ContentRepository`].
#[derive(Debug, Clone)]
pub struct RestContentRepository {
    client: RestStoreClient,
}

impl RestContentRepository {
    /// Create a repository sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentRepository for RestContentRepository {
    async fn approved_testimonials(&self) -> Result<Vec<Testimonial>, StoreError> {
        let query = TableQuery::new()
            .eq("approved", true)
            .order("position", Direction::Asc);
        let rows: Vec<TestimonialRow> = self.client.select("testimonials", &query).await?;
        Ok(rows.into_iter().map(Testimonial::from).collect())
    }

    async fn statistics(&self) -> Result<Vec<Statistic>, StoreError> {
        let query = TableQuery::new().order("position", Direction::Asc);
        let rows: Vec<StatisticRow> = self.client.select("statistics", &query).await?;
        Ok(rows.into_iter().map(Statistic::from).collect())
    }

    async fn quotes(&self) -> Result<Vec<Quote>, StoreError> {
        let query = TableQuery::new().order("id", Direction::Asc);
        let rows: Vec<QuoteRow> = self.client.select("quotes", &query).await?;
        Ok(rows.into_iter().map(Quote::from).collect())
    }
}
