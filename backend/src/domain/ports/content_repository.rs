//! Port for marketing content tables.

use async_trait::async_trait;

use crate::domain::{Quote, Statistic, Testimonial};

use super::StoreError;

/// Read-only site content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Approved testimonials ordered by position.
    async fn approved_testimonials(&self) -> Result<Vec<Testimonial>, StoreError>;

    /// Statistics ordered by position.
    async fn statistics(&self) -> Result<Vec<Statistic>, StoreError>;

    /// Every quote in a stable order.
    async fn quotes(&self) -> Result<Vec<Quote>, StoreError>;
}
