//! Port for the `learning_events` table.

use async_trait::async_trait;

use crate::domain::LearningEvent;

use super::StoreError;

/// Append-only learning activity log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearningEventRepository: Send + Sync {
    /// Append an event.
    async fn record(&self, event: &LearningEvent) -> Result<(), StoreError>;
}
