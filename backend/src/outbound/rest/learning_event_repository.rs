//! `learning_events` table adapter.

use async_trait::async_trait;

use crate::domain::LearningEvent;
use crate::domain::ports::{LearningEventRepository, StoreError};

use super::client::RestStoreClient;
use super::rows::LearningEventRow;

/// Store-backed [`LearningEventRepository`].
#[derive(Debug, Clone)]
pub struct RestLearningEventRepository {
    client: RestStoreClient,
}

impl RestLearningEventRepository {
    /// Create a repository sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LearningEventRepository for RestLearningEventRepository {
    async fn record(&self, event: &LearningEvent) -> Result<(), StoreError> {
        self.client
            .insert("learning_events", &LearningEventRow::from(event))
            .await
    }
}
