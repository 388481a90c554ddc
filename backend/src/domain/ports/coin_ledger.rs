//! Port for EduCoins awards and history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CoinAward, CoinTransaction, UserId};

use super::StoreError;

/// EduCoins ledger.
///
/// `award` must insert the transaction row and increment the profile balance
/// as one atomic operation at the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoinLedger: Send + Sync {
    /// Apply an award and return the new balance.
    async fn award(&self, award: &CoinAward, at: DateTime<Utc>) -> Result<i64, StoreError>;

    /// Most recent transactions of a user, newest first.
    async fn transactions(
        &self,
        user: &UserId,
        limit: u32,
    ) -> Result<Vec<CoinTransaction>, StoreError>;
}
