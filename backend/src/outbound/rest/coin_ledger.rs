//! EduCoins ledger backed by the `award_edu_coins` store function.
//!
//! The function inserts the `edu_coin_transactions` row and increments
//! `profiles.edu_coins` in one server-side transaction, returning the new
//! balance.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{CoinLedger, StoreError};
use crate::domain::{CoinAward, CoinTransaction, RewardReason, UserId};

use super::client::RestStoreClient;
use super::query::{Direction, TableQuery};
use super::rows::CoinTransactionRow;

const AWARD_FUNCTION: &str = "award_edu_coins";
const TRANSACTIONS: &str = "edu_coin_transactions";

#[derive(Debug, Serialize)]
struct AwardArguments {
    p_user_id: UserId,
    p_amount: i64,
    p_reason: RewardReason,
    p_subject_id: Option<Uuid>,
    p_created_at: DateTime<Utc>,
}

/// Store-backed [`CoinLedger`].
#[derive(Debug, Clone)]
pub struct RestCoinLedger {
    client: RestStoreClient,
}

impl RestCoinLedger {
    /// Create a ledger sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CoinLedger for RestCoinLedger {
    async fn award(&self, award: &CoinAward, at: DateTime<Utc>) -> Result<i64, StoreError> {
        let arguments = AwardArguments {
            p_user_id: award.user_id,
            p_amount: award.amount,
            p_reason: award.reason,
            p_subject_id: award.subject_id,
            p_created_at: at,
        };
        let balance: i64 = self.client.rpc(AWARD_FUNCTION, &arguments).await?;
        debug!(user_id = %award.user_id, amount = award.amount, balance, "coins awarded");
        Ok(balance)
    }

    async fn transactions(
        &self,
        user: &UserId,
        limit: u32,
    ) -> Result<Vec<CoinTransaction>, StoreError> {
        let query = TableQuery::new()
            .eq("user_id", user)
            .order("created_at", Direction::Desc)
            .limit(limit);
        let rows: Vec<CoinTransactionRow> = self.client.select(TRANSACTIONS, &query).await?;
        Ok(rows.into_iter().map(CoinTransaction::from).collect())
    }
}
