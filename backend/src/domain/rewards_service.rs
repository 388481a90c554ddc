//! EduCoins awards and balance lookups.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::{CoinLedger, ProfileRepository};
use super::{CoinAward, CoinBalance, Error, UserId};

/// Number of transactions returned with a balance.
pub const RECENT_TRANSACTIONS: u32 = 20;

/// Applies awards through the ledger and reads balances.
#[derive(Clone)]
pub struct RewardsService {
    ledger: Arc<dyn CoinLedger>,
    profiles: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl RewardsService {
    /// Create the service.
    pub fn new(
        ledger: Arc<dyn CoinLedger>,
        profiles: Arc<dyn ProfileRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ledger,
            profiles,
            clock,
        }
    }

    /// Apply `award` and return the new balance.
    pub async fn award(&self, award: &CoinAward) -> Result<i64, Error> {
        let balance = self.ledger.award(award, self.clock.utc()).await?;
        info!(
            user_id = %award.user_id,
            amount = award.amount,
            reason = award.reason.as_str(),
            balance,
            "educoins awarded"
        );
        Ok(balance)
    }

    /// Balance and recent history of `user_id`.
    pub async fn balance(&self, user_id: &UserId) -> Result<CoinBalance, Error> {
        let profile = self
            .profiles
            .find(user_id)
            .await?
            .ok_or_else(|| Error::not_found("profile not found"))?;
        let transactions = self
            .ledger
            .transactions(user_id, RECENT_TRANSACTIONS)
            .await?;
        Ok(CoinBalance {
            balance: profile.edu_coins,
            transactions,
        })
    }
}
