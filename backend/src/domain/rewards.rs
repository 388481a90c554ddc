//! EduCoins rewards.
//!
//! Coins are earned for correct answers and resource downloads. An award is
//! applied by the ledger in one step; application code never reads the
//! balance to write it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ResourceId, UserId};

/// Coins granted per correct answer.
pub const COINS_PER_CORRECT_ANSWER: i64 = 5;
/// Coins granted per resource download.
pub const COINS_PER_DOWNLOAD: i64 = 2;

/// Why coins were granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardReason {
    /// One or more correct quiz answers.
    CorrectAnswer,
    /// A resource was downloaded.
    ResourceDownload,
}

impl RewardReason {
    /// Snake-case name stored with each transaction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CorrectAnswer => "correct_answer",
            Self::ResourceDownload => "resource_download",
        }
    }
}

/// An award waiting to be applied by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinAward {
    pub user_id: UserId,
    pub amount: i64,
    pub reason: RewardReason,
    pub subject_id: Option<Uuid>,
}

impl CoinAward {
    /// Award for `correct` right answers, or `None` when nothing was earned.
    ///
    /// # Examples
    /// ```
    /// use eduwarn::domain::{CoinAward, UserId};
    ///
    /// let award = CoinAward::for_correct_answers(UserId::random(), 3, None).expect("earned");
    /// assert_eq!(award.amount, 15);
    /// assert!(CoinAward::for_correct_answers(UserId::random(), 0, None).is_none());
    /// ```
    #[must_use]
    pub fn for_correct_answers(user_id: UserId, correct: u32, subject_id: Option<Uuid>) -> Option<Self> {
        (correct > 0).then(|| Self {
            user_id,
            amount: i64::from(correct) * COINS_PER_CORRECT_ANSWER,
            reason: RewardReason::CorrectAnswer,
            subject_id,
        })
    }

    /// Award for downloading `resource`.
    #[must_use]
    pub fn for_download(user_id: UserId, resource: ResourceId) -> Self {
        Self {
            user_id,
            amount: COINS_PER_DOWNLOAD,
            reason: RewardReason::ResourceDownload,
            subject_id: Some(*resource.as_uuid()),
        }
    }
}

/// A row of the `edu_coin_transactions` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinTransaction {
    pub id: Uuid,
    pub user_id: UserId,
    pub amount: i64,
    pub reason: RewardReason,
    pub subject_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl CoinTransaction {
    /// Transaction row for an applied award.
    #[must_use]
    pub fn from_award(award: &CoinAward, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: award.user_id,
            amount: award.amount,
            reason: award.reason,
            subject_id: award.subject_id,
            created_at,
        }
    }
}

/// Current balance with recent history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinBalance {
    pub balance: i64,
    pub transactions: Vec<CoinTransaction>,
}
