//! In-process store used in development mode and by integration tests.
//!
//! Every table lives behind one mutex, so each port call sees and leaves a
//! consistent snapshot. Coin awards update the ledger and the profile balance
//! under the same lock.

mod accounts;
mod catalogue;
mod community;
mod seed;
mod site;
mod tables;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::StoreError;
use crate::domain::{
    CoinTransaction, ContactMessage, Donation, LearningEvent, McqAnswerRecord, MentorApplication,
    PartnershipApplication,
};

pub use seed::DemoAdmin;
use tables::Tables;

/// Shared in-memory implementation of every store port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::query("in-memory store lock poisoned"))
    }

    /// Stored donations, oldest first.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn donations(&self) -> Result<Vec<Donation>, StoreError> {
        Ok(self.lock()?.donations.iter().map(|(_, row)| row.clone()).collect())
    }

    /// Stored partnership applications, oldest first.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn partnerships(&self) -> Result<Vec<PartnershipApplication>, StoreError> {
        Ok(self.lock()?.partnerships.iter().map(|(_, row)| row.clone()).collect())
    }

    /// Stored contact messages, oldest first.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn contact_messages(&self) -> Result<Vec<ContactMessage>, StoreError> {
        Ok(self.lock()?.contacts.iter().map(|(_, row)| row.clone()).collect())
    }

    /// Stored mentor applications, oldest first.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn mentor_applications(&self) -> Result<Vec<MentorApplication>, StoreError> {
        Ok(self.lock()?.mentors.iter().map(|(_, row)| row.clone()).collect())
    }

    /// Recorded learning events, oldest first.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn learning_events(&self) -> Result<Vec<LearningEvent>, StoreError> {
        Ok(self.lock()?.events.clone())
    }

    /// Stored answer rows, oldest first.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn answers(&self) -> Result<Vec<McqAnswerRecord>, StoreError> {
        Ok(self.lock()?.answers.clone())
    }

    /// Every coin transaction, oldest first.
    ///
    /// # Errors
    ///
    /// Fails only when the store lock is poisoned.
    pub fn coin_transactions(&self) -> Result<Vec<CoinTransaction>, StoreError> {
        Ok(self.lock()?.transactions.clone())
    }
}

/// Rows `offset .. offset + limit` of an already ordered list.
fn window<T: Clone>(rows: &[T], offset: u64, limit: u32) -> Vec<T> {
    let start = usize::try_from(offset).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    rows.iter().skip(start).take(take).cloned().collect()
}
