//! Form submissions, site content and learning events.

use async_trait::async_trait;

use crate::domain::ports::{
    ContentRepository, LearningEventRepository, StoreError, SubmissionRepository,
};
use crate::domain::{
    ContactMessage, Donation, LearningEvent, MentorApplication, PartnershipApplication, Quote,
    Statistic, SubmissionReceipt, Testimonial,
};

use super::InMemoryStore;

#[async_trait]
impl SubmissionRepository for InMemoryStore {
    async fn insert_donation(
        &self,
        receipt: &SubmissionReceipt,
        donation: &Donation,
    ) -> Result<(), StoreError> {
        self.lock()?.donations.push((*receipt, donation.clone()));
        Ok(())
    }

    async fn insert_partnership(
        &self,
        receipt: &SubmissionReceipt,
        application: &PartnershipApplication,
    ) -> Result<(), StoreError> {
        self.lock()?
            .partnerships
            .push((*receipt, application.clone()));
        Ok(())
    }

    async fn insert_contact(
        &self,
        receipt: &SubmissionReceipt,
        message: &ContactMessage,
    ) -> Result<(), StoreError> {
        self.lock()?.contacts.push((*receipt, message.clone()));
        Ok(())
    }

    async fn insert_mentor(
        &self,
        receipt: &SubmissionReceipt,
        application: &MentorApplication,
    ) -> Result<(), StoreError> {
        self.lock()?.mentors.push((*receipt, application.clone()));
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for InMemoryStore {
    async fn approved_testimonials(&self) -> Result<Vec<Testimonial>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<Testimonial> = tables
            .testimonials
            .iter()
            .filter(|row| row.approved)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.position);
        Ok(rows)
    }

    async fn statistics(&self) -> Result<Vec<Statistic>, StoreError> {
        let mut rows = self.lock()?.statistics.clone();
        rows.sort_by_key(|row| row.position);
        Ok(rows)
    }

    async fn quotes(&self) -> Result<Vec<Quote>, StoreError> {
        let mut rows = self.lock()?.quotes.clone();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }
}

#[async_trait]
impl LearningEventRepository for InMemoryStore {
    async fn record(&self, event: &LearningEvent) -> Result<(), StoreError> {
        self.lock()?.events.push(event.clone());
        Ok(())
    }
}
