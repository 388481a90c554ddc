//! Form submission tables.

use async_trait::async_trait;

use crate::domain::ports::{StoreError, SubmissionRepository};
use crate::domain::{
    ContactMessage, Donation, MentorApplication, PartnershipApplication, SubmissionReceipt,
};

use super::client::RestStoreClient;
use super::rows::{ContactRow, DonationRow, MentorRow, PartnershipRow};

/// Store-backed [`SubmissionRepository`].
#[derive(Debug, Clone)]
pub struct RestSubmissionRepository {
    client: RestStoreClient,
}

impl RestSubmissionRepository {
    /// Create a repository sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubmissionRepository for RestSubmissionRepository {
    async fn insert_donation(
        &self,
        receipt: &SubmissionReceipt,
        donation: &Donation,
    ) -> Result<(), StoreError> {
        self.client
            .insert("donations", &DonationRow::new(receipt, donation))
            .await
    }

    async fn insert_partnership(
        &self,
        receipt: &SubmissionReceipt,
        application: &PartnershipApplication,
    ) -> Result<(), StoreError> {
        self.client
            .insert(
                "partnership_applications",
                &PartnershipRow::new(receipt, application),
            )
            .await
    }

    async fn insert_contact(
        &self,
        receipt: &SubmissionReceipt,
        message: &ContactMessage,
    ) -> Result<(), StoreError> {
        self.client
            .insert("contact_messages", &ContactRow::new(receipt, message))
            .await
    }

    async fn insert_mentor(
        &self,
        receipt: &SubmissionReceipt,
        application: &MentorApplication,
    ) -> Result<(), StoreError> {
        self.client
            .insert("mentor_applications", &MentorRow::new(receipt, application))
            .await
    }
}
