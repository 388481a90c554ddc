//! Port for the form submission tables.

use async_trait::async_trait;

use crate::domain::{
    ContactMessage, Donation, MentorApplication, PartnershipApplication, SubmissionReceipt,
};

use super::StoreError;

/// Write-only storage for public forms.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert into `donations`.
    async fn insert_donation(
        &self,
        receipt: &SubmissionReceipt,
        donation: &Donation,
    ) -> Result<(), StoreError>;

    /// Insert into `partnership_applications`.
    async fn insert_partnership(
        &self,
        receipt: &SubmissionReceipt,
        application: &PartnershipApplication,
    ) -> Result<(), StoreError>;

    /// Insert into `contact_messages`.
    async fn insert_contact(
        &self,
        receipt: &SubmissionReceipt,
        message: &ContactMessage,
    ) -> Result<(), StoreError>;

    /// Insert into `mentor_applications`.
    async fn insert_mentor(
        &self,
        receipt: &SubmissionReceipt,
        application: &MentorApplication,
    ) -> Result<(), StoreError>;
}
