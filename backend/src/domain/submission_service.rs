//! Public form submissions.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::SubmissionRepository;
use super::{ContactForm, DonationForm, Error, MentorForm, PartnershipForm, SubmissionReceipt};

/// Validates and stores donation, partnership, contact and mentor forms.
#[derive(Clone)]
pub struct SubmissionService {
    submissions: Arc<dyn SubmissionRepository>,
    clock: Arc<dyn Clock>,
}

impl SubmissionService {
    /// Create the service.
    pub fn new(submissions: Arc<dyn SubmissionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { submissions, clock }
    }

    /// Record a donation pledge.
    pub async fn donate(&self, form: &DonationForm) -> Result<SubmissionReceipt, Error> {
        let donation = form.validate()?;
        let receipt = SubmissionReceipt::new(self.clock.utc());
        self.submissions.insert_donation(&receipt, &donation).await?;
        info!(
            submission_id = %receipt.id,
            currency = %donation.currency,
            anonymous = donation.is_anonymous,
            "donation recorded"
        );
        Ok(receipt)
    }

    /// Record a partnership application.
    pub async fn apply_for_partnership(
        &self,
        form: &PartnershipForm,
    ) -> Result<SubmissionReceipt, Error> {
        let application = form.validate()?;
        let receipt = SubmissionReceipt::new(self.clock.utc());
        self.submissions
            .insert_partnership(&receipt, &application)
            .await?;
        info!(submission_id = %receipt.id, "partnership application recorded");
        Ok(receipt)
    }

    /// Record a contact message.
    pub async fn contact(&self, form: &ContactForm) -> Result<SubmissionReceipt, Error> {
        let message = form.validate()?;
        let receipt = SubmissionReceipt::new(self.clock.utc());
        self.submissions.insert_contact(&receipt, &message).await?;
        info!(submission_id = %receipt.id, "contact message recorded");
        Ok(receipt)
    }

    /// Record a mentor application.
    pub async fn apply_as_mentor(&self, form: &MentorForm) -> Result<SubmissionReceipt, Error> {
        let application = form.validate()?;
        let receipt = SubmissionReceipt::new(self.clock.utc());
        self.submissions.insert_mentor(&receipt, &application).await?;
        info!(submission_id = %receipt.id, "mentor application recorded");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockSubmissionRepository;
    use crate::domain::test_support::{FixtureClock, clock};
    use serde_json::json;

    #[tokio::test]
    async fn anonymous_donation_is_stored_without_identity() {
        let mut submissions = MockSubmissionRepository::new();
        submissions
            .expect_insert_donation()
            .withf(|receipt, donation| {
                receipt.received_at == FixtureClock::default().0
                    && donation.donor_name.is_none()
                    && donation.donor_email.is_none()
                    && (donation.amount.value() - 750.0).abs() < f64::EPSILON
            })
            .times(1)
            .return_once(|_, _| Ok(()));
        let form = DonationForm {
            amount: json!("750"),
            donor_name: Some("Hari".to_owned()),
            is_anonymous: true,
            ..DonationForm::default()
        };
        SubmissionService::new(Arc::new(submissions), clock())
            .donate(&form)
            .await
            .expect("stored");
    }

    #[tokio::test]
    async fn empty_contact_form_never_reaches_store() {
        let error = SubmissionService::new(Arc::new(MockSubmissionRepository::new()), clock())
            .contact(&ContactForm::default())
            .await
            .expect_err("blank");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details().and_then(|details| details.get("field")),
            Some(&json!("name"))
        );
    }

    #[tokio::test]
    async fn mentor_application_is_stored() {
        let mut submissions = MockSubmissionRepository::new();
        submissions
            .expect_insert_mentor()
            .withf(|_, application| application.expertise == "First aid")
            .times(1)
            .return_once(|_, _| Ok(()));
        let form = MentorForm {
            name: "Maya".to_owned(),
            email: "maya@example.org".to_owned(),
            expertise: " First aid ".to_owned(),
            ..MentorForm::default()
        };
        SubmissionService::new(Arc::new(submissions), clock())
            .apply_as_mentor(&form)
            .await
            .expect("stored");
    }
}
