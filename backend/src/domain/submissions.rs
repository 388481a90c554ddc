//! Donation, partnership, contact and mentor forms.
//!
//! Every form trims its input and rejects blank required fields. Validated
//! forms are stored as-is together with a [`SubmissionReceipt`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::forms::{FieldError, optional, required};
use super::{EmailAddress, SubmissionId};

/// Currency recorded when the donor does not choose one.
pub const DEFAULT_CURRENCY: &str = "NPR";

/// Identifier and timestamp assigned to a stored submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: SubmissionId,
    pub received_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    /// Fresh receipt stamped at `received_at`.
    #[must_use]
    pub fn new(received_at: DateTime<Utc>) -> Self {
        Self {
            id: SubmissionId::random(),
            received_at,
        }
    }
}

/// Positive, finite donation amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonationAmount(f64);

impl DonationAmount {
    /// Validate a numeric amount.
    pub fn new(value: f64) -> Result<Self, FieldError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(FieldError::Invalid { field: "amount" })
        }
    }

    /// Coerce a JSON number or numeric string.
    ///
    /// # Examples
    /// ```
    /// use eduwarn::domain::DonationAmount;
    /// use serde_json::json;
    ///
    /// let amount = DonationAmount::parse(&json!(" 1500.50 ")).expect("numeric string");
    /// assert!((amount.value() - 1500.5).abs() < f64::EPSILON);
    /// assert!(DonationAmount::parse(&json!("abc")).is_err());
    /// ```
    pub fn parse(raw: &Value) -> Result<Self, FieldError> {
        match raw {
            Value::Null => Err(FieldError::Missing { field: "amount" }),
            Value::Number(number) => number
                .as_f64()
                .ok_or(FieldError::Invalid { field: "amount" })
                .and_then(Self::new),
            Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(FieldError::Missing { field: "amount" });
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| FieldError::Invalid { field: "amount" })
                    .and_then(Self::new)
            }
            _ => Err(FieldError::Invalid { field: "amount" }),
        }
    }

    /// Amount as a float.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Raw donation input.
#[derive(Debug, Clone, Default)]
pub struct DonationForm {
    pub amount: Value,
    pub currency: Option<String>,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub donor_phone: Option<String>,
    pub message: Option<String>,
    pub is_anonymous: bool,
}

/// A row of the `donations` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub amount: DonationAmount,
    pub currency: String,
    pub donor_name: Option<String>,
    pub donor_email: Option<EmailAddress>,
    pub donor_phone: Option<String>,
    pub message: Option<String>,
    pub is_anonymous: bool,
}

impl DonationForm {
    /// Validate the donation. Anonymous donations drop name, e-mail and
    /// phone; other donations require a name and a valid e-mail.
    pub fn validate(&self) -> Result<Donation, FieldError> {
        let amount = DonationAmount::parse(&self.amount)?;
        let currency = optional(self.currency.as_deref())
            .map_or_else(|| DEFAULT_CURRENCY.to_owned(), |code| code.to_ascii_uppercase());
        let message = optional(self.message.as_deref());
        if self.is_anonymous {
            return Ok(Donation {
                amount,
                currency,
                donor_name: None,
                donor_email: None,
                donor_phone: None,
                message,
                is_anonymous: true,
            });
        }
        let donor_name = required("donorName", self.donor_name.as_deref().unwrap_or_default())?;
        let donor_email = EmailAddress::parse(
            "donorEmail",
            self.donor_email.as_deref().unwrap_or_default(),
        )?;
        Ok(Donation {
            amount,
            currency,
            donor_name: Some(donor_name),
            donor_email: Some(donor_email),
            donor_phone: optional(self.donor_phone.as_deref()),
            message,
            is_anonymous: false,
        })
    }
}

/// Raw partnership application input.
#[derive(Debug, Clone, Default)]
pub struct PartnershipForm {
    pub organization_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub proposal: String,
}

/// A row of the `partnership_applications` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipApplication {
    pub organization_name: String,
    pub contact_name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub proposal: String,
}

impl PartnershipForm {
    /// Validate the application.
    pub fn validate(&self) -> Result<PartnershipApplication, FieldError> {
        Ok(PartnershipApplication {
            organization_name: required("organizationName", &self.organization_name)?,
            contact_name: required("contactName", &self.contact_name)?,
            email: EmailAddress::parse("email", &self.email)?,
            phone: optional(self.phone.as_deref()),
            website: optional(self.website.as_deref()),
            proposal: required("proposal", &self.proposal)?,
        })
    }
}

/// Raw contact message input.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A row of the `contact_messages` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: EmailAddress,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Validate the message.
    pub fn validate(&self) -> Result<ContactMessage, FieldError> {
        Ok(ContactMessage {
            name: required("name", &self.name)?,
            email: EmailAddress::parse("email", &self.email)?,
            subject: required("subject", &self.subject)?,
            message: required("message", &self.message)?,
        })
    }
}

/// Raw mentor application input.
#[derive(Debug, Clone, Default)]
pub struct MentorForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub expertise: String,
    pub motivation: Option<String>,
}

/// A row of the `mentor_applications` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorApplication {
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub expertise: String,
    pub motivation: Option<String>,
}

impl MentorForm {
    /// Validate the application.
    pub fn validate(&self) -> Result<MentorApplication, FieldError> {
        Ok(MentorApplication {
            name: required("name", &self.name)?,
            email: EmailAddress::parse("email", &self.email)?,
            phone: optional(self.phone.as_deref()),
            expertise: required("expertise", &self.expertise)?,
            motivation: optional(self.motivation.as_deref()),
        })
    }
}
