//! Public form submission handlers.
//!
//! ```text
//! POST /api/v1/donations
//! POST /api/v1/partnerships
//! POST /api/v1/contact
//! POST /api/v1/mentors
//! ```
//!
//! None of these require a session. Each returns `201` with a receipt.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, ContactForm, DonationForm, MentorForm, PartnershipForm, SubmissionReceipt,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Donation pledge.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DonationRequest {
    /// Positive number or numeric string.
    #[schema(value_type = f64, example = 1500)]
    pub amount: Value,
    /// Defaults to `NPR`.
    pub currency: Option<String>,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub donor_phone: Option<String>,
    pub message: Option<String>,
    /// Anonymous pledges drop name, e-mail and phone.
    pub is_anonymous: bool,
}

impl From<DonationRequest> for DonationForm {
    fn from(value: DonationRequest) -> Self {
        Self {
            amount: value.amount,
            currency: value.currency,
            donor_name: value.donor_name,
            donor_email: value.donor_email,
            donor_phone: value.donor_phone,
            message: value.message,
            is_anonymous: value.is_anonymous,
        }
    }
}

/// Partnership application.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PartnershipRequest {
    pub organization_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub proposal: String,
}

impl From<PartnershipRequest> for PartnershipForm {
    fn from(value: PartnershipRequest) -> Self {
        Self {
            organization_name: value.organization_name,
            contact_name: value.contact_name,
            email: value.email,
            phone: value.phone,
            website: value.website,
            proposal: value.proposal,
        }
    }
}

/// Contact message.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<ContactRequest> for ContactForm {
    fn from(value: ContactRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

/// Mentor application.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct MentorRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub expertise: String,
    pub motivation: Option<String>,
}

impl From<MentorRequest> for MentorForm {
    fn from(value: MentorRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            expertise: value.expertise,
            motivation: value.motivation,
        }
    }
}

/// Acknowledgement of a stored submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub id: String,
    pub received_at: String,
}

impl From<SubmissionReceipt> for ReceiptResponse {
    fn from(value: SubmissionReceipt) -> Self {
        Self {
            id: value.id.to_string(),
            received_at: value.received_at.to_rfc3339(),
        }
    }
}

fn created(receipt: SubmissionReceipt) -> HttpResponse {
    HttpResponse::Created().json(ReceiptResponse::from(receipt))
}

/// Record a donation pledge.
#[utoipa::path(
    post,
    path = "/api/v1/donations",
    request_body = DonationRequest,
    responses(
        (status = 201, description = "Stored", body = ReceiptResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["forms"],
    operation_id = "donate",
    security([])
)]
#[post("/donations")]
pub async fn donate(
    state: web::Data<HttpState>,
    payload: web::Json<DonationRequest>,
) -> ApiResult<HttpResponse> {
    let form = DonationForm::from(payload.into_inner());
    Ok(created(state.submissions.donate(&form).await?))
}

/// Apply for a partnership.
#[utoipa::path(
    post,
    path = "/api/v1/partnerships",
    request_body = PartnershipRequest,
    responses(
        (status = 201, description = "Stored", body = ReceiptResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["forms"],
    operation_id = "applyForPartnership",
    security([])
)]
#[post("/partnerships")]
pub async fn apply_for_partnership(
    state: web::Data<HttpState>,
    payload: web::Json<PartnershipRequest>,
) -> ApiResult<HttpResponse> {
    let form = PartnershipForm::from(payload.into_inner());
    Ok(created(state.submissions.apply_for_partnership(&form).await?))
}

/// Send a contact message.
#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Stored", body = ReceiptResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["forms"],
    operation_id = "contact",
    security([])
)]
#[post("/contact")]
pub async fn contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let form = ContactForm::from(payload.into_inner());
    Ok(created(state.submissions.contact(&form).await?))
}

/// Apply to become a mentor.
#[utoipa::path(
    post,
    path = "/api/v1/mentors",
    request_body = MentorRequest,
    responses(
        (status = 201, description = "Stored", body = ReceiptResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["forms"],
    operation_id = "applyAsMentor",
    security([])
)]
#[post("/mentors")]
pub async fn apply_as_mentor(
    state: web::Data<HttpState>,
    payload: web::Json<MentorRequest>,
) -> ApiResult<HttpResponse> {
    let form = MentorForm::from(payload.into_inner());
    Ok(created(state.submissions.apply_as_mentor(&form).await?))
}
