//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod assessment_repository;
mod auth_gateway;
mod blog_repository;
mod catalogue_repository;
mod coin_ledger;
mod content_repository;
mod forum_repository;
mod learning_event_repository;
mod profile_repository;
mod resource_repository;
mod store_error;
mod submission_repository;

pub use assessment_repository::AssessmentRepository;
#[cfg(test)]
pub use assessment_repository::MockAssessmentRepository;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{AuthGateway, AuthGatewayError};
pub use blog_repository::BlogRepository;
#[cfg(test)]
pub use blog_repository::MockBlogRepository;
pub use catalogue_repository::CatalogueRepository;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use coin_ledger::CoinLedger;
#[cfg(test)]
pub use coin_ledger::MockCoinLedger;
pub use content_repository::ContentRepository;
#[cfg(test)]
pub use content_repository::MockContentRepository;
pub use forum_repository::ForumRepository;
#[cfg(test)]
pub use forum_repository::MockForumRepository;
pub use learning_event_repository::LearningEventRepository;
#[cfg(test)]
pub use learning_event_repository::MockLearningEventRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::ProfileRepository;
#[cfg(test)]
pub use resource_repository::MockResourceRepository;
pub use resource_repository::ResourceRepository;
pub use store_error::StoreError;
#[cfg(test)]
pub use submission_repository::MockSubmissionRepository;
pub use submission_repository::SubmissionRepository;
