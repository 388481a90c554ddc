//! Adapters for the hosted PostgREST-style table store.
//!
//! One [`RestStoreClient`] is shared by every repository; it owns the pooled
//! reqwest client, the API key headers and the status mapping. Repositories
//! only translate between row shapes and domain types.

mod assessment_repository;
mod auth_gateway;
mod blog_repository;
mod catalogue_repository;
mod client;
mod coin_ledger;
mod content_repository;
mod forum_repository;
mod learning_event_repository;
mod profile_repository;
mod query;
mod resource_repository;
mod rows;
mod submission_repository;

pub use assessment_repository::RestAssessmentRepository;
pub use auth_gateway::RestAuthGateway;
pub use blog_repository::RestBlogRepository;
pub use catalogue_repository::RestCatalogueRepository;
pub use client::{RestStoreClient, StoreEndpoint};
pub use coin_ledger::RestCoinLedger;
pub use content_repository::RestContentRepository;
pub use forum_repository::RestForumRepository;
pub use learning_event_repository::RestLearningEventRepository;
pub use profile_repository::RestProfileRepository;
pub use query::{Direction, TableQuery};
pub use resource_repository::RestResourceRepository;
pub use submission_repository::RestSubmissionRepository;
