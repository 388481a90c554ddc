//! Builders for the HTTP state ports of each store backend.

use std::sync::Arc;

use mockable::Clock;

use crate::inbound::http::state::HttpStatePorts;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::rest::{
    RestAssessmentRepository, RestAuthGateway, RestBlogRepository, RestCatalogueRepository,
    RestCoinLedger, RestContentRepository, RestForumRepository, RestLearningEventRepository,
    RestProfileRepository, RestResourceRepository, RestStoreClient, RestSubmissionRepository,
};

/// Every port served by one shared in-memory store.
pub fn in_memory_ports(store: &InMemoryStore, clock: Arc<dyn Clock>) -> HttpStatePorts {
    let store = Arc::new(store.clone());
    HttpStatePorts {
        auth: store.clone(),
        profiles: store.clone(),
        catalogue: store.clone(),
        assessments: store.clone(),
        resources: store.clone(),
        ledger: store.clone(),
        forum: store.clone(),
        blog: store.clone(),
        submissions: store.clone(),
        content: store.clone(),
        events: store,
        clock,
    }
}

/// Every port backed by the hosted table store behind `client`.
pub fn rest_ports(client: &RestStoreClient, clock: Arc<dyn Clock>) -> HttpStatePorts {
    HttpStatePorts {
        auth: Arc::new(RestAuthGateway::new(client.clone())),
        profiles: Arc::new(RestProfileRepository::new(client.clone())),
        catalogue: Arc::new(RestCatalogueRepository::new(client.clone())),
        assessments: Arc::new(RestAssessmentRepository::new(client.clone())),
        resources: Arc::new(RestResourceRepository::new(client.clone())),
        ledger: Arc::new(RestCoinLedger::new(client.clone())),
        forum: Arc::new(RestForumRepository::new(client.clone())),
        blog: Arc::new(RestBlogRepository::new(client.clone())),
        submissions: Arc::new(RestSubmissionRepository::new(client.clone())),
        content: Arc::new(RestContentRepository::new(client.clone())),
        events: Arc::new(RestLearningEventRepository::new(client.clone())),
        clock,
    }
}
