//! Shared HTTP adapter state.
//!
//! Handlers receive this state through `web::Data` and only talk to domain
//! services, so they stay testable against the in-memory store.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AssessmentRepository, AuthGateway, BlogRepository, CatalogueRepository, CoinLedger,
    ContentRepository, ForumRepository, LearningEventRepository, ProfileRepository,
    ResourceRepository, SubmissionRepository,
};
use crate::domain::{
    AccountService, AdminService, AssessmentService, BlogService, CatalogueService,
    ContentService, ForumService, LearningEventRecorder, ResourceService, RewardsService,
    RoleGate, SubmissionService,
};

/// Parameter object bundling one implementation of every port.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthGateway>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub catalogue: Arc<dyn CatalogueRepository>,
    pub assessments: Arc<dyn AssessmentRepository>,
    pub resources: Arc<dyn ResourceRepository>,
    pub ledger: Arc<dyn CoinLedger>,
    pub forum: Arc<dyn ForumRepository>,
    pub blog: Arc<dyn BlogRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub content: Arc<dyn ContentRepository>,
    pub events: Arc<dyn LearningEventRepository>,
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: AccountService,
    pub catalogue: CatalogueService,
    pub assessments: AssessmentService,
    pub rewards: RewardsService,
    pub resources: ResourceService,
    pub forum: ForumService,
    pub blog: BlogService,
    pub submissions: SubmissionService,
    pub content: ContentService,
    pub admin: AdminService,
    pub gate: RoleGate,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Wire every domain service from one set of ports.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            profiles,
            catalogue,
            assessments,
            resources,
            ledger,
            forum,
            blog,
            submissions,
            content,
            events,
            clock,
        } = ports;
        let recorder = LearningEventRecorder::new(events, clock.clone());
        let rewards = RewardsService::new(ledger, profiles.clone(), clock.clone());
        let catalogue_service = CatalogueService::new(
            catalogue.clone(),
            assessments.clone(),
            resources.clone(),
            recorder.clone(),
        );
        Self {
            accounts: AccountService::new(auth, profiles.clone(), clock.clone()),
            assessments: AssessmentService::new(
                catalogue.clone(),
                assessments.clone(),
                catalogue_service.clone(),
                rewards.clone(),
                recorder.clone(),
                clock.clone(),
            ),
            catalogue: catalogue_service,
            resources: ResourceService::new(resources.clone(), rewards.clone(), recorder),
            rewards,
            forum: ForumService::new(forum, clock.clone()),
            blog: BlogService::new(blog, clock.clone()),
            submissions: SubmissionService::new(submissions, clock.clone()),
            content: ContentService::new(content, clock.clone()),
            admin: AdminService::new(profiles.clone(), catalogue, assessments, resources, clock),
            gate: RoleGate::new(profiles),
        }
    }
}
