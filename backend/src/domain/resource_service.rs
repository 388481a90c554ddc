//! Downloadable resources.

use std::sync::Arc;

use super::ports::ResourceRepository;
use super::{
    CoinAward, Error, LearningEventKind, LearningEventRecorder, LessonId, Resource, ResourceId,
    RewardsService, UserId,
};

/// Where to fetch a resource and what the download earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_url: String,
    pub coins_awarded: i64,
}

/// Lists resources and handles downloads.
#[derive(Clone)]
pub struct ResourceService {
    resources: Arc<dyn ResourceRepository>,
    rewards: RewardsService,
    events: LearningEventRecorder,
}

impl ResourceService {
    /// Create the service.
    pub fn new(
        resources: Arc<dyn ResourceRepository>,
        rewards: RewardsService,
        events: LearningEventRecorder,
    ) -> Self {
        Self {
            resources,
            rewards,
            events,
        }
    }

    /// Every resource, newest first.
    pub async fn list(&self) -> Result<Vec<Resource>, Error> {
        Ok(self.resources.list().await?)
    }

    /// Resources attached to `lesson_id`.
    pub async fn list_for_lesson(&self, lesson_id: &LessonId) -> Result<Vec<Resource>, Error> {
        Ok(self.resources.list_for_lesson(lesson_id).await?)
    }

    /// Resolve a download. Signed-in users earn coins and leave a learning
    /// event; anonymous callers only get the URL.
    pub async fn download(
        &self,
        resource_id: &ResourceId,
        user: Option<UserId>,
    ) -> Result<Download, Error> {
        let resource = self
            .resources
            .find(resource_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("resource {resource_id} not found")))?;
        let Some(user_id) = user else {
            return Ok(Download {
                file_url: resource.file_url,
                coins_awarded: 0,
            });
        };

        let award = CoinAward::for_download(user_id, resource.id);
        self.rewards.award(&award).await?;
        self.events
            .record(
                user_id,
                LearningEventKind::ResourceDownloaded,
                *resource.id.as_uuid(),
                None,
            )
            .await;
        Ok(Download {
            file_url: resource.file_url,
            coins_awarded: award.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCoinLedger, MockProfileRepository, MockResourceRepository};
    use crate::domain::test_support::{FixtureClock, clock, permissive_recorder};
    use crate::domain::{COINS_PER_DOWNLOAD, ErrorCode, LocalizedText};

    fn resource() -> Resource {
        Resource {
            id: ResourceId::random(),
            title: LocalizedText::english("Go-bag checklist"),
            description: LocalizedText::default(),
            file_url: "https://files.example.org/go-bag.pdf".to_owned(),
            lesson_id: None,
            created_at: FixtureClock::default().0,
        }
    }

    fn service(resources: MockResourceRepository, ledger: MockCoinLedger) -> ResourceService {
        let rewards = RewardsService::new(
            Arc::new(ledger),
            Arc::new(MockProfileRepository::new()),
            clock(),
        );
        ResourceService::new(Arc::new(resources), rewards, permissive_recorder())
    }

    fn repository_with(found: Resource) -> MockResourceRepository {
        let mut resources = MockResourceRepository::new();
        resources
            .expect_find()
            .times(1)
            .return_once(move |_| Ok(Some(found)));
        resources
    }

    #[tokio::test]
    async fn signed_in_download_awards_coins() {
        let found = resource();
        let id = found.id;
        let mut ledger = MockCoinLedger::new();
        ledger
            .expect_award()
            .withf(move |award, _| {
                award.amount == COINS_PER_DOWNLOAD && award.subject_id == Some(*id.as_uuid())
            })
            .times(1)
            .return_once(|_, _| Ok(2));

        let download = service(repository_with(found), ledger)
            .download(&id, Some(UserId::random()))
            .await
            .expect("download");
        assert_eq!(download.coins_awarded, COINS_PER_DOWNLOAD);
        assert!(download.file_url.ends_with("go-bag.pdf"));
    }

    #[tokio::test]
    async fn anonymous_download_only_returns_url() {
        let found = resource();
        let id = found.id;
        let download = service(repository_with(found), MockCoinLedger::new())
            .download(&id, None)
            .await
            .expect("download");
        assert_eq!(download.coins_awarded, 0);
    }

    #[tokio::test]
    async fn unknown_resource_is_not_found() {
        let mut resources = MockResourceRepository::new();
        resources.expect_find().times(1).return_once(|_| Ok(None));
        let error = service(resources, MockCoinLedger::new())
            .download(&ResourceId::random(), None)
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
