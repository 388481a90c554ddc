//! Learning activity events.
//!
//! Events are best effort: a failed write is logged and never fails the
//! request that triggered it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use super::UserId;
use super::ports::LearningEventRepository;

/// What the learner did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningEventKind {
    /// A lesson page was opened.
    LessonViewed,
    /// A lesson assessment was graded.
    AssessmentSubmitted,
    /// A resource was downloaded.
    ResourceDownloaded,
    /// A single question was answered.
    McqAnswered,
}

impl LearningEventKind {
    /// Snake-case name stored in the `event_type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LessonViewed => "lesson_viewed",
            Self::AssessmentSubmitted => "assessment_submitted",
            Self::ResourceDownloaded => "resource_downloaded",
            Self::McqAnswered => "mcq_answered",
        }
    }
}

/// A row of the `learning_events` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningEvent {
    pub id: Uuid,
    pub user_id: UserId,
    pub kind: LearningEventKind,
    pub subject_id: Uuid,
    pub metadata: Option<Value>,
    pub occurred_at: DateTime<Utc>,
}

/// Records learning events without surfacing failures.
#[derive(Clone)]
pub struct LearningEventRecorder {
    events: Arc<dyn LearningEventRepository>,
    clock: Arc<dyn Clock>,
}

impl LearningEventRecorder {
    /// Create a recorder writing to `events`.
    pub fn new(events: Arc<dyn LearningEventRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { events, clock }
    }

    /// Record `kind` for `user_id` about `subject_id`.
    pub async fn record(
        &self,
        user_id: UserId,
        kind: LearningEventKind,
        subject_id: Uuid,
        metadata: Option<Value>,
    ) {
        let event = LearningEvent {
            id: Uuid::new_v4(),
            user_id,
            kind,
            subject_id,
            metadata,
            occurred_at: self.clock.utc(),
        };
        match self.events.record(&event).await {
            Ok(()) => debug!(kind = kind.as_str(), %user_id, %subject_id, "learning event recorded"),
            Err(error) => warn!(
                %error,
                kind = kind.as_str(),
                %user_id,
                %subject_id,
                "failed to record learning event"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockLearningEventRepository, StoreError};
    use mockable::DefaultClock;

    #[tokio::test]
    async fn record_swallows_store_failures() {
        let mut repo = MockLearningEventRepository::new();
        repo.expect_record()
            .times(1)
            .return_once(|_| Err(StoreError::connection("store offline")));
        let recorder = LearningEventRecorder::new(Arc::new(repo), Arc::new(DefaultClock));

        recorder
            .record(
                UserId::random(),
                LearningEventKind::LessonViewed,
                Uuid::new_v4(),
                None,
            )
            .await;
    }

    #[tokio::test]
    async fn record_passes_kind_and_subject() {
        let subject = Uuid::new_v4();
        let mut repo = MockLearningEventRepository::new();
        repo.expect_record()
            .withf(move |event| {
                event.kind == LearningEventKind::ResourceDownloaded && event.subject_id == subject
            })
            .times(1)
            .return_once(|_| Ok(()));
        let recorder = LearningEventRecorder::new(Arc::new(repo), Arc::new(DefaultClock));

        recorder
            .record(
                UserId::random(),
                LearningEventKind::ResourceDownloaded,
                subject,
                None,
            )
            .await;
    }
}
