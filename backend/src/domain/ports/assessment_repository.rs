//! Port for the `mcqs` and `mcq_answers` tables.

use async_trait::async_trait;

use crate::domain::{LessonId, Mcq, McqAnswerRecord, McqId};

use super::StoreError;

/// Question and answer persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Questions of a lesson ordered by position.
    async fn list_mcqs(&self, lesson: &LessonId) -> Result<Vec<Mcq>, StoreError>;

    /// Fetch a question by id.
    async fn find_mcq(&self, id: &McqId) -> Result<Option<Mcq>, StoreError>;

    /// Insert a question.
    async fn insert_mcq(&self, mcq: &Mcq) -> Result<(), StoreError>;

    /// Insert answer rows in one request.
    async fn insert_answers(&self, answers: &[McqAnswerRecord]) -> Result<(), StoreError>;
}
