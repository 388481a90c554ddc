//! `mcqs` and `mcq_answers` table adapter.

use async_trait::async_trait;

use crate::domain::ports::{AssessmentRepository, StoreError};
use crate::domain::{LessonId, Mcq, McqAnswerRecord, McqId};

use super::client::RestStoreClient;
use super::query::{Direction, TableQuery};
use super::rows::{McqAnswerRow, McqRow};

const MCQS: &str = "mcqs";
const ANSWERS: &str = "mcq_answers";

/// Store-backed [`AssessmentRepository`].
#[derive(Debug, Clone)]
pub struct RestAssessmentRepository {
    client: RestStoreClient,
}

impl RestAssessmentRepository {
    /// Create a repository sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssessmentRepository for RestAssessmentRepository {
    async fn list_mcqs(&self, lesson: &LessonId) -> Result<Vec<Mcq>, StoreError> {
        let query = TableQuery::new()
            .eq("lesson_id", lesson)
            .order("position", Direction::Asc);
        let rows: Vec<McqRow> = self.client.select(MCQS, &query).await?;
        Ok(rows.into_iter().map(Mcq::from).collect())
    }

    async fn find_mcq(&self, id: &McqId) -> Result<Option<Mcq>, StoreError> {
        let row: Option<McqRow> = self
            .client
            .select_one(MCQS, TableQuery::new().eq("id", id))
            .await?;
        Ok(row.map(Mcq::from))
    }

    async fn insert_mcq(&self, mcq: &Mcq) -> Result<(), StoreError> {
        self.client.insert(MCQS, &McqRow::from(mcq)).await
    }

    async fn insert_answers(&self, answers: &[McqAnswerRecord]) -> Result<(), StoreError> {
        if answers.is_empty() {
            return Ok(());
        }
        let rows: Vec<McqAnswerRow> = answers.iter().map(McqAnswerRow::from).collect();
        self.client.insert(ANSWERS, &rows).await
    }
}
