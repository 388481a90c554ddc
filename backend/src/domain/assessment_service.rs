//! Lesson assessments and single-question answers.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::ports::{AssessmentRepository, CatalogueRepository};
use super::{
    AnswerKey, AssessmentScore, CatalogueService, CoinAward, Error, GradedAnswer, GradingError,
    LearningEventKind, LearningEventRecorder, LessonId, Mcq, McqAnswerRecord, McqId, McqKind,
    RewardsService, UserId, grade,
};

/// Result of a graded lesson assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentOutcome {
    pub score: AssessmentScore,
    pub coins_awarded: i64,
    /// Next lesson in outline order; only set when the assessment passed.
    pub next_lesson_id: Option<LessonId>,
}

/// Result of answering one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McqAnswerOutcome {
    pub mcq_id: McqId,
    pub is_correct: bool,
    pub coins_awarded: i64,
}

/// Grades submissions, stores answers and awards EduCoins.
#[derive(Clone)]
pub struct AssessmentService {
    catalogue: Arc<dyn CatalogueRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    outlines: CatalogueService,
    rewards: RewardsService,
    events: LearningEventRecorder,
    clock: Arc<dyn Clock>,
}

impl From<GradingError> for Error {
    fn from(value: GradingError) -> Self {
        let message = value.to_string();
        match value {
            GradingError::NoQuestions => Self::invalid_request(message),
            GradingError::UnknownQuestion { id } => Self::invalid_request(message).with_details(
                json!({ "field": "answers", "code": "unknown_question", "mcqId": id }),
            ),
            GradingError::DuplicateAnswer { id } => Self::invalid_request(message).with_details(
                json!({ "field": "answers", "code": "duplicate_answer", "mcqId": id }),
            ),
        }
    }
}

impl AssessmentService {
    /// Create the service.
    pub fn new(
        catalogue: Arc<dyn CatalogueRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        outlines: CatalogueService,
        rewards: RewardsService,
        events: LearningEventRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalogue,
            assessments,
            outlines,
            rewards,
            events,
            clock,
        }
    }

    /// Assessment questions of a lesson in a published course, in order.
    pub async fn questions(&self, lesson_id: &LessonId) -> Result<Vec<Mcq>, Error> {
        let lesson = self
            .catalogue
            .find_lesson(lesson_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("lesson {lesson_id} not found")))?;
        self.outlines.published_outline_of(&lesson).await?;
        Ok(self
            .assessments
            .list_mcqs(lesson_id)
            .await?
            .into_iter()
            .filter(|mcq| mcq.kind == McqKind::Assessment)
            .collect())
    }

    /// Grade `answers` for `lesson_id` and apply the consequences.
    ///
    /// Unanswered questions count as wrong. Passing (80 or more) unlocks the
    /// next lesson. Lessons outside a published course are not found, and
    /// nothing is stored or awarded for them.
    pub async fn submit(
        &self,
        user_id: UserId,
        lesson_id: &LessonId,
        answers: &[(McqId, AnswerKey)],
    ) -> Result<AssessmentOutcome, Error> {
        let lesson = self
            .catalogue
            .find_lesson(lesson_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("lesson {lesson_id} not found")))?;
        let outline = self.outlines.published_outline_of(&lesson).await?;
        let mcqs = self.assessments.list_mcqs(lesson_id).await?;
        let grading = grade(&mcqs, answers)?;

        let now = self.clock.utc();
        let records: Vec<_> = grading
            .answers
            .iter()
            .map(|answer| McqAnswerRecord::new(user_id, *answer, now))
            .collect();
        if !records.is_empty() {
            self.assessments.insert_answers(&records).await?;
        }

        let score = grading.score;
        let coins_awarded = match CoinAward::for_correct_answers(
            user_id,
            score.correct,
            Some(*lesson.id.as_uuid()),
        ) {
            Some(award) => {
                self.rewards.award(&award).await?;
                award.amount
            }
            None => 0,
        };

        self.events
            .record(
                user_id,
                LearningEventKind::AssessmentSubmitted,
                *lesson.id.as_uuid(),
                Some(json!({
                    "score": score.score,
                    "correct": score.correct,
                    "total": score.total,
                    "passed": score.passed,
                })),
            )
            .await;

        let next_lesson_id = if score.passed {
            outline.neighbours(lesson.id).and_then(|around| around.next)
        } else {
            None
        };

        info!(
            %user_id,
            lesson_id = %lesson.id,
            score = score.score,
            passed = score.passed,
            "assessment graded"
        );
        Ok(AssessmentOutcome {
            score,
            coins_awarded,
            next_lesson_id,
        })
    }

    /// Check one answer, store it and award coins when correct.
    ///
    /// Questions of lessons outside a published course are not found.
    pub async fn answer_mcq(
        &self,
        user_id: UserId,
        mcq_id: &McqId,
        selected: AnswerKey,
    ) -> Result<McqAnswerOutcome, Error> {
        let mcq = self
            .assessments
            .find_mcq(mcq_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("question {mcq_id} not found")))?;
        let lesson = self
            .catalogue
            .find_lesson(&mcq.lesson_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("question {mcq_id} not found")))?;
        self.outlines.published_outline_of(&lesson).await?;
        let is_correct = mcq.is_correct(selected);
        let answer = GradedAnswer {
            mcq_id: mcq.id,
            selected,
            is_correct,
        };
        let record = McqAnswerRecord::new(user_id, answer, self.clock.utc());
        self.assessments.insert_answers(&[record]).await?;

        let coins_awarded = if is_correct {
            match CoinAward::for_correct_answers(user_id, 1, Some(*mcq.id.as_uuid())) {
                Some(award) => {
                    self.rewards.award(&award).await?;
                    award.amount
                }
                None => 0,
            }
        } else {
            0
        };

        self.events
            .record(
                user_id,
                LearningEventKind::McqAnswered,
                *mcq.id.as_uuid(),
                Some(json!({ "selected": selected.as_str(), "isCorrect": is_correct })),
            )
            .await;

        Ok(McqAnswerOutcome {
            mcq_id: mcq.id,
            is_correct,
            coins_awarded,
        })
    }
}
