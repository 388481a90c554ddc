//! Multiple-choice questions and lesson assessment scoring.
//!
//! Only assessment-kind questions count toward a lesson's score. Unanswered
//! questions count as wrong. The score is `correct / total * 100` rounded
//! half up to an integer and a lesson is passed at [`PASS_THRESHOLD`].

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalogue::localized;
use super::forms::{FieldError, optional};
use super::{Language, LessonId, LocalizedText, McqId, UserId};

/// Minimum score, in percent, that unlocks the next lesson.
pub const PASS_THRESHOLD: u8 = 80;

/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Answer key of a four-option question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
    /// First option.
    A,
    /// Second option.
    B,
    /// Third option.
    C,
    /// Fourth option.
    D,
}

impl AnswerKey {
    /// Letter stored in the `correct_option` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Parse a letter `A`..`D`, case-insensitively.
    ///
    /// # Examples
    /// ```
    /// use eduwarn::domain::AnswerKey;
    ///
    /// assert_eq!(AnswerKey::parse("selected", " c "), Ok(AnswerKey::C));
    /// assert!(AnswerKey::parse("selected", "E").is_err());
    /// ```
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, FieldError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "" => Err(FieldError::Missing { field }),
            _ => Err(FieldError::Invalid { field }),
        }
    }
}

/// Whether a question is a warm-up or part of the graded assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McqKind {
    /// Shown with the lesson; answered one at a time.
    Introductory,
    /// Graded together at the end of the lesson.
    Assessment,
}

impl McqKind {
    /// Snake-case name stored in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Introductory => "introductory",
            Self::Assessment => "assessment",
        }
    }

    /// Parse a kind name; a missing value means an assessment question.
    pub fn parse(field: &'static str, raw: Option<&str>) -> Result<Self, FieldError> {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            None | Some("" | "assessment") => Ok(Self::Assessment),
            Some("introductory") => Ok(Self::Introductory),
            Some(_) => Err(FieldError::Invalid { field }),
        }
    }
}

/// A row of the `mcqs` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    pub id: McqId,
    pub lesson_id: LessonId,
    pub question: LocalizedText,
    pub options: [LocalizedText; OPTION_COUNT],
    pub correct: AnswerKey,
    pub kind: McqKind,
    pub position: i32,
}

/// Question as shown to learners, without its answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McqPrompt {
    pub id: McqId,
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub kind: McqKind,
}

impl Mcq {
    /// Whether `selected` is the correct option.
    #[must_use]
    pub fn is_correct(&self, selected: AnswerKey) -> bool {
        self.correct == selected
    }

    /// Learner-facing view in `language`.
    #[must_use]
    pub fn prompt(&self, language: Language) -> McqPrompt {
        McqPrompt {
            id: self.id,
            question: self.question.resolve(language).to_owned(),
            options: self
                .options
                .each_ref()
                .map(|option| option.resolve(language).to_owned()),
            kind: self.kind,
        }
    }
}

/// Score of a graded assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScore {
    pub score: u8,
    pub correct: u32,
    pub total: u32,
    pub passed: bool,
}

/// Score `correct` out of `total`, or `None` when `total` is zero or
/// `correct` exceeds it.
///
/// # Examples
/// ```
/// use eduwarn::domain::score;
///
/// let result = score(2, 3).expect("non-empty assessment");
/// assert_eq!(result.score, 67);
/// assert!(!result.passed);
/// assert!(score(4, 5).expect("non-empty").passed);
/// ```
#[must_use]
pub fn score(correct: u32, total: u32) -> Option<AssessmentScore> {
    if total == 0 || correct > total {
        return None;
    }
    // round(correct / total * 100) with halves rounded up, in integers.
    let numerator = u64::from(correct) * 200 + u64::from(total);
    let percent = numerator / (2 * u64::from(total));
    let score = u8::try_from(percent).ok()?;
    Some(AssessmentScore {
        score,
        correct,
        total,
        passed: score >= PASS_THRESHOLD,
    })
}

/// Reasons a submission cannot be graded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradingError {
    /// The lesson has no assessment questions.
    #[error("lesson has no assessment questions")]
    NoQuestions,
    /// An answer refers to a question outside the lesson's assessment.
    #[error("question {id} is not part of this assessment")]
    UnknownQuestion {
        /// Offending question id.
        id: McqId,
    },
    /// The same question was answered twice.
    #[error("question {id} was answered more than once")]
    DuplicateAnswer {
        /// Offending question id.
        id: McqId,
    },
}

/// One graded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradedAnswer {
    pub mcq_id: McqId,
    pub selected: AnswerKey,
    pub is_correct: bool,
}

/// Result of grading a lesson submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grading {
    pub score: AssessmentScore,
    pub answers: Vec<GradedAnswer>,
}

/// Grade `answers` against the assessment questions among `mcqs`.
pub fn grade(mcqs: &[Mcq], answers: &[(McqId, AnswerKey)]) -> Result<Grading, GradingError> {
    let assessment: HashMap<McqId, &Mcq> = mcqs
        .iter()
        .filter(|mcq| mcq.kind == McqKind::Assessment)
        .map(|mcq| (mcq.id, mcq))
        .collect();
    let total = u32::try_from(assessment.len()).unwrap_or(u32::MAX);
    let mut seen = HashSet::new();
    let mut graded = Vec::with_capacity(answers.len());
    for &(id, selected) in answers {
        let mcq = assessment
            .get(&id)
            .ok_or(GradingError::UnknownQuestion { id })?;
        if !seen.insert(id) {
            return Err(GradingError::DuplicateAnswer { id });
        }
        graded.push(GradedAnswer {
            mcq_id: id,
            selected,
            is_correct: mcq.is_correct(selected),
        });
    }
    let correct = u32::try_from(graded.iter().filter(|answer| answer.is_correct).count())
        .unwrap_or(u32::MAX);
    let score = score(correct, total).ok_or(GradingError::NoQuestions)?;
    Ok(Grading {
        score,
        answers: graded,
    })
}

/// A row of the `mcq_answers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqAnswerRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub mcq_id: McqId,
    pub selected: AnswerKey,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

impl McqAnswerRecord {
    /// Record a graded answer for `user_id`.
    #[must_use]
    pub fn new(user_id: UserId, answer: GradedAnswer, answered_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            mcq_id: answer.mcq_id,
            selected: answer.selected,
            is_correct: answer.is_correct,
            answered_at,
        }
    }
}

/// Raw question input from the admin surface.
#[derive(Debug, Clone)]
pub struct McqForm {
    pub question_en: String,
    pub question_ne: Option<String>,
    pub options_en: Vec<String>,
    pub options_ne: Option<Vec<String>>,
    pub correct: AnswerKey,
    pub kind: McqKind,
    pub position: Option<i32>,
}

impl McqForm {
    /// Validate into a question for `lesson_id`. Exactly four non-blank
    /// English options are required; Nepali options, when given, must also
    /// number four but may individually be blank.
    pub fn into_mcq(
        self,
        id: McqId,
        lesson_id: LessonId,
        default_position: i32,
    ) -> Result<Mcq, FieldError> {
        let question = localized("questionEn", &self.question_en, self.question_ne.as_deref())?;
        let english: [String; OPTION_COUNT] = self
            .options_en
            .try_into()
            .map_err(|_| FieldError::Invalid { field: "optionsEn" })?;
        if english.iter().any(|option| option.trim().is_empty()) {
            return Err(FieldError::Missing { field: "optionsEn" });
        }
        let nepali: [Option<String>; OPTION_COUNT] = match self.options_ne {
            None => Default::default(),
            Some(values) => {
                let values: [String; OPTION_COUNT] = values
                    .try_into()
                    .map_err(|_| FieldError::Invalid { field: "optionsNe" })?;
                values.map(|value| optional(Some(&value)))
            }
        };
        let mut nepali = nepali.into_iter();
        let options = english.map(|en| {
            LocalizedText::new(en.trim(), nepali.next().flatten())
        });
        Ok(Mcq {
            id,
            lesson_id,
            question,
            options,
            correct: self.correct,
            kind: self.kind,
            position: self.position.unwrap_or(default_position),
        })
    }
}
