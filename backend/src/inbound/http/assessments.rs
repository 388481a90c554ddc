//! Lesson assessment and question answering handlers.
//!
//! ```text
//! GET  /api/v1/lessons/{id}/assessment
//! POST /api/v1/lessons/{id}/assessment
//! POST /api/v1/mcqs/{id}/answers
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AnswerKey, ApiResult, AssessmentOutcome, LessonId, McqAnswerOutcome, McqId, McqPrompt,
};
use crate::inbound::http::language::RequestLanguage;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Question as shown to learners; answer keys are never sent.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct McqPromptResponse {
    pub id: String,
    pub question: String,
    /// Options A to D in order.
    pub options: Vec<String>,
    /// `introductory` or `assessment`.
    pub kind: String,
}

impl From<McqPrompt> for McqPromptResponse {
    fn from(value: McqPrompt) -> Self {
        Self {
            id: value.id.to_string(),
            question: value.question,
            options: value.options.into(),
            kind: value.kind.as_str().to_owned(),
        }
    }
}

/// One selected option.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AnswerRequest {
    pub mcq_id: String,
    /// `A`, `B`, `C` or `D`.
    #[schema(example = "B")]
    pub selected: String,
}

/// Assessment submission.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct AssessmentRequest {
    pub answers: Vec<AnswerRequest>,
}

impl AssessmentRequest {
    fn parse(&self) -> ApiResult<Vec<(McqId, AnswerKey)>> {
        self.answers
            .iter()
            .map(|answer| {
                let id = parse_id(&answer.mcq_id, FieldName::new("mcqId"))?;
                let selected = AnswerKey::parse("selected", &answer.selected)?;
                Ok((id, selected))
            })
            .collect()
    }
}

/// Graded assessment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResultResponse {
    /// Percentage rounded half up.
    #[schema(example = 67)]
    pub score: u8,
    pub correct: u32,
    pub total: u32,
    /// `true` when the score is at least 80.
    pub passed: bool,
    pub coins_awarded: i64,
    /// Lesson unlocked by passing, if any.
    pub next_lesson_id: Option<String>,
}

impl From<AssessmentOutcome> for AssessmentResultResponse {
    fn from(value: AssessmentOutcome) -> Self {
        Self {
            score: value.score.score,
            correct: value.score.correct,
            total: value.score.total,
            passed: value.score.passed,
            coins_awarded: value.coins_awarded,
            next_lesson_id: value.next_lesson_id.map(|id| id.to_string()),
        }
    }
}

/// Single answer payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct McqAnswerRequest {
    #[schema(example = "A")]
    pub selected: String,
}

/// Result of answering one question.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct McqAnswerResponse {
    pub mcq_id: String,
    pub is_correct: bool,
    pub coins_awarded: i64,
}

impl From<McqAnswerOutcome> for McqAnswerResponse {
    fn from(value: McqAnswerOutcome) -> Self {
        Self {
            mcq_id: value.mcq_id.to_string(),
            is_correct: value.is_correct,
            coins_awarded: value.coins_awarded,
        }
    }
}

/// Assessment questions of a lesson.
#[utoipa::path(
    get,
    path = "/api/v1/lessons/{id}/assessment",
    params(
        ("id" = String, Path, description = "Lesson id"),
        ("lang" = Option<String>, Query, description = "`en` or `ne`")
    ),
    responses(
        (status = 200, description = "Questions in order", body = [McqPromptResponse]),
        (status = 404, description = "Unknown lesson or unpublished course", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "assessmentQuestions",
    security([])
)]
#[get("/lessons/{id}/assessment")]
pub async fn assessment_questions(
    state: web::Data<HttpState>,
    RequestLanguage(language): RequestLanguage,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<McqPromptResponse>>> {
    let lesson_id: LessonId = parse_id(path.as_str(), FieldName::new("id"))?;
    let questions = state.assessments.questions(&lesson_id).await?;
    Ok(web::Json(
        questions
            .iter()
            .map(|mcq| McqPromptResponse::from(mcq.prompt(language)))
            .collect(),
    ))
}

/// Grade a lesson assessment. Unanswered questions count as wrong.
#[utoipa::path(
    post,
    path = "/api/v1/lessons/{id}/assessment",
    params(("id" = String, Path, description = "Lesson id")),
    request_body = AssessmentRequest,
    responses(
        (status = 200, description = "Graded", body = AssessmentResultResponse),
        (status = 400, description = "Invalid answers or no questions", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown lesson", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "submitAssessment"
)]
#[post("/lessons/{id}/assessment")]
pub async fn submit_assessment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AssessmentRequest>,
) -> ApiResult<web::Json<AssessmentResultResponse>> {
    let user_id = session.require_user_id()?;
    let lesson_id: LessonId = parse_id(path.as_str(), FieldName::new("id"))?;
    let answers = payload.parse()?;
    let outcome = state
        .assessments
        .submit(user_id, &lesson_id, &answers)
        .await?;
    Ok(web::Json(outcome.into()))
}

/// Answer a single question.
#[utoipa::path(
    post,
    path = "/api/v1/mcqs/{id}/answers",
    params(("id" = String, Path, description = "Question id")),
    request_body = McqAnswerRequest,
    responses(
        (status = 200, description = "Checked", body = McqAnswerResponse),
        (status = 400, description = "Invalid option", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown question", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "answerMcq"
)]
#[post("/mcqs/{id}/answers")]
pub async fn answer_mcq(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<McqAnswerRequest>,
) -> ApiResult<web::Json<McqAnswerResponse>> {
    let user_id = session.require_user_id()?;
    let mcq_id: McqId = parse_id(path.as_str(), FieldName::new("id"))?;
    let selected = AnswerKey::parse("selected", &payload.selected)?;
    let outcome = state.assessments.answer_mcq(user_id, &mcq_id, selected).await?;
    Ok(web::Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{admin_cookie, demo_outline, demo_state, test_app};

    fn key_for(question: &str) -> &'static str {
        match question {
            "Where is the safest place indoors?" => "B",
            "What belongs in a go-bag?" => "C",
            _ => "D",
        }
    }

    #[actix_web::test]
    async fn questions_exclude_warm_ups_and_keys() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let outline = demo_outline(&app).await;
        let lesson = &outline.modules[0].lessons[0].id;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/lessons/{lesson}/assessment"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        let questions = body.as_array().expect("array");
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q["kind"] == "assessment"));
        assert!(questions.iter().all(|q| q.get("correct").is_none()));
    }

    #[rstest]
    #[case(3, 100, true, 15)]
    #[case(1, 33, false, 5)]
    #[case(0, 0, false, 0)]
    #[actix_web::test]
    async fn submission_scores_and_unlocks(
        #[case] right: usize,
        #[case] score: u8,
        #[case] passed: bool,
        #[case] coins: i64,
    ) {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let outline = demo_outline(&app).await;
        let lesson = &outline.modules[0].lessons[0].id;
        let next = &outline.modules[0].lessons[1].id;
        let cookie = admin_cookie(&app).await;

        let questions: Vec<McqPromptResponse> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/lessons/{lesson}/assessment"))
                .to_request(),
        )
        .await;
        let answers: Vec<Value> = questions
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let selected = if index < right { key_for(&q.question) } else { "A" };
                json!({ "mcqId": q.id, "selected": selected })
            })
            .collect();

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/lessons/{lesson}/assessment"))
                .cookie(cookie)
                .set_json(json!({ "answers": answers }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let result: AssessmentResultResponse = test::read_body_json(res).await;
        assert_eq!(result.score, score);
        assert_eq!(result.passed, passed);
        assert_eq!(result.coins_awarded, coins);
        assert_eq!(result.next_lesson_id.as_ref(), passed.then_some(next));
    }

    #[actix_web::test]
    async fn submission_requires_login() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let outline = demo_outline(&app).await;
        let lesson = &outline.modules[0].lessons[0].id;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/lessons/{lesson}/assessment"))
                .set_json(json!({ "answers": [] }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn invalid_option_letter_is_rejected() {
        let (_, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let outline = demo_outline(&app).await;
        let lesson = &outline.modules[0].lessons[0].id;
        let cookie = admin_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/lessons/{lesson}/assessment"))
                .cookie(cookie)
                .set_json(json!({ "answers": [{ "mcqId": lesson, "selected": "E" }] }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "selected");
    }

    #[rstest]
    #[case("a", true, 5)]
    #[case("C", false, 0)]
    #[actix_web::test]
    async fn warm_up_answer_awards_coins_when_right(
        #[case] selected: &str,
        #[case] correct: bool,
        #[case] coins: i64,
    ) {
        let (store, state) = demo_state();
        let app = test::init_service(test_app(state)).await;
        let outline = demo_outline(&app).await;
        let lesson = &outline.modules[0].lessons[0].id;
        let detail: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/lessons/{lesson}"))
                .to_request(),
        )
        .await;
        let mcq = detail["introductory"][0]["id"].as_str().expect("id").to_owned();
        let cookie = admin_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/mcqs/{mcq}/answers"))
                .cookie(cookie)
                .set_json(json!({ "selected": selected }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let answer: McqAnswerResponse = test::read_body_json(res).await;
        assert_eq!(answer.is_correct, correct);
        assert_eq!(answer.coins_awarded, coins);
        assert_eq!(store.answers().expect("answers").len(), 1);
    }
}
