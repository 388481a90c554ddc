//! A learner signs up, studies the demo course, passes its first assessment
//! and spends time in the resource library.

mod support;

use actix_web::http::StatusCode;
use actix_web::http::header::ACCEPT_LANGUAGE;
use actix_web::test;
use serde_json::json;

use eduwarn::inbound::http::accounts::{CoinBalanceResponse, ProfileResponse};
use eduwarn::inbound::http::admin::catalogue::{
    AdminCourseResponse, AdminLessonResponse, AdminMcqResponse, AdminModuleResponse,
};
use eduwarn::inbound::http::assessments::{AssessmentResultResponse, McqPromptResponse};
use eduwarn::inbound::http::courses::{CourseOutlineResponse, LessonResponse};
use eduwarn::inbound::http::resources::DownloadResponse;
use eduwarn::server::build_app;
use support::{ADMIN_EMAIL, ADMIN_PASSWORD, call, call_ok, demo_deps, log_in, sign_up};

/// Answer key of the seeded assessment, by English question text.
fn correct_option(question: &str) -> &'static str {
    match question {
        "Where is the safest place indoors?" => "B",
        "What belongs in a go-bag?" => "C",
        "After the shaking stops you should" => "D",
        other => panic!("unexpected question {other}"),
    }
}

#[actix_web::test]
async fn passing_the_first_assessment_unlocks_the_next_lesson_and_pays_coins() {
    let (store, deps) = demo_deps();
    let app = test::init_service(build_app(deps)).await;
    let cookie = sign_up(&app, "asha@example.org", "student").await;

    let outline: CourseOutlineResponse = call_ok(
        &app,
        test::TestRequest::get().uri("/api/v1/courses/earthquake-preparedness"),
        None,
    )
    .await;
    let lessons = &outline.modules[0].lessons;
    let (first, second) = (&lessons[0].id, &lessons[1].id);

    let lesson: LessonResponse = call_ok(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/lessons/{first}")),
        Some(&cookie),
    )
    .await;
    assert_eq!(lesson.next_lesson_id.as_deref(), Some(second.as_str()));
    assert_eq!(lesson.introductory.len(), 1);

    let questions: Vec<McqPromptResponse> = call_ok(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/lessons/{first}/assessment")),
        Some(&cookie),
    )
    .await;
    let answers: Vec<_> = questions
        .iter()
        .map(|q| json!({ "mcqId": q.id, "selected": correct_option(&q.question) }))
        .collect();

    let result: AssessmentResultResponse = call_ok(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/lessons/{first}/assessment"))
            .set_json(json!({ "answers": answers })),
        Some(&cookie),
    )
    .await;
    assert_eq!(result.score, 100);
    assert!(result.passed);
    assert_eq!(result.coins_awarded, 15);
    assert_eq!(result.next_lesson_id.as_deref(), Some(second.as_str()));

    let coins: CoinBalanceResponse =
        call_ok(&app, test::TestRequest::get().uri("/api/v1/me/coins"), Some(&cookie)).await;
    assert_eq!(coins.balance, 15);
    assert_eq!(coins.transactions.len(), 1);
    assert_eq!(coins.transactions[0].reason, "correct_answer");

    assert_eq!(store.answers().expect("answers").len(), 3);
    let kinds: Vec<_> = store
        .learning_events()
        .expect("events")
        .into_iter()
        .map(|event| event.kind.as_str().to_owned())
        .collect();
    assert!(kinds.contains(&"lesson_viewed".to_owned()));
    assert!(kinds.contains(&"assessment_submitted".to_owned()));
}

#[actix_web::test]
async fn failing_the_assessment_keeps_the_next_lesson_hidden() {
    let (_store, deps) = demo_deps();
    let app = test::init_service(build_app(deps)).await;
    let cookie = sign_up(&app, "bikash@example.org", "student").await;
    let outline: CourseOutlineResponse = call_ok(
        &app,
        test::TestRequest::get().uri("/api/v1/courses/earthquake-preparedness"),
        None,
    )
    .await;
    let first = &outline.modules[0].lessons[0].id;

    let questions: Vec<McqPromptResponse> = call_ok(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/lessons/{first}/assessment")),
        None,
    )
    .await;
    let one_right = json!({
        "answers": [{ "mcqId": questions[0].id, "selected": correct_option(&questions[0].question) }]
    });
    let result: AssessmentResultResponse = call_ok(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/lessons/{first}/assessment"))
            .set_json(one_right),
        Some(&cookie),
    )
    .await;
    assert_eq!(result.score, 33);
    assert!(!result.passed);
    assert_eq!(result.coins_awarded, 5);
    assert!(result.next_lesson_id.is_none());
}

#[actix_web::test]
async fn nepali_readers_get_nepali_text_and_fallbacks() {
    let (_store, deps) = demo_deps();
    let app = test::init_service(build_app(deps)).await;

    let outline: CourseOutlineResponse = call_ok(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/courses/earthquake-preparedness")
            .insert_header((ACCEPT_LANGUAGE, "ne-NP,ne;q=0.9")),
        None,
    )
    .await;
    assert_eq!(outline.course.title, "भूकम्प पूर्वतयारी");

    let english: CourseOutlineResponse = call_ok(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/courses/earthquake-preparedness?lang=en")
            .insert_header((ACCEPT_LANGUAGE, "ne")),
        None,
    )
    .await;
    assert_eq!(english.course.title, "Earthquake preparedness");
}

#[actix_web::test]
async fn preferred_language_is_stored_on_the_profile() {
    let (_store, deps) = demo_deps();
    let app = test::init_service(build_app(deps)).await;
    let cookie = sign_up(&app, "chandra@example.org", "student").await;

    let profile: ProfileResponse = call_ok(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/me/language")
            .set_json(json!({ "language": "ne" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(profile.preferred_language, "ne");

    let (status, body) = call(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/me/language")
            .set_json(json!({ "language": "hi" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "language");
}

#[actix_web::test]
async fn downloads_pay_signed_in_learners_only() {
    let (_store, deps) = demo_deps();
    let app = test::init_service(build_app(deps)).await;
    let cookie = sign_up(&app, "dipa@example.org", "student").await;

    let (status, resources) =
        call(&app, test::TestRequest::get().uri("/api/v1/resources"), None).await;
    assert_eq!(status, StatusCode::OK);
    let id = resources[0]["id"].as_str().expect("resource id").to_owned();
    let uri = format!("/api/v1/resources/{id}/download");

    let anonymous: DownloadResponse =
        call_ok(&app, test::TestRequest::post().uri(&uri), None).await;
    assert_eq!(anonymous.coins_awarded, 0);

    let signed_in: DownloadResponse =
        call_ok(&app, test::TestRequest::post().uri(&uri), Some(&cookie)).await;
    assert_eq!(signed_in.coins_awarded, 2);
    assert_eq!(signed_in.file_url, anonymous.file_url);

    let coins: CoinBalanceResponse =
        call_ok(&app, test::TestRequest::get().uri("/api/v1/me/coins"), Some(&cookie)).await;
    assert_eq!(coins.balance, 2);
    assert_eq!(coins.transactions[0].reason, "resource_download");
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let (_store, deps) = demo_deps();
    let app = test::init_service(build_app(deps)).await;
    let cookie = sign_up(&app, "eli@example.org", "student").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("removal cookie");

    let (status, body) = call(
        &app,
        test::TestRequest::get().uri("/api/v1/me"),
        Some(&cleared.into_owned()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn draft_course_questions_neither_grade_nor_pay() {
    let (store, deps) = demo_deps();
    let app = test::init_service(build_app(deps)).await;
    let admin = log_in(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let learner = sign_up(&app, "dipesh@example.org", "student").await;

    let course: AdminCourseResponse = call_ok(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/admin/courses")
            .set_json(json!({
                "slug": "fire-drills",
                "titleEn": "Fire drills",
                "descriptionEn": "Leave the building calmly.",
            })),
        Some(&admin),
    )
    .await;
    let module: AdminModuleResponse = call_ok(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/admin/courses/{}/modules", course.id))
            .set_json(json!({ "titleEn": "At school" })),
        Some(&admin),
    )
    .await;
    let lesson: AdminLessonResponse = call_ok(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/admin/modules/{}/lessons", module.id))
            .set_json(json!({ "titleEn": "Leaving the classroom", "contentEn": "Walk, do not run." })),
        Some(&admin),
    )
    .await;
    let question: AdminMcqResponse = call_ok(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/admin/lessons/{}/mcqs", lesson.id))
            .set_json(json!({
                "questionEn": "How do you leave?",
                "optionsEn": ["Run", "Walk in line", "Hide", "Wait"],
                "correct": "B",
            })),
        Some(&admin),
    )
    .await;

    for selected in ["B", "A"] {
        let (status, body) = call(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/lessons/{}/assessment", lesson.id))
                .set_json(json!({ "answers": [{ "mcqId": question.id, "selected": selected }] })),
            Some(&learner),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "submit {selected}: {body}");
    }
    let (status, _) = call(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/mcqs/{}/answers", question.id))
            .set_json(json!({ "selected": "B" })),
        Some(&learner),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let coins: CoinBalanceResponse =
        call_ok(&app, test::TestRequest::get().uri("/api/v1/me/coins"), Some(&learner)).await;
    assert_eq!(coins.balance, 0);
    assert!(store.answers().expect("answers").is_empty());
}
