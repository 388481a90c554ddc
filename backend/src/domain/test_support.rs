//! Shared fixtures for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::ports::MockLearningEventRepository;
use super::{
    AnswerKey, Course, CourseId, CourseLevel, CourseModule, Language, LearningEventRecorder,
    Lesson, LessonId, LocalizedText, Mcq, McqId, McqKind, ModuleId, Profile, Role, UserId,
};

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixtureClock(pub DateTime<Utc>);

impl Default for FixtureClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
                .single()
                .expect("valid fixture instant"),
        )
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock::default())
}

/// Recorder whose repository accepts any number of events.
pub(crate) fn permissive_recorder() -> LearningEventRecorder {
    let mut events = MockLearningEventRepository::new();
    events.expect_record().returning(|_| Ok(()));
    LearningEventRecorder::new(Arc::new(events), clock())
}

pub(crate) fn profile(role: Role, approved: bool) -> Profile {
    Profile {
        id: UserId::random(),
        email: "learner@example.org".to_owned(),
        full_name: "Sita Sharma".to_owned(),
        role,
        role_approved: approved,
        edu_coins: 0,
        preferred_language: Language::En,
        created_at: FixtureClock::default().0,
    }
}

pub(crate) fn course(published: bool) -> Course {
    Course {
        id: CourseId::random(),
        slug: "earthquake-preparedness".to_owned(),
        title: LocalizedText::new("Earthquake preparedness", Some("भूकम्प पूर्वतयारी".to_owned())),
        description: LocalizedText::english("Stay safe when the ground shakes."),
        level: CourseLevel::Beginner,
        published,
        created_by: None,
        created_at: FixtureClock::default().0,
    }
}

pub(crate) fn module(course_id: CourseId, position: i32) -> CourseModule {
    CourseModule {
        id: ModuleId::random(),
        course_id,
        title: LocalizedText::english(format!("Module {position}")),
        position,
    }
}

pub(crate) fn lesson(module_id: ModuleId, position: i32) -> Lesson {
    Lesson {
        id: LessonId::random(),
        module_id,
        title: LocalizedText::english(format!("Lesson {position}")),
        content: LocalizedText::english("Drop, cover and hold on."),
        video_url: None,
        position,
    }
}

pub(crate) fn mcq(lesson_id: LessonId, kind: McqKind, correct: AnswerKey) -> Mcq {
    Mcq {
        id: McqId::random(),
        lesson_id,
        question: LocalizedText::english("Where do you shelter?"),
        options: [
            LocalizedText::english("Under a table"),
            LocalizedText::english("Near a window"),
            LocalizedText::english("On the stairs"),
            LocalizedText::english("In a lift"),
        ],
        correct,
        kind,
        position: 1,
    }
}
