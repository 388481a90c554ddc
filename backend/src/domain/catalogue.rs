//! Courses, modules, lessons and resources.
//!
//! A course outline is the course with its modules ordered by position and
//! each module's lessons ordered by position. Lesson navigation walks that
//! outline in order, crossing module boundaries.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::forms::{FieldError, optional, required};
use super::{CourseId, LessonId, LocalizedText, ModuleId, ResourceId, UserId};

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    /// Entry-level course.
    #[default]
    Beginner,
    /// Builds on a beginner course.
    Intermediate,
    /// Specialist material.
    Advanced,
}

impl CourseLevel {
    /// Lowercase name stored in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    fn parse(raw: Option<&str>) -> Result<Self, FieldError> {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") => Ok(Self::default()),
            Some("beginner") => Ok(Self::Beginner),
            Some("intermediate") => Ok(Self::Intermediate),
            Some("advanced") => Ok(Self::Advanced),
            Some(_) => Err(FieldError::Invalid { field: "level" }),
        }
    }
}

/// A row of the `courses` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub slug: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub level: CourseLevel,
    pub published: bool,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// A row of the `modules` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: ModuleId,
    pub course_id: CourseId,
    pub title: LocalizedText,
    pub position: i32,
}

/// A row of the `lessons` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub module_id: ModuleId,
    pub title: LocalizedText,
    pub content: LocalizedText,
    pub video_url: Option<String>,
    pub position: i32,
}

/// A row of the `resources` table; `lesson_id` comes from `lesson_resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub file_url: String,
    pub lesson_id: Option<LessonId>,
    pub created_at: DateTime<Utc>,
}

/// A module together with its ordered lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineModule {
    pub module: CourseModule,
    pub lessons: Vec<Lesson>,
}

/// Lessons either side of a lesson in outline order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LessonNeighbours {
    pub previous: Option<LessonId>,
    pub next: Option<LessonId>,
}

/// Course with ordered modules and lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOutline {
    pub course: Course,
    pub modules: Vec<OutlineModule>,
}

impl CourseOutline {
    /// Group lessons under their modules and order both by position.
    ///
    /// Lessons whose module is not part of the course are dropped.
    #[must_use]
    pub fn assemble(course: Course, mut modules: Vec<CourseModule>, lessons: Vec<Lesson>) -> Self {
        modules.sort_by_key(|module| module.position);
        let mut by_module: HashMap<ModuleId, Vec<Lesson>> = HashMap::new();
        for lesson in lessons {
            by_module.entry(lesson.module_id).or_default().push(lesson);
        }
        let modules = modules
            .into_iter()
            .map(|module| {
                let mut lessons = by_module.remove(&module.id).unwrap_or_default();
                lessons.sort_by_key(|lesson| lesson.position);
                OutlineModule { module, lessons }
            })
            .collect();
        Self { course, modules }
    }

    /// Every lesson in reading order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.modules.iter().flat_map(|module| module.lessons.iter())
    }

    /// Previous and next lesson around `lesson`, or `None` when the lesson is
    /// not part of this outline.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use eduwarn::domain::{
    ///     Course, CourseId, CourseLevel, CourseModule, CourseOutline, Lesson, LessonId,
    ///     LocalizedText, ModuleId,
    /// };
    ///
    /// let course = Course {
    ///     id: CourseId::random(),
    ///     slug: "flood-safety".into(),
    ///     title: LocalizedText::english("Flood safety"),
    ///     description: LocalizedText::default(),
    ///     level: CourseLevel::Beginner,
    ///     published: true,
    ///     created_by: None,
    ///     created_at: Utc::now(),
    /// };
    /// let module = CourseModule {
    ///     id: ModuleId::random(),
    ///     course_id: course.id,
    ///     title: LocalizedText::english("Basics"),
    ///     position: 1,
    /// };
    /// let lesson = |position| Lesson {
    ///     id: LessonId::random(),
    ///     module_id: module.id,
    ///     title: LocalizedText::english("Lesson"),
    ///     content: LocalizedText::default(),
    ///     video_url: None,
    ///     position,
    /// };
    /// let (first, second) = (lesson(1), lesson(2));
    /// let outline = CourseOutline::assemble(course, vec![module.clone()], vec![second.clone(), first.clone()]);
    /// let around = outline.neighbours(first.id).expect("lesson in outline");
    /// assert_eq!(around.next, Some(second.id));
    /// assert_eq!(around.previous, None);
    /// ```
    #[must_use]
    pub fn neighbours(&self, lesson: LessonId) -> Option<LessonNeighbours> {
        let ordered: Vec<LessonId> = self.lessons().map(|entry| entry.id).collect();
        let index = ordered.iter().position(|id| *id == lesson)?;
        let previous = index
            .checked_sub(1)
            .and_then(|prev| ordered.get(prev))
            .copied();
        let next = ordered.get(index + 1).copied();
        Some(LessonNeighbours { previous, next })
    }
}

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_regex() -> &'static Regex {
    SLUG_RE.get_or_init(|| {
        let pattern = "^[a-z0-9]+(?:-[a-z0-9]+)*$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("slug regex failed to compile: {error}"))
    })
}

/// Validate a lowercase, hyphen-separated slug.
pub fn parse_slug(field: &'static str, raw: &str) -> Result<String, FieldError> {
    let slug = required(field, raw)?;
    if !slug_regex().is_match(&slug) {
        return Err(FieldError::Invalid { field });
    }
    Ok(slug)
}

/// Raw course input from the admin surface.
#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub slug: String,
    pub title_en: String,
    pub title_ne: Option<String>,
    pub description_en: String,
    pub description_ne: Option<String>,
    pub level: Option<String>,
}

/// Validated course fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub slug: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub level: CourseLevel,
}

impl CourseForm {
    /// Validate the form.
    pub fn validate(&self) -> Result<CourseDraft, FieldError> {
        Ok(CourseDraft {
            slug: parse_slug("slug", &self.slug)?,
            title: localized("titleEn", &self.title_en, self.title_ne.as_deref())?,
            description: localized(
                "descriptionEn",
                &self.description_en,
                self.description_ne.as_deref(),
            )?,
            level: CourseLevel::parse(self.level.as_deref())?,
        })
    }
}

/// Raw module input.
#[derive(Debug, Clone, Default)]
pub struct ModuleForm {
    pub title_en: String,
    pub title_ne: Option<String>,
    pub position: Option<i32>,
}

/// Raw lesson input.
#[derive(Debug, Clone, Default)]
pub struct LessonForm {
    pub title_en: String,
    pub title_ne: Option<String>,
    pub content_en: String,
    pub content_ne: Option<String>,
    pub video_url: Option<String>,
    pub position: Option<i32>,
}

/// Raw resource input.
#[derive(Debug, Clone, Default)]
pub struct ResourceForm {
    pub title_en: String,
    pub title_ne: Option<String>,
    pub description_en: Option<String>,
    pub description_ne: Option<String>,
    pub file_url: String,
    pub lesson_id: Option<LessonId>,
}

impl ModuleForm {
    /// Validate into a module row for `course_id`.
    pub fn into_module(
        self,
        id: ModuleId,
        course_id: CourseId,
        default_position: i32,
    ) -> Result<CourseModule, FieldError> {
        Ok(CourseModule {
            id,
            course_id,
            title: localized("titleEn", &self.title_en, self.title_ne.as_deref())?,
            position: self.position.unwrap_or(default_position),
        })
    }
}

impl LessonForm {
    /// Validate into a lesson row for `module_id`.
    pub fn into_lesson(
        self,
        id: LessonId,
        module_id: ModuleId,
        default_position: i32,
    ) -> Result<Lesson, FieldError> {
        Ok(Lesson {
            id,
            module_id,
            title: localized("titleEn", &self.title_en, self.title_ne.as_deref())?,
            content: localized("contentEn", &self.content_en, self.content_ne.as_deref())?,
            video_url: optional(self.video_url.as_deref()),
            position: self.position.unwrap_or(default_position),
        })
    }
}

impl ResourceForm {
    /// Validate into a resource row.
    pub fn into_resource(
        self,
        id: ResourceId,
        created_at: DateTime<Utc>,
    ) -> Result<Resource, FieldError> {
        let description = LocalizedText::new(
            optional(self.description_en.as_deref()).unwrap_or_default(),
            optional(self.description_ne.as_deref()),
        );
        Ok(Resource {
            id,
            title: localized("titleEn", &self.title_en, self.title_ne.as_deref())?,
            description,
            file_url: required("fileUrl", &self.file_url)?,
            lesson_id: self.lesson_id,
            created_at,
        })
    }
}

/// Build a text pair where English is required and Nepali optional.
pub fn localized(
    field: &'static str,
    en: &str,
    ne: Option<&str>,
) -> Result<LocalizedText, FieldError> {
    Ok(LocalizedText::new(required(field, en)?, optional(ne)))
}
