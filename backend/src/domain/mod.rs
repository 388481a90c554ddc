//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities of the learning site and the
//! services that enforce its rules. Services talk to the outside world only
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Services such as [`AssessmentService`] and [`AdminService`], wired by
//!   the server and called by the HTTP adapter.

mod access;
mod account_service;
mod admin_service;
mod assessment;
mod assessment_service;
mod auth;
mod blog;
mod blog_service;
mod catalogue;
mod catalogue_service;
mod content;
mod content_service;
pub mod error;
pub mod forms;
mod forum;
mod forum_service;
mod ids;
mod learning_events;
mod localization;
pub mod ports;
mod resource_service;
mod rewards;
mod rewards_service;
mod submission_service;
mod submissions;
mod trace_id;
mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::access::RoleGate;
pub use self::account_service::AccountService;
pub use self::admin_service::AdminService;
pub use self::assessment::{
    AnswerKey, AssessmentScore, GradedAnswer, Grading, GradingError, Mcq, McqAnswerRecord,
    McqForm, McqKind, McqPrompt, OPTION_COUNT, PASS_THRESHOLD, grade, score,
};
pub use self::assessment_service::{AssessmentOutcome, AssessmentService, McqAnswerOutcome};
pub use self::auth::{LoginCredentials, PASSWORD_MIN_LEN, SignUp, SignUpForm};
pub use self::blog::{ArticleForm, BlogArticle, Publication};
pub use self::blog_service::BlogService;
pub use self::catalogue::{
    Course, CourseDraft, CourseForm, CourseLevel, CourseModule, CourseOutline, Lesson,
    LessonForm, LessonNeighbours, ModuleForm, OutlineModule, Resource, ResourceForm, localized,
    parse_slug,
};
pub use self::catalogue_service::{CatalogueService, LessonDetail};
pub use self::content::{Quote, Statistic, Testimonial, quote_of_the_day};
pub use self::content_service::ContentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::forum::{
    ForumCategory, ForumPost, ForumThread, NewThreadForm, POST_BODY_MAX, THREAD_TITLE_MAX,
    THREAD_TITLE_MIN, ThreadDetail, ThreadFlag, reply_body,
};
pub use self::forum_service::ForumService;
pub use self::ids::{
    ArticleId, CourseId, ForumCategoryId, IdValidationError, LessonId, McqId, ModuleId, PostId,
    ResourceId, SubmissionId, ThreadId, UserId,
};
pub use self::learning_events::{LearningEvent, LearningEventKind, LearningEventRecorder};
pub use self::localization::{Language, LocalizedText};
pub use self::resource_service::{Download, ResourceService};
pub use self::rewards::{
    COINS_PER_CORRECT_ANSWER, COINS_PER_DOWNLOAD, CoinAward, CoinBalance, CoinTransaction,
    RewardReason,
};
pub use self::rewards_service::{RECENT_TRANSACTIONS, RewardsService};
pub use self::submission_service::SubmissionService;
pub use self::submissions::{
    ContactForm, ContactMessage, DEFAULT_CURRENCY, Donation, DonationAmount, DonationForm,
    MentorApplication, MentorForm, PartnershipApplication, PartnershipForm, SubmissionReceipt,
};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, Profile, Role};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use eduwarn::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
