//! Row shapes of the store tables.
//!
//! Bilingual columns come in `<name>_en` / `<name>_ne` pairs. Rows convert
//! into domain types in one pass and back for inserts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    AnswerKey, ArticleId, BlogArticle, CoinTransaction, ContactMessage, Course, CourseId,
    CourseLevel, CourseModule, Donation, ForumCategory, ForumCategoryId, ForumPost, ForumThread,
    Language, LearningEvent, LearningEventKind, Lesson, LessonId, LocalizedText, Mcq,
    McqAnswerRecord, McqId, McqKind, MentorApplication, ModuleId, PartnershipApplication, PostId,
    Profile, Quote, Resource, ResourceId, RewardReason, Role, Statistic, SubmissionReceipt,
    Testimonial, ThreadId, UserId,
};

fn text(en: String, ne: Option<String>) -> LocalizedText {
    LocalizedText::new(en, ne)
}

fn nepali(text: &LocalizedText) -> Option<String> {
    text.ne().map(str::to_owned)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ProfileRow {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub role_approved: bool,
    #[serde(default)]
    pub edu_coins: i64,
    #[serde(default)]
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            role: row.role,
            role_approved: row.role_approved,
            edu_coins: row.edu_coins,
            preferred_language: row.preferred_language,
            created_at: row.created_at,
        }
    }
}

impl From<&Profile> for ProfileRow {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            role: profile.role,
            role_approved: profile.role_approved,
            edu_coins: profile.edu_coins,
            preferred_language: profile.preferred_language,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct CourseRow {
    pub id: CourseId,
    pub slug: String,
    pub title_en: String,
    pub title_ne: Option<String>,
    #[serde(default)]
    pub description_en: String,
    pub description_ne: Option<String>,
    #[serde(default)]
    pub level: CourseLevel,
    pub published: bool,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: text(row.title_en, row.title_ne),
            description: text(row.description_en, row.description_ne),
            level: row.level,
            published: row.published,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            slug: course.slug.clone(),
            title_en: course.title.en().to_owned(),
            title_ne: nepali(&course.title),
            description_en: course.description.en().to_owned(),
            description_ne: nepali(&course.description),
            level: course.level,
            published: course.published,
            created_by: course.created_by,
            created_at: course.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ModuleRow {
    pub id: ModuleId,
    pub course_id: CourseId,
    pub title_en: String,
    pub title_ne: Option<String>,
    pub position: i32,
}

impl From<ModuleRow> for CourseModule {
    fn from(row: ModuleRow) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            title: text(row.title_en, row.title_ne),
            position: row.position,
        }
    }
}

impl From<&CourseModule> for ModuleRow {
    fn from(module: &CourseModule) -> Self {
        Self {
            id: module.id,
            course_id: module.course_id,
            title_en: module.title.en().to_owned(),
            title_ne: nepali(&module.title),
            position: module.position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct LessonRow {
    pub id: LessonId,
    pub module_id: ModuleId,
    pub title_en: String,
    pub title_ne: Option<String>,
    #[serde(default)]
    pub content_en: String,
    pub content_ne: Option<String>,
    pub video_url: Option<String>,
    pub position: i32,
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Self {
            id: row.id,
            module_id: row.module_id,
            title: text(row.title_en, row.title_ne),
            content: text(row.content_en, row.content_ne),
            video_url: row.video_url,
            position: row.position,
        }
    }
}

impl From<&Lesson> for LessonRow {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id,
            module_id: lesson.module_id,
            title_en: lesson.title.en().to_owned(),
            title_ne: nepali(&lesson.title),
            content_en: lesson.content.en().to_owned(),
            content_ne: nepali(&lesson.content),
            video_url: lesson.video_url.clone(),
            position: lesson.position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct McqRow {
    pub id: McqId,
    pub lesson_id: LessonId,
    pub question_en: String,
    pub question_ne: Option<String>,
    pub option_a_en: String,
    pub option_a_ne: Option<String>,
    pub option_b_en: String,
    pub option_b_ne: Option<String>,
    pub option_c_en: String,
    pub option_c_ne: Option<String>,
    pub option_d_en: String,
    pub option_d_ne: Option<String>,
    pub correct_option: AnswerKey,
    pub mcq_type: McqKind,
    #[serde(default)]
    pub position: i32,
}

impl From<McqRow> for Mcq {
    fn from(row: McqRow) -> Self {
        Self {
            id: row.id,
            lesson_id: row.lesson_id,
            question: text(row.question_en, row.question_ne),
            options: [
                text(row.option_a_en, row.option_a_ne),
                text(row.option_b_en, row.option_b_ne),
                text(row.option_c_en, row.option_c_ne),
                text(row.option_d_en, row.option_d_ne),
            ],
            correct: row.correct_option,
            kind: row.mcq_type,
            position: row.position,
        }
    }
}

impl From<&Mcq> for McqRow {
    fn from(mcq: &Mcq) -> Self {
        let [a, b, c, d] = &mcq.options;
        Self {
            id: mcq.id,
            lesson_id: mcq.lesson_id,
            question_en: mcq.question.en().to_owned(),
            question_ne: nepali(&mcq.question),
            option_a_en: a.en().to_owned(),
            option_a_ne: nepali(a),
            option_b_en: b.en().to_owned(),
            option_b_ne: nepali(b),
            option_c_en: c.en().to_owned(),
            option_c_ne: nepali(c),
            option_d_en: d.en().to_owned(),
            option_d_ne: nepali(d),
            correct_option: mcq.correct,
            mcq_type: mcq.kind,
            position: mcq.position,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct McqAnswerRow {
    pub id: Uuid,
    pub user_id: UserId,
    pub mcq_id: McqId,
    pub selected_option: AnswerKey,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

impl From<&McqAnswerRecord> for McqAnswerRow {
    fn from(record: &McqAnswerRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            mcq_id: record.mcq_id,
            selected_option: record.selected,
            is_correct: record.is_correct,
            answered_at: record.answered_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ResourceRow {
    pub id: ResourceId,
    pub title_en: String,
    pub title_ne: Option<String>,
    #[serde(default)]
    pub description_en: String,
    pub description_ne: Option<String>,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

impl ResourceRow {
    pub fn into_resource(self, lesson_id: Option<LessonId>) -> Resource {
        Resource {
            id: self.id,
            title: text(self.title_en, self.title_ne),
            description: text(self.description_en, self.description_ne),
            file_url: self.file_url,
            lesson_id,
            created_at: self.created_at,
        }
    }
}

impl From<&Resource> for ResourceRow {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            title_en: resource.title.en().to_owned(),
            title_ne: nepali(&resource.title),
            description_en: resource.description.en().to_owned(),
            description_ne: nepali(&resource.description),
            file_url: resource.file_url.clone(),
            created_at: resource.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct LessonResourceRow {
    pub lesson_id: LessonId,
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct CoinTransactionRow {
    pub id: Uuid,
    pub user_id: UserId,
    pub amount: i64,
    pub reason: RewardReason,
    pub subject_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<CoinTransactionRow> for CoinTransaction {
    fn from(row: CoinTransactionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            amount: row.amount,
            reason: row.reason,
            subject_id: row.subject_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ForumCategoryRow {
    pub id: ForumCategoryId,
    pub name_en: String,
    pub name_ne: Option<String>,
    #[serde(default)]
    pub description_en: String,
    pub description_ne: Option<String>,
    #[serde(default)]
    pub position: i32,
}

impl From<ForumCategoryRow> for ForumCategory {
    fn from(row: ForumCategoryRow) -> Self {
        Self {
            id: row.id,
            name: text(row.name_en, row.name_ne),
            description: text(row.description_en, row.description_ne),
            position: row.position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ForumThreadRow {
    pub id: ThreadId,
    pub category_id: ForumCategoryId,
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    pub pinned: bool,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ForumThreadRow> for ForumThread {
    fn from(row: ForumThreadRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            author_id: row.author_id,
            title: row.title,
            body: row.body,
            pinned: row.pinned,
            locked: row.locked,
            created_at: row.created_at,
        }
    }
}

impl From<&ForumThread> for ForumThreadRow {
    fn from(thread: &ForumThread) -> Self {
        Self {
            id: thread.id,
            category_id: thread.category_id,
            author_id: thread.author_id,
            title: thread.title.clone(),
            body: thread.body.clone(),
            pinned: thread.pinned,
            locked: thread.locked,
            created_at: thread.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ForumPostRow {
    pub id: PostId,
    pub thread_id: ThreadId,
    pub author_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<ForumPostRow> for ForumPost {
    fn from(row: ForumPostRow) -> Self {
        Self {
            id: row.id,
            thread_id: row.thread_id,
            author_id: row.author_id,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

impl From<&ForumPost> for ForumPostRow {
    fn from(post: &ForumPost) -> Self {
        Self {
            id: post.id,
            thread_id: post.thread_id,
            author_id: post.author_id,
            body: post.body.clone(),
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct BlogArticleRow {
    pub id: ArticleId,
    pub slug: String,
    pub title_en: String,
    pub title_ne: Option<String>,
    #[serde(default)]
    pub summary_en: String,
    pub summary_ne: Option<String>,
    #[serde(default)]
    pub body_en: String,
    pub body_ne: Option<String>,
    pub cover_image_url: Option<String>,
    pub author_id: Option<UserId>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<BlogArticleRow> for BlogArticle {
    fn from(row: BlogArticleRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: text(row.title_en, row.title_ne),
            summary: text(row.summary_en, row.summary_ne),
            body: text(row.body_en, row.body_ne),
            cover_image_url: row.cover_image_url,
            author_id: row.author_id,
            published: row.published,
            published_at: row.published_at,
            created_at: row.created_at,
        }
    }
}

impl From<&BlogArticle> for BlogArticleRow {
    fn from(article: &BlogArticle) -> Self {
        Self {
            id: article.id,
            slug: article.slug.clone(),
            title_en: article.title.en().to_owned(),
            title_ne: nepali(&article.title),
            summary_en: article.summary.en().to_owned(),
            summary_ne: nepali(&article.summary),
            body_en: article.body.en().to_owned(),
            body_ne: nepali(&article.body),
            cover_image_url: article.cover_image_url.clone(),
            author_id: article.author_id,
            published: article.published,
            published_at: article.published_at,
            created_at: article.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct DonationRow<'a> {
    pub id: Uuid,
    pub amount: f64,
    pub currency: &'a str,
    pub donor_name: Option<&'a str>,
    pub donor_email: Option<&'a str>,
    pub donor_phone: Option<&'a str>,
    pub message: Option<&'a str>,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> DonationRow<'a> {
    pub fn new(receipt: &SubmissionReceipt, donation: &'a Donation) -> Self {
        Self {
            id: *receipt.id.as_uuid(),
            amount: donation.amount.value(),
            currency: &donation.currency,
            donor_name: donation.donor_name.as_deref(),
            donor_email: donation.donor_email.as_ref().map(|email| email.as_str()),
            donor_phone: donation.donor_phone.as_deref(),
            message: donation.message.as_deref(),
            is_anonymous: donation.is_anonymous,
            created_at: receipt.received_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct PartnershipRow<'a> {
    pub id: Uuid,
    pub organization_name: &'a str,
    pub contact_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
    pub proposal: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> PartnershipRow<'a> {
    pub fn new(receipt: &SubmissionReceipt, application: &'a PartnershipApplication) -> Self {
        Self {
            id: *receipt.id.as_uuid(),
            organization_name: &application.organization_name,
            contact_name: &application.contact_name,
            email: application.email.as_str(),
            phone: application.phone.as_deref(),
            website: application.website.as_deref(),
            proposal: &application.proposal,
            created_at: receipt.received_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct ContactRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> ContactRow<'a> {
    pub fn new(receipt: &SubmissionReceipt, message: &'a ContactMessage) -> Self {
        Self {
            id: *receipt.id.as_uuid(),
            name: &message.name,
            email: message.email.as_str(),
            subject: &message.subject,
            message: &message.message,
            created_at: receipt.received_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct MentorRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub expertise: &'a str,
    pub motivation: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> MentorRow<'a> {
    pub fn new(receipt: &SubmissionReceipt, application: &'a MentorApplication) -> Self {
        Self {
            id: *receipt.id.as_uuid(),
            name: &application.name,
            email: application.email.as_str(),
            phone: application.phone.as_deref(),
            expertise: &application.expertise,
            motivation: application.motivation.as_deref(),
            created_at: receipt.received_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct TestimonialRow {
    pub id: Uuid,
    pub author_name: String,
    #[serde(default)]
    pub author_role_en: String,
    pub author_role_ne: Option<String>,
    pub quote_en: String,
    pub quote_ne: Option<String>,
    pub approved: bool,
    #[serde(default)]
    pub position: i32,
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        Self {
            id: row.id,
            author_name: row.author_name,
            author_role: text(row.author_role_en, row.author_role_ne),
            quote: text(row.quote_en, row.quote_ne),
            approved: row.approved,
            position: row.position,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct StatisticRow {
    pub id: Uuid,
    pub label_en: String,
    pub label_ne: Option<String>,
    pub value: String,
    #[serde(default)]
    pub position: i32,
}

impl From<StatisticRow> for Statistic {
    fn from(row: StatisticRow) -> Self {
        Self {
            id: row.id,
            label: text(row.label_en, row.label_ne),
            value: row.value,
            position: row.position,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct QuoteRow {
    pub id: Uuid,
    pub text_en: String,
    pub text_ne: Option<String>,
    #[serde(default)]
    pub author: String,
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Self {
            id: row.id,
            text: text(row.text_en, row.text_ne),
            author: row.author,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct LearningEventRow<'a> {
    pub id: Uuid,
    pub user_id: UserId,
    pub event_type: LearningEventKind,
    pub subject_id: Uuid,
    pub metadata: Option<&'a Value>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a LearningEvent> for LearningEventRow<'a> {
    fn from(event: &'a LearningEvent) -> Self {
        Self {
            id: event.id,
            user_id: event.user_id,
            event_type: event.kind,
            subject_id: event.subject_id,
            metadata: event.metadata.as_ref(),
            created_at: event.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn course_row_falls_back_to_english() {
        let row: CourseRow = serde_json::from_value(json!({
            "id": "6f1c2b7e-9a53-4c1e-8d7e-2a3b4c5d6e7f",
            "slug": "flood-safety",
            "title_en": "Flood safety",
            "title_ne": "",
            "published": true,
            "created_by": null,
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .expect("row decodes");
        let course = Course::from(row);
        assert_eq!(course.title.resolve(Language::Ne), "Flood safety");
        assert_eq!(course.level, CourseLevel::Beginner);
    }

    #[test]
    fn mcq_row_maps_option_columns_in_order() {
        let row: McqRow = serde_json::from_value(json!({
            "id": "0b6f3f1e-7a8b-4c2d-9e0f-1a2b3c4d5e6f",
            "lesson_id": "1c7e4a2b-8b9c-4d3e-8f1a-2b3c4d5e6f70",
            "question_en": "Safest spot?",
            "question_ne": null,
            "option_a_en": "Table",
            "option_a_ne": "टेबल",
            "option_b_en": "Window",
            "option_b_ne": null,
            "option_c_en": "Stairs",
            "option_c_ne": null,
            "option_d_en": "Lift",
            "option_d_ne": null,
            "correct_option": "A",
            "mcq_type": "assessment"
        }))
        .expect("row decodes");
        let mcq = Mcq::from(row);
        assert_eq!(mcq.options[0].resolve(Language::Ne), "टेबल");
        assert_eq!(mcq.options[3].en(), "Lift");
        assert_eq!(mcq.kind, McqKind::Assessment);
        assert!(mcq.is_correct(AnswerKey::A));
    }

    #[test]
    fn anonymous_donation_row_has_null_identity() {
        let donation = crate::domain::DonationForm {
            amount: json!(250),
            is_anonymous: true,
            donor_name: Some("Hidden".to_owned()),
            ..crate::domain::DonationForm::default()
        }
        .validate()
        .expect("valid donation");
        let receipt = SubmissionReceipt::new(Utc::now());
        let value = serde_json::to_value(DonationRow::new(&receipt, &donation)).expect("encodes");
        assert_eq!(value["donor_name"], Value::Null);
        assert_eq!(value["donor_email"], Value::Null);
        assert_eq!(value["amount"], json!(250.0));
        assert_eq!(value["currency"], json!("NPR"));
    }
}
