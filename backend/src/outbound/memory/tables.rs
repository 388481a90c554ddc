//! Table contents of the in-memory store.

use std::collections::HashMap;

use crate::domain::{
    BlogArticle, CoinTransaction, ContactMessage, Course, CourseModule, Donation, ForumCategory,
    ForumPost, ForumThread, LearningEvent, Lesson, Mcq, McqAnswerRecord, MentorApplication,
    PartnershipApplication, Profile, Quote, Resource, Statistic, SubmissionReceipt, Testimonial,
    UserId,
};

/// Salted password digest kept by the in-memory auth gateway.
#[derive(Debug, Clone)]
pub(super) struct Credential {
    pub user_id: UserId,
    pub salt: String,
    pub digest: String,
}

#[derive(Debug, Default)]
pub(super) struct Tables {
    /// Keyed by lowercased e-mail.
    pub credentials: HashMap<String, Credential>,
    pub profiles: Vec<Profile>,
    pub courses: Vec<Course>,
    pub modules: Vec<CourseModule>,
    pub lessons: Vec<Lesson>,
    pub mcqs: Vec<Mcq>,
    pub answers: Vec<McqAnswerRecord>,
    pub resources: Vec<Resource>,
    pub transactions: Vec<CoinTransaction>,
    pub categories: Vec<ForumCategory>,
    pub threads: Vec<ForumThread>,
    pub posts: Vec<ForumPost>,
    pub articles: Vec<BlogArticle>,
    pub donations: Vec<(SubmissionReceipt, Donation)>,
    pub partnerships: Vec<(SubmissionReceipt, PartnershipApplication)>,
    pub contacts: Vec<(SubmissionReceipt, ContactMessage)>,
    pub mentors: Vec<(SubmissionReceipt, MentorApplication)>,
    pub testimonials: Vec<Testimonial>,
    pub statistics: Vec<Statistic>,
    pub quotes: Vec<Quote>,
    pub events: Vec<LearningEvent>,
}
