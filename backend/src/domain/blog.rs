//! Blog articles and their publication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalogue::{localized, parse_slug};
use super::forms::{FieldError, optional};
use super::{ArticleId, LocalizedText, UserId};

/// A row of the `blog_articles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogArticle {
    pub id: ArticleId,
    pub slug: String,
    pub title: LocalizedText,
    pub summary: LocalizedText,
    pub body: LocalizedText,
    pub cover_image_url: Option<String>,
    pub author_id: Option<UserId>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// New publication state for an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Publication {
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl BlogArticle {
    /// Flip `published`. The first publish stamps `published_at`; later
    /// toggles keep the original stamp.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use eduwarn::domain::{ArticleId, BlogArticle, LocalizedText};
    ///
    /// let now = Utc::now();
    /// let draft = BlogArticle {
    ///     id: ArticleId::random(),
    ///     slug: "monsoon-tips".into(),
    ///     title: LocalizedText::english("Monsoon tips"),
    ///     summary: LocalizedText::default(),
    ///     body: LocalizedText::default(),
    ///     cover_image_url: None,
    ///     author_id: None,
    ///     published: false,
    ///     published_at: None,
    ///     created_at: now,
    /// };
    /// let change = draft.toggled_publication(now);
    /// assert!(change.published);
    /// assert_eq!(change.published_at, Some(now));
    /// ```
    #[must_use]
    pub fn toggled_publication(&self, now: DateTime<Utc>) -> Publication {
        let published = !self.published;
        let published_at = match (published, self.published_at) {
            (true, None) => Some(now),
            (_, existing) => existing,
        };
        Publication {
            published,
            published_at,
        }
    }
}

/// Raw article input from the admin surface.
#[derive(Debug, Clone, Default)]
pub struct ArticleForm {
    pub slug: String,
    pub title_en: String,
    pub title_ne: Option<String>,
    pub summary_en: String,
    pub summary_ne: Option<String>,
    pub body_en: String,
    pub body_ne: Option<String>,
    pub cover_image_url: Option<String>,
}

impl ArticleForm {
    /// Validate into an unpublished draft.
    pub fn into_draft(
        self,
        id: ArticleId,
        author_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<BlogArticle, FieldError> {
        Ok(BlogArticle {
            id,
            slug: parse_slug("slug", &self.slug)?,
            title: localized("titleEn", &self.title_en, self.title_ne.as_deref())?,
            summary: localized("summaryEn", &self.summary_en, self.summary_ne.as_deref())?,
            body: localized("bodyEn", &self.body_en, self.body_ne.as_deref())?,
            cover_image_url: optional(self.cover_image_url.as_deref()),
            author_id: Some(author_id),
            published: false,
            published_at: None,
            created_at,
        })
    }
}
