//! Blog reading and publishing.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use super::ports::BlogRepository;
use super::{ArticleForm, ArticleId, BlogArticle, Error, UserId};

/// Blog workflows. Authoring methods expect the caller to have passed the
/// admin gate already.
#[derive(Clone)]
pub struct BlogService {
    articles: Arc<dyn BlogRepository>,
    clock: Arc<dyn Clock>,
}

impl BlogService {
    /// Create the service.
    pub fn new(articles: Arc<dyn BlogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { articles, clock }
    }

    /// One page of published articles, newest first.
    pub async fn list_published(&self, page: &PageRequest) -> Result<Page<BlogArticle>, Error> {
        let rows = self.articles.list_published(page).await?;
        Ok(Page::from_overfetch(rows, page))
    }

    /// A published article by slug.
    pub async fn find_published(&self, slug: &str) -> Result<BlogArticle, Error> {
        self.articles
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| Error::not_found(format!("article {slug} not found")))
    }

    /// Every article including drafts.
    pub async fn list_all(&self) -> Result<Vec<BlogArticle>, Error> {
        Ok(self.articles.list_all().await?)
    }

    /// Store a new unpublished draft.
    pub async fn create_article(
        &self,
        author_id: UserId,
        form: ArticleForm,
    ) -> Result<BlogArticle, Error> {
        let article = form.into_draft(ArticleId::random(), author_id, self.clock.utc())?;
        self.articles.insert(&article).await?;
        info!(article_id = %article.id, slug = %article.slug, "blog draft created");
        Ok(article)
    }

    /// Flip `published`; the first publish stamps `published_at`.
    pub async fn toggle_publication(&self, id: &ArticleId) -> Result<BlogArticle, Error> {
        let current = self
            .articles
            .find(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("article {id} not found")))?;
        let change = current.toggled_publication(self.clock.utc());
        let updated = self
            .articles
            .set_publication(id, change)
            .await?
            .ok_or_else(|| Error::not_found(format!("article {id} not found")))?;
        info!(article_id = %id, published = updated.published, "blog publication toggled");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockBlogRepository, StoreError};
    use crate::domain::test_support::{FixtureClock, clock};
    use crate::domain::{ErrorCode, LocalizedText};

    fn draft() -> BlogArticle {
        BlogArticle {
            id: ArticleId::random(),
            slug: "monsoon-floods".to_owned(),
            title: LocalizedText::english("Monsoon floods"),
            summary: LocalizedText::english("Before the rains"),
            body: LocalizedText::english("Move valuables upstairs."),
            cover_image_url: None,
            author_id: None,
            published: false,
            published_at: None,
            created_at: FixtureClock::default().0,
        }
    }

    #[tokio::test]
    async fn first_publish_stamps_clock_time() {
        let current = draft();
        let id = current.id;
        let mut articles = MockBlogRepository::new();
        articles
            .expect_find()
            .times(1)
            .return_once(move |_| Ok(Some(current)));
        articles
            .expect_set_publication()
            .withf(|_, change| {
                change.published && change.published_at == Some(FixtureClock::default().0)
            })
            .times(1)
            .return_once(|_, change| {
                let mut updated = draft();
                updated.published = change.published;
                updated.published_at = change.published_at;
                Ok(Some(updated))
            });

        let article = BlogService::new(Arc::new(articles), clock())
            .toggle_publication(&id)
            .await
            .expect("toggled");
        assert!(article.published);
    }

    #[tokio::test]
    async fn duplicate_slug_is_conflict() {
        let mut articles = MockBlogRepository::new();
        articles
            .expect_insert()
            .times(1)
            .return_once(|_| Err(StoreError::conflict("slug already used")));
        let form = ArticleForm {
            slug: "monsoon-floods".to_owned(),
            title_en: "Monsoon floods".to_owned(),
            summary_en: "Before the rains".to_owned(),
            body_en: "Move valuables upstairs.".to_owned(),
            ..ArticleForm::default()
        };
        let error = BlogService::new(Arc::new(articles), clock())
            .create_article(UserId::random(), form)
            .await
            .expect_err("duplicate");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn unpublished_slug_is_not_found() {
        let mut articles = MockBlogRepository::new();
        articles
            .expect_find_published_by_slug()
            .times(1)
            .return_once(|_| Ok(None));
        let error = BlogService::new(Arc::new(articles), clock())
            .find_published("drafts-only")
            .await
            .expect_err("hidden");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
