//! Forum and blog tables.

use std::cmp::Reverse;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{BlogRepository, ForumRepository, StoreError};
use crate::domain::{
    ArticleId, BlogArticle, ForumCategory, ForumCategoryId, ForumPost, ForumThread, PostId,
    Publication, ThreadFlag, ThreadId,
};

use super::{InMemoryStore, window};

#[async_trait]
impl ForumRepository for InMemoryStore {
    async fn list_categories(&self) -> Result<Vec<ForumCategory>, StoreError> {
        let tables = self.lock()?;
        let mut rows = tables.categories.clone();
        rows.sort_by_key(|row| row.position);
        Ok(rows)
    }

    async fn find_category(
        &self,
        id: &ForumCategoryId,
    ) -> Result<Option<ForumCategory>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.categories.iter().find(|row| row.id == *id).cloned())
    }

    async fn list_threads(
        &self,
        category: &ForumCategoryId,
        page: &PageRequest,
    ) -> Result<Vec<ForumThread>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<ForumThread> = tables
            .threads
            .iter()
            .filter(|row| row.category_id == *category)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (Reverse(row.pinned), Reverse(row.created_at)));
        Ok(window(&rows, page.offset(), page.fetch_limit()))
    }

    async fn find_thread(&self, id: &ThreadId) -> Result<Option<ForumThread>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.threads.iter().find(|row| row.id == *id).cloned())
    }

    async fn insert_thread(&self, thread: &ForumThread) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables.threads.push(thread.clone());
        Ok(())
    }

    async fn set_thread_flag(
        &self,
        id: &ThreadId,
        flag: ThreadFlag,
        value: bool,
    ) -> Result<Option<ForumThread>, StoreError> {
        let mut tables = self.lock()?;
        Ok(tables
            .threads
            .iter_mut()
            .find(|row| row.id == *id)
            .map(|row| {
                *row = row.clone().with_flag(flag, value);
                row.clone()
            }))
    }

    async fn list_posts(&self, thread: &ThreadId) -> Result<Vec<ForumPost>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<ForumPost> = tables
            .posts
            .iter()
            .filter(|row| row.thread_id == *thread)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.created_at);
        Ok(rows)
    }

    async fn insert_post(&self, post: &ForumPost) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables.posts.push(post.clone());
        Ok(())
    }

    async fn delete_post(&self, id: &PostId) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.posts.len();
        tables.posts.retain(|row| row.id != *id);
        Ok(tables.posts.len() < before)
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn list_published(&self, page: &PageRequest) -> Result<Vec<BlogArticle>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<BlogArticle> = tables
            .articles
            .iter()
            .filter(|row| row.published)
            .cloned()
            .collect();
        rows.sort_by_key(|row| Reverse((row.published_at, row.created_at)));
        Ok(window(&rows, page.offset(), page.fetch_limit()))
    }

    async fn list_all(&self) -> Result<Vec<BlogArticle>, StoreError> {
        let tables = self.lock()?;
        let mut rows = tables.articles.clone();
        rows.sort_by_key(|row| Reverse(row.created_at));
        Ok(rows)
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BlogArticle>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .articles
            .iter()
            .find(|row| row.published && row.slug == slug)
            .cloned())
    }

    async fn find(&self, id: &ArticleId) -> Result<Option<BlogArticle>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.articles.iter().find(|row| row.id == *id).cloned())
    }

    async fn insert(&self, article: &BlogArticle) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.articles.iter().any(|row| row.slug == article.slug) {
            return Err(StoreError::conflict(format!(
                "article {} already exists",
                article.slug
            )));
        }
        tables.articles.push(article.clone());
        Ok(())
    }

    async fn set_publication(
        &self,
        id: &ArticleId,
        publication: Publication,
    ) -> Result<Option<BlogArticle>, StoreError> {
        let mut tables = self.lock()?;
        Ok(tables
            .articles
            .iter_mut()
            .find(|row| row.id == *id)
            .map(|row| {
                row.published = publication.published;
                row.published_at = publication.published_at;
                row.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::{Duration, Utc};

    fn thread(category: ForumCategoryId, pinned: bool, age_minutes: i64) -> ForumThread {
        ForumThread {
            id: ThreadId::random(),
            category_id: category,
            author_id: UserId::random(),
            title: format!("Thread {age_minutes}"),
            body: "Body".to_owned(),
            pinned,
            locked: false,
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn threads_list_pinned_first_then_newest() {
        let store = InMemoryStore::new();
        let category = ForumCategoryId::random();
        let old_pinned = thread(category, true, 60);
        let newest = thread(category, false, 1);
        let older = thread(category, false, 30);
        for row in [&older, &newest, &old_pinned] {
            store.insert_thread(row).await.expect("insert");
        }
        store
            .insert_thread(&thread(ForumCategoryId::random(), true, 0))
            .await
            .expect("insert");

        let page = PageRequest::new(Some(10), None).expect("page");
        let ids: Vec<ThreadId> = store
            .list_threads(&category, &page)
            .await
            .expect("list")
            .into_iter()
            .map(|row| row.id)
            .collect();
        assert_eq!(ids, vec![old_pinned.id, newest.id, older.id]);
    }

    #[tokio::test]
    async fn flag_toggle_leaves_other_fields_alone() {
        let store = InMemoryStore::new();
        let original = thread(ForumCategoryId::random(), false, 5);
        store.insert_thread(&original).await.expect("insert");

        let locked = store
            .set_thread_flag(&original.id, ThreadFlag::Locked, true)
            .await
            .expect("update")
            .expect("thread");
        assert!(locked.locked);
        assert_eq!(locked.clone().with_flag(ThreadFlag::Locked, false), original);
    }
}
