//! Discussion forum: browsing, posting and moderation.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use super::ports::ForumRepository;
use super::{
    Error, ForumCategory, ForumCategoryId, ForumPost, ForumThread, NewThreadForm, PostId,
    ThreadDetail, ThreadFlag, ThreadId, UserId, reply_body,
};

/// Forum workflows. Moderation methods expect the caller to have passed
/// the admin gate already.
#[derive(Clone)]
pub struct ForumService {
    forum: Arc<dyn ForumRepository>,
    clock: Arc<dyn Clock>,
}

impl ForumService {
    /// Create the service.
    pub fn new(forum: Arc<dyn ForumRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { forum, clock }
    }

    /// Categories ordered by position.
    pub async fn list_categories(&self) -> Result<Vec<ForumCategory>, Error> {
        Ok(self.forum.list_categories().await?)
    }

    /// One page of threads, pinned first then newest.
    pub async fn list_threads(
        &self,
        category_id: &ForumCategoryId,
        page: &PageRequest,
    ) -> Result<Page<ForumThread>, Error> {
        self.require_category(category_id).await?;
        let rows = self.forum.list_threads(category_id, page).await?;
        Ok(Page::from_overfetch(rows, page))
    }

    /// Thread with its posts, oldest first.
    pub async fn thread_detail(&self, thread_id: &ThreadId) -> Result<ThreadDetail, Error> {
        let thread = self.require_thread(thread_id).await?;
        let posts = self.forum.list_posts(thread_id).await?;
        Ok(ThreadDetail { thread, posts })
    }

    /// Open a new thread in `category_id`.
    pub async fn create_thread(
        &self,
        author_id: UserId,
        category_id: ForumCategoryId,
        form: NewThreadForm,
    ) -> Result<ForumThread, Error> {
        self.require_category(&category_id).await?;
        let thread =
            form.into_thread(ThreadId::random(), category_id, author_id, self.clock.utc())?;
        self.forum.insert_thread(&thread).await?;
        info!(thread_id = %thread.id, %category_id, %author_id, "forum thread created");
        Ok(thread)
    }

    /// Reply to an unlocked thread.
    pub async fn reply(
        &self,
        author_id: UserId,
        thread_id: &ThreadId,
        body: &str,
    ) -> Result<ForumPost, Error> {
        let body = reply_body(body)?;
        let thread = self.require_thread(thread_id).await?;
        if thread.locked {
            return Err(Error::conflict("thread is locked"));
        }
        let post = ForumPost {
            id: PostId::random(),
            thread_id: thread.id,
            author_id,
            body,
            created_at: self.clock.utc(),
        };
        self.forum.insert_post(&post).await?;
        Ok(post)
    }

    /// Flip one moderation flag.
    pub async fn toggle_flag(
        &self,
        thread_id: &ThreadId,
        flag: ThreadFlag,
    ) -> Result<ForumThread, Error> {
        let current = self.require_thread(thread_id).await?;
        let value = !current.flag(flag);
        let updated = self
            .forum
            .set_thread_flag(thread_id, flag, value)
            .await?
            .ok_or_else(|| Error::not_found(format!("thread {thread_id} not found")))?;
        info!(%thread_id, flag = flag.column(), value, "forum thread moderated");
        Ok(updated)
    }

    /// Remove a post.
    pub async fn delete_post(&self, post_id: &PostId) -> Result<(), Error> {
        if self.forum.delete_post(post_id).await? {
            info!(%post_id, "forum post deleted");
            Ok(())
        } else {
            Err(Error::not_found(format!("post {post_id} not found")))
        }
    }

    async fn require_category(&self, id: &ForumCategoryId) -> Result<ForumCategory, Error> {
        self.forum
            .find_category(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("category {id} not found")))
    }

    async fn require_thread(&self, id: &ThreadId) -> Result<ForumThread, Error> {
        self.forum
            .find_thread(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("thread {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::LocalizedText;
    use crate::domain::ports::MockForumRepository;
    use crate::domain::test_support::{FixtureClock, clock};
    use rstest::rstest;

    fn category() -> ForumCategory {
        ForumCategory {
            id: ForumCategoryId::random(),
            name: LocalizedText::english("Preparedness"),
            description: LocalizedText::default(),
            position: 1,
        }
    }

    fn thread(locked: bool) -> ForumThread {
        ForumThread {
            id: ThreadId::random(),
            category_id: ForumCategoryId::random(),
            author_id: UserId::random(),
            title: "Go-bag contents".to_owned(),
            body: "What do you pack?".to_owned(),
            pinned: false,
            locked,
            created_at: FixtureClock::default().0,
        }
    }

    fn service(forum: MockForumRepository) -> ForumService {
        ForumService::new(Arc::new(forum), clock())
    }

    #[tokio::test]
    async fn reply_to_locked_thread_conflicts() {
        let locked = thread(true);
        let id = locked.id;
        let mut forum = MockForumRepository::new();
        forum
            .expect_find_thread()
            .times(1)
            .return_once(move |_| Ok(Some(locked)));
        let error = service(forum)
            .reply(UserId::random(), &id, "Water and a torch")
            .await
            .expect_err("locked");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn blank_reply_is_rejected_before_lookup() {
        let error = service(MockForumRepository::new())
            .reply(UserId::random(), &ThreadId::random(), "   ")
            .await
            .expect_err("blank");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn reply_is_stored() {
        let open = thread(false);
        let id = open.id;
        let mut forum = MockForumRepository::new();
        forum
            .expect_find_thread()
            .times(1)
            .return_once(move |_| Ok(Some(open)));
        forum
            .expect_insert_post()
            .withf(move |post| post.thread_id == id && post.body == "Water and a torch")
            .times(1)
            .return_once(|_| Ok(()));
        service(forum)
            .reply(UserId::random(), &id, " Water and a torch ")
            .await
            .expect("stored");
    }

    #[rstest]
    #[case(ThreadFlag::Pinned)]
    #[case(ThreadFlag::Locked)]
    #[tokio::test]
    async fn toggle_flips_only_requested_flag(#[case] flag: ThreadFlag) {
        let current = thread(false);
        let id = current.id;
        let updated = current.clone().with_flag(flag, true);
        let mut forum = MockForumRepository::new();
        forum
            .expect_find_thread()
            .times(1)
            .return_once(move |_| Ok(Some(current)));
        forum
            .expect_set_thread_flag()
            .withf(move |_, requested, value| *requested == flag && *value)
            .times(1)
            .return_once(move |_, _, _| Ok(Some(updated)));

        let result = service(forum).toggle_flag(&id, flag).await.expect("toggled");
        assert!(result.flag(flag));
        let other = match flag {
            ThreadFlag::Pinned => ThreadFlag::Locked,
            ThreadFlag::Locked => ThreadFlag::Pinned,
        };
        assert!(!result.flag(other));
    }

    #[tokio::test]
    async fn threads_page_carries_next_cursor() {
        let found = category();
        let category_id = found.id;
        let mut forum = MockForumRepository::new();
        forum
            .expect_find_category()
            .times(1)
            .return_once(move |_| Ok(Some(found)));
        forum
            .expect_list_threads()
            .withf(|_, page| page.fetch_limit() == 3)
            .times(1)
            .return_once(|_, _| Ok(vec![thread(false), thread(false), thread(false)]));
        let page = PageRequest::new(Some(2), None).expect("valid page");

        let threads = service(forum)
            .list_threads(&category_id, &page)
            .await
            .expect("threads");
        assert_eq!(threads.items().len(), 2);
        assert!(threads.next_cursor().is_some());
    }

    #[tokio::test]
    async fn create_thread_in_unknown_category_is_not_found() {
        let mut forum = MockForumRepository::new();
        forum.expect_find_category().times(1).return_once(|_| Ok(None));
        let error = service(forum)
            .create_thread(
                UserId::random(),
                ForumCategoryId::random(),
                NewThreadForm {
                    title: "Shelter map".to_owned(),
                    body: "Where is the nearest open space?".to_owned(),
                },
            )
            .await
            .expect_err("unknown category");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn deleting_missing_post_is_not_found() {
        let mut forum = MockForumRepository::new();
        forum.expect_delete_post().times(1).return_once(|_| Ok(false));
        let error = service(forum)
            .delete_post(&PostId::random())
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
