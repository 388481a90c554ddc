//! Discussion forum: categories, threads and posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::forms::{FieldError, bounded};
use super::{ForumCategoryId, LocalizedText, PostId, ThreadId, UserId};

/// Minimum thread title length in characters.
pub const THREAD_TITLE_MIN: usize = 3;
/// Maximum thread title length in characters.
pub const THREAD_TITLE_MAX: usize = 200;
/// Maximum post body length in characters.
pub const POST_BODY_MAX: usize = 10_000;

/// A row of the `forum_categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumCategory {
    pub id: ForumCategoryId,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub position: i32,
}

/// A row of the `forum_threads` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumThread {
    pub id: ThreadId,
    pub category_id: ForumCategoryId,
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    pub pinned: bool,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
}

/// A row of the `forum_posts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: PostId,
    pub thread_id: ThreadId,
    pub author_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Moderation flag on a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadFlag {
    /// Listed before unpinned threads.
    Pinned,
    /// Closed to new replies.
    Locked,
}

impl ThreadFlag {
    /// Column holding the flag.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Pinned => "pinned",
            Self::Locked => "locked",
        }
    }
}

impl ForumThread {
    /// Current value of `flag`.
    #[must_use]
    pub const fn flag(&self, flag: ThreadFlag) -> bool {
        match flag {
            ThreadFlag::Pinned => self.pinned,
            ThreadFlag::Locked => self.locked,
        }
    }

    /// Copy of the thread with `flag` set to `value`; nothing else changes.
    #[must_use]
    pub fn with_flag(mut self, flag: ThreadFlag, value: bool) -> Self {
        match flag {
            ThreadFlag::Pinned => self.pinned = value,
            ThreadFlag::Locked => self.locked = value,
        }
        self
    }
}

/// Thread with its posts, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadDetail {
    pub thread: ForumThread,
    pub posts: Vec<ForumPost>,
}

/// Raw input for a new thread.
#[derive(Debug, Clone, Default)]
pub struct NewThreadForm {
    pub title: String,
    pub body: String,
}

impl NewThreadForm {
    /// Validate into a thread row.
    pub fn into_thread(
        self,
        id: ThreadId,
        category_id: ForumCategoryId,
        author_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<ForumThread, FieldError> {
        Ok(ForumThread {
            id,
            category_id,
            author_id,
            title: bounded("title", &self.title, THREAD_TITLE_MIN, THREAD_TITLE_MAX)?,
            body: bounded("body", &self.body, 1, POST_BODY_MAX)?,
            pinned: false,
            locked: false,
            created_at,
        })
    }
}

/// Validate a reply body.
pub fn reply_body(raw: &str) -> Result<String, FieldError> {
    bounded("body", raw, 1, POST_BODY_MAX)
}
