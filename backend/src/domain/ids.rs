//! Typed UUID identifiers for every table in the store.
//!
//! Each identifier is a transparent newtype so serde and row DTOs see a plain
//! UUID string while the domain cannot mix up a lesson id with a course id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The identifier was blank.
    #[error("identifier must not be empty")]
    Empty,
    /// The identifier was not a valid UUID.
    #[error("identifier must be a valid UUID")]
    Invalid,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its string form.
            pub fn parse(raw: &str) -> Result<Self, IdValidationError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(IdValidationError::Empty);
                }
                Uuid::parse_str(trimmed)
                    .map(Self)
                    .map_err(|_| IdValidationError::Invalid)
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// Identifier of an authenticated user and their profile row.
    UserId
);
define_id!(
    /// Identifier of a course.
    CourseId
);
define_id!(
    /// Identifier of a module within a course.
    ModuleId
);
define_id!(
    /// Identifier of a lesson within a module.
    LessonId
);
define_id!(
    /// Identifier of a multiple-choice question.
    McqId
);
define_id!(
    /// Identifier of a downloadable resource.
    ResourceId
);
define_id!(
    /// Identifier of a forum category.
    ForumCategoryId
);
define_id!(
    /// Identifier of a forum thread.
    ThreadId
);
define_id!(
    /// Identifier of a forum post.
    PostId
);
define_id!(
    /// Identifier of a blog article.
    ArticleId
);
define_id!(
    /// Identifier of a stored form submission.
    SubmissionId
);
