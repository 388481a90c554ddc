//! Port for the `profiles` table.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Language, Profile, Role, UserId};

use super::StoreError;

/// Profile persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a new profile.
    async fn insert(&self, profile: &Profile) -> Result<(), StoreError>;

    /// Fetch a profile by user id.
    async fn find(&self, id: &UserId) -> Result<Option<Profile>, StoreError>;

    /// Page through profiles, newest first. Returns up to
    /// `page.fetch_limit()` rows.
    async fn list(&self, page: &PageRequest) -> Result<Vec<Profile>, StoreError>;

    /// Set `role_approved` only.
    async fn set_role_approved(
        &self,
        id: &UserId,
        approved: bool,
    ) -> Result<Option<Profile>, StoreError>;

    /// Set `role` only.
    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<Profile>, StoreError>;

    /// Set `preferred_language` only.
    async fn set_language(
        &self,
        id: &UserId,
        language: Language,
    ) -> Result<Option<Profile>, StoreError>;
}
