//! Role gates for privileged operations.

use std::sync::Arc;

use tracing::warn;

use super::ports::ProfileRepository;
use super::{Error, Profile, UserId};

/// Checks the caller's profile before admin and course-management work.
#[derive(Clone)]
pub struct RoleGate {
    profiles: Arc<dyn ProfileRepository>,
}

impl RoleGate {
    /// Create a gate backed by `profiles`.
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Approved administrators only.
    pub async fn require_admin(&self, user_id: &UserId) -> Result<Profile, Error> {
        let profile = self.load(user_id).await?;
        if profile.is_admin() {
            return Ok(profile);
        }
        warn!(%user_id, role = profile.role.as_str(), "admin access denied");
        Err(Error::forbidden("administrator access required"))
    }

    /// Approved administrators or approved teachers.
    pub async fn require_course_manager(&self, user_id: &UserId) -> Result<Profile, Error> {
        let profile = self.load(user_id).await?;
        if profile.can_manage_courses() {
            return Ok(profile);
        }
        warn!(%user_id, role = profile.role.as_str(), "course management denied");
        Err(Error::forbidden("approved teacher or administrator access required"))
    }

    async fn load(&self, user_id: &UserId) -> Result<Profile, Error> {
        self.profiles
            .find(user_id)
            .await?
            .ok_or_else(|| Error::forbidden("no profile for the signed-in user"))
    }
}
