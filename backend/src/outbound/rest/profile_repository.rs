//! `profiles` table adapter.

use async_trait::async_trait;
use pagination::PageRequest;
use serde_json::json;

use crate::domain::ports::{ProfileRepository, StoreError};
use crate::domain::{Language, Profile, Role, UserId};

use super::client::RestStoreClient;
use super::query::{Direction, TableQuery};
use super::rows::ProfileRow;

const TABLE: &str = "profiles";

/// Store-backed [`ProfileRepository`].
#[derive(Debug, Clone)]
pub struct RestProfileRepository {
    client: RestStoreClient,
}

impl RestProfileRepository {
    /// Create a repository sharing `client`.
    pub fn new(client: RestStoreClient) -> Self {
        Self { client }
    }

    async fn patch(
        &self,
        id: &UserId,
        changes: serde_json::Value,
    ) -> Result<Option<Profile>, StoreError> {
        let rows: Vec<ProfileRow> = self
            .client
            .update(TABLE, &TableQuery::new().eq("id", id), &changes)
            .await?;
        Ok(rows.into_iter().next().map(Profile::from))
    }
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
        self.client.insert(TABLE, &ProfileRow::from(profile)).await
    }

    async fn find(&self, id: &UserId) -> Result<Option<Profile>, StoreError> {
        let row: Option<ProfileRow> = self
            .client
            .select_one(TABLE, TableQuery::new().eq("id", id))
            .await?;
        Ok(row.map(Profile::from))
    }

    async fn list(&self, page: &PageRequest) -> Result<Vec<Profile>, StoreError> {
        let query = TableQuery::new()
            .order("created_at", Direction::Desc)
            .order("id", Direction::Asc)
            .page(page);
        let rows: Vec<ProfileRow> = self.client.select(TABLE, &query).await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn set_role_approved(
        &self,
        id: &UserId,
        approved: bool,
    ) -> Result<Option<Profile>, StoreError> {
        self.patch(id, json!({ "role_approved": approved })).await
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<Profile>, StoreError> {
        self.patch(id, json!({ "role": role })).await
    }

    async fn set_language(
        &self,
        id: &UserId,
        language: Language,
    ) -> Result<Option<Profile>, StoreError> {
        self.patch(id, json!({ "preferred_language": language })).await
    }
}
