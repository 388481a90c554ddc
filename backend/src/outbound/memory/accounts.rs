//! Profiles, credentials and the coin ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::ports::{
    AuthGateway, AuthGatewayError, CoinLedger, ProfileRepository, StoreError,
};
use crate::domain::{
    CoinAward, CoinTransaction, EmailAddress, Language, LoginCredentials, Profile, Role, UserId,
};

use super::tables::{Credential, Tables};
use super::{InMemoryStore, window};

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn email_key(email: &EmailAddress) -> String {
    email.as_str().to_ascii_lowercase()
}

impl InMemoryStore {
    fn update_profile(
        &self,
        id: &UserId,
        change: impl FnOnce(&mut Profile),
    ) -> Result<Option<Profile>, StoreError> {
        let mut tables = self.lock()?;
        Ok(tables
            .profiles
            .iter_mut()
            .find(|profile| profile.id == *id)
            .map(|profile| {
                change(profile);
                profile.clone()
            }))
    }

    fn auth_tables(&self) -> Result<std::sync::MutexGuard<'_, Tables>, AuthGatewayError> {
        self.lock()
            .map_err(|error| AuthGatewayError::unexpected(error.to_string()))
    }
}

pub(super) fn register(
    tables: &mut Tables,
    email: &EmailAddress,
    password: &str,
) -> Result<UserId, AuthGatewayError> {
    let key = email_key(email);
    if tables.credentials.contains_key(&key) {
        return Err(AuthGatewayError::email_taken());
    }
    let salt = Uuid::new_v4().simple().to_string();
    let user_id = UserId::random();
    let credential = Credential {
        user_id,
        digest: digest(&salt, password),
        salt,
    };
    tables.credentials.insert(key, credential);
    Ok(user_id)
}

#[async_trait]
impl AuthGateway for InMemoryStore {
    async fn sign_up(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<UserId, AuthGatewayError> {
        let mut tables = self.auth_tables()?;
        register(&mut tables, email, password)
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<UserId, AuthGatewayError> {
        let tables = self.auth_tables()?;
        let stored = tables
            .credentials
            .get(&email_key(credentials.email()))
            .ok_or_else(AuthGatewayError::invalid_credentials)?;
        if digest(&stored.salt, credentials.password()) != stored.digest {
            return Err(AuthGatewayError::invalid_credentials());
        }
        Ok(stored.user_id)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.profiles.iter().any(|row| row.id == profile.id) {
            return Err(StoreError::conflict(format!(
                "profile {} already exists",
                profile.id
            )));
        }
        tables.profiles.push(profile.clone());
        Ok(())
    }

    async fn find(&self, id: &UserId) -> Result<Option<Profile>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.profiles.iter().find(|row| row.id == *id).cloned())
    }

    async fn list(&self, page: &PageRequest) -> Result<Vec<Profile>, StoreError> {
        let tables = self.lock()?;
        let mut rows = tables.profiles.clone();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(window(&rows, page.offset(), page.fetch_limit()))
    }

    async fn set_role_approved(
        &self,
        id: &UserId,
        approved: bool,
    ) -> Result<Option<Profile>, StoreError> {
        self.update_profile(id, |profile| profile.role_approved = approved)
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<Profile>, StoreError> {
        self.update_profile(id, |profile| profile.role = role)
    }

    async fn set_language(
        &self,
        id: &UserId,
        language: Language,
    ) -> Result<Option<Profile>, StoreError> {
        self.update_profile(id, |profile| profile.preferred_language = language)
    }
}

#[async_trait]
impl CoinLedger for InMemoryStore {
    async fn award(&self, award: &CoinAward, at: DateTime<Utc>) -> Result<i64, StoreError> {
        let mut tables = self.lock()?;
        let profile = tables
            .profiles
            .iter_mut()
            .find(|row| row.id == award.user_id)
            .ok_or_else(|| StoreError::not_found(format!("profile {} not found", award.user_id)))?;
        profile.edu_coins = profile.edu_coins.saturating_add(award.amount);
        let balance = profile.edu_coins;
        tables
            .transactions
            .push(CoinTransaction::from_award(award, at));
        Ok(balance)
    }

    async fn transactions(
        &self,
        user: &UserId,
        limit: u32,
    ) -> Result<Vec<CoinTransaction>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<CoinTransaction> = tables
            .transactions
            .iter()
            .filter(|row| row.user_id == *user)
            .cloned()
            .collect();
        rows.reverse();
        Ok(window(&rows, 0, limit))
    }
}
