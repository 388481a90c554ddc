//! Registration, login and profile preferences.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::{AuthGateway, ProfileRepository};
use super::{Error, Language, LoginCredentials, Profile, SignUpForm, UserId};

/// Account workflows backed by the auth endpoint and the `profiles` table.
#[derive(Clone)]
pub struct AccountService {
    auth: Arc<dyn AuthGateway>,
    profiles: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Create the service.
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        profiles: Arc<dyn ProfileRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            auth,
            profiles,
            clock,
        }
    }

    /// Validate the form, create credentials and insert the profile row.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<Profile, Error> {
        let sign_up = form.validate()?;
        let user_id = self.auth.sign_up(sign_up.email(), sign_up.password()).await?;
        let profile = Profile::new_signup(
            user_id,
            sign_up.email(),
            sign_up.full_name().to_owned(),
            sign_up.role(),
            self.clock.utc(),
        );
        self.profiles.insert(&profile).await?;
        info!(
            %user_id,
            role = profile.role.as_str(),
            approved = profile.role_approved,
            "account registered"
        );
        Ok(profile)
    }

    /// Verify credentials and load the caller's profile.
    pub async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Profile, Error> {
        let user_id = self.auth.sign_in(credentials).await?;
        let profile = self.current_profile(&user_id).await?;
        info!(%user_id, "signed in");
        Ok(profile)
    }

    /// Profile of a signed-in user.
    pub async fn current_profile(&self, user_id: &UserId) -> Result<Profile, Error> {
        self.profiles
            .find(user_id)
            .await?
            .ok_or_else(|| Error::not_found("profile not found"))
    }

    /// Store the caller's preferred display language.
    pub async fn update_language(
        &self,
        user_id: &UserId,
        language: Language,
    ) -> Result<Profile, Error> {
        self.profiles
            .set_language(user_id, language)
            .await?
            .ok_or_else(|| Error::not_found("profile not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::Role;
    use crate::domain::ports::{AuthGatewayError, MockAuthGateway, MockProfileRepository};
    use crate::domain::test_support::{clock, profile};
    use zeroize::Zeroizing;

    fn form(role: &str) -> SignUpForm {
        SignUpForm {
            full_name: " Ram Thapa ".to_owned(),
            email: "ram@example.org".to_owned(),
            password: Zeroizing::new("secret1".to_owned()),
            confirm_password: Zeroizing::new("secret1".to_owned()),
            role: role.to_owned(),
        }
    }

    fn service(auth: MockAuthGateway, profiles: MockProfileRepository) -> AccountService {
        AccountService::new(Arc::new(auth), Arc::new(profiles), clock())
    }

    #[tokio::test]
    async fn teacher_sign_up_waits_for_approval() {
        let user_id = UserId::random();
        let mut auth = MockAuthGateway::new();
        auth.expect_sign_up()
            .withf(|email, password| email.as_str() == "ram@example.org" && password == "secret1")
            .times(1)
            .return_once(move |_, _| Ok(user_id));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_insert()
            .withf(move |profile| profile.id == user_id && !profile.role_approved)
            .times(1)
            .return_once(|_| Ok(()));

        let profile = service(auth, profiles)
            .sign_up(&form("teacher"))
            .await
            .expect("registered");
        assert_eq!(profile.role, Role::Teacher);
        assert_eq!(profile.full_name, "Ram Thapa");
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_auth() {
        let mut bad = form("student");
        bad.confirm_password = Zeroizing::new("other".to_owned());
        let error = service(MockAuthGateway::new(), MockProfileRepository::new())
            .sign_up(&bad)
            .await
            .expect_err("mismatch");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details().and_then(|details| details.get("code")),
            Some(&serde_json::json!("password_mismatch"))
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let mut auth = MockAuthGateway::new();
        auth.expect_sign_up()
            .times(1)
            .return_once(|_, _| Err(AuthGatewayError::email_taken()));
        let error = service(auth, MockProfileRepository::new())
            .sign_up(&form("student"))
            .await
            .expect_err("taken");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn sign_in_loads_profile() {
        let existing = profile(Role::Student, true);
        let user_id = existing.id;
        let mut auth = MockAuthGateway::new();
        auth.expect_sign_in()
            .times(1)
            .return_once(move |_| Ok(user_id));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        let credentials =
            LoginCredentials::try_from_parts("learner@example.org", "secret1").expect("valid");

        let signed_in = service(auth, profiles)
            .sign_in(&credentials)
            .await
            .expect("signed in");
        assert_eq!(signed_in.id, user_id);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let mut auth = MockAuthGateway::new();
        auth.expect_sign_in()
            .times(1)
            .return_once(|_| Err(AuthGatewayError::invalid_credentials()));
        let credentials =
            LoginCredentials::try_from_parts("learner@example.org", "nope!!").expect("valid");
        let error = service(auth, MockProfileRepository::new())
            .sign_in(&credentials)
            .await
            .expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn missing_profile_after_login_is_not_found() {
        let mut auth = MockAuthGateway::new();
        auth.expect_sign_in()
            .times(1)
            .return_once(|_| Ok(UserId::random()));
        let mut profiles = MockProfileRepository::new();
        profiles.expect_find().times(1).return_once(|_| Ok(None));
        let credentials =
            LoginCredentials::try_from_parts("learner@example.org", "secret1").expect("valid");
        let error = service(auth, profiles)
            .sign_in(&credentials)
            .await
            .expect_err("no profile");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_language_returns_updated_profile() {
        let mut updated = profile(Role::Student, true);
        updated.preferred_language = Language::Ne;
        let user_id = updated.id;
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_set_language()
            .withf(|_, language| *language == Language::Ne)
            .times(1)
            .return_once(move |_, _| Ok(Some(updated)));
        let profile = service(MockAuthGateway::new(), profiles)
            .update_language(&user_id, Language::Ne)
            .await
            .expect("updated");
        assert_eq!(profile.preferred_language, Language::Ne);
    }
}
