//! Process settings loaded via OrthoConfig from `EDUWARN_*` variables,
//! configuration files and the command line.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::EmailAddress;
use crate::outbound::memory::DemoAdmin;
use crate::outbound::rest::StoreEndpoint;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ADMIN_NAME: &str = "EduWarn Admin";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid store URL '{value}': {source}")]
    StoreUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("EDUWARN_STORE_API_KEY is required when EDUWARN_STORE_URL is set")]
    MissingApiKey,
    #[error("demo admin needs both an e-mail and a password")]
    IncompleteDemoAdmin,
    #[error("invalid demo admin e-mail: {0}")]
    DemoAdminEmail(String),
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EDUWARN")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Base URL of the hosted table store. Unset means development mode.
    pub store_url: Option<String>,
    /// API key for the hosted table store.
    pub store_api_key: Option<String>,
    /// Per-request store timeout in seconds.
    pub store_timeout_secs: Option<u64>,
    /// Administrator seeded into the development store.
    pub demo_admin_email: Option<String>,
    pub demo_admin_password: Option<String>,
    pub demo_admin_name: Option<String>,
}

impl AppSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Hosted store endpoint, or `None` in development mode.
    ///
    /// # Errors
    ///
    /// Fails when the URL does not parse or the API key is missing.
    pub fn store_endpoint(&self) -> Result<Option<StoreEndpoint>, SettingsError> {
        let Some(raw) = self.store_url.as_deref().filter(|url| !url.trim().is_empty()) else {
            return Ok(None);
        };
        let base_url = Url::parse(raw).map_err(|source| SettingsError::StoreUrl {
            value: raw.to_owned(),
            source,
        })?;
        let api_key = self
            .store_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(SettingsError::MissingApiKey)?;
        let timeout =
            Duration::from_secs(self.store_timeout_secs.unwrap_or(DEFAULT_STORE_TIMEOUT_SECS));
        Ok(Some(StoreEndpoint::new(base_url, api_key, timeout)))
    }

    /// Demo administrator, when both e-mail and password are configured.
    ///
    /// # Errors
    ///
    /// Fails when only one of the pair is set or the e-mail is malformed.
    pub fn demo_admin(&self) -> Result<Option<DemoAdmin>, SettingsError> {
        match (&self.demo_admin_email, &self.demo_admin_password) {
            (None, None) => Ok(None),
            (Some(email), Some(password)) => {
                let email = EmailAddress::parse("demoAdminEmail", email)
                    .map_err(|error| SettingsError::DemoAdminEmail(error.to_string()))?;
                Ok(Some(DemoAdmin {
                    email,
                    password: Zeroizing::new(password.clone()),
                    full_name: self
                        .demo_admin_name
                        .clone()
                        .unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_owned()),
                }))
            }
            _ => Err(SettingsError::IncompleteDemoAdmin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "EDUWARN_BIND_ADDR",
        "EDUWARN_STORE_URL",
        "EDUWARN_STORE_API_KEY",
        "EDUWARN_STORE_TIMEOUT_SECS",
        "EDUWARN_DEMO_ADMIN_EMAIL",
        "EDUWARN_DEMO_ADMIN_PASSWORD",
        "EDUWARN_DEMO_ADMIN_NAME",
    ];

    fn load_with(overrides: &[(&'static str, &str)]) -> AppSettings {
        let _guard = lock_env(VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        AppSettings::load_from_iter([OsString::from("eduwarn")]).expect("settings load")
    }

    #[rstest]
    fn defaults_select_development_mode() {
        let settings = load_with(&[]);
        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.store_endpoint().expect("no store").is_none());
        assert!(settings.demo_admin().expect("no admin").is_none());
    }

    #[rstest]
    fn store_settings_build_an_endpoint() {
        let settings = load_with(&[
            ("EDUWARN_STORE_URL", "https://store.example.org/rest"),
            ("EDUWARN_STORE_API_KEY", "anon-key"),
            ("EDUWARN_STORE_TIMEOUT_SECS", "3"),
        ]);
        let endpoint = settings
            .store_endpoint()
            .expect("valid store")
            .expect("endpoint");
        assert_eq!(endpoint.base_url.as_str(), "https://store.example.org/rest/");
        assert_eq!(endpoint.api_key, "anon-key");
        assert_eq!(endpoint.timeout, Duration::from_secs(3));
    }

    #[rstest]
    fn store_url_without_key_is_rejected() {
        let settings = load_with(&[("EDUWARN_STORE_URL", "https://store.example.org")]);
        assert!(matches!(
            settings.store_endpoint(),
            Err(SettingsError::MissingApiKey)
        ));
    }

    #[rstest]
    #[case(Some("ops@eduwarn.test"), None)]
    #[case(None, Some("secret"))]
    fn half_configured_demo_admin_is_rejected(
        #[case] email: Option<&'static str>,
        #[case] password: Option<&'static str>,
    ) {
        let settings = AppSettings {
            bind_addr: None,
            store_url: None,
            store_api_key: None,
            store_timeout_secs: None,
            demo_admin_email: email.map(str::to_owned),
            demo_admin_password: password.map(str::to_owned),
            demo_admin_name: None,
        };
        assert!(matches!(
            settings.demo_admin(),
            Err(SettingsError::IncompleteDemoAdmin)
        ));
    }

    #[rstest]
    fn demo_admin_defaults_its_name() {
        let settings = load_with(&[
            ("EDUWARN_DEMO_ADMIN_EMAIL", "ops@eduwarn.test"),
            ("EDUWARN_DEMO_ADMIN_PASSWORD", "secret-pass"),
        ]);
        let admin = settings.demo_admin().expect("valid").expect("admin");
        assert_eq!(admin.full_name, DEFAULT_ADMIN_NAME);
        assert_eq!(admin.email.as_str(), "ops@eduwarn.test");
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = load_with(&[("EDUWARN_BIND_ADDR", "not-an-addr")]);
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
