//! Profiles, roles and e-mail addresses.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::forms::{FieldError, required};
use super::{Language, UserId};

/// Role requested at sign-up and granted by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Learner; approved on creation.
    Student,
    /// Course author; requires approval.
    Teacher,
    /// Site administrator; requires approval.
    Admin,
}

impl Role {
    /// Lowercase name stored in the `profiles.role` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    /// Whether new accounts with this role start approved.
    #[must_use]
    pub const fn auto_approved(self) -> bool {
        matches!(self, Self::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "admin" => Ok(Self::Admin),
            "" => Err(FieldError::Missing { field: "role" }),
            _ => Err(FieldError::Invalid { field: "role" }),
        }
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("e-mail regex failed to compile: {error}"))
    })
}

/// Syntactically plausible e-mail address (`local@domain.tld`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate an address for the named field.
    ///
    /// # Examples
    /// ```
    /// use eduwarn::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::parse("email", "sita@example.org").is_ok());
    /// assert!(EmailAddress::parse("email", "sita@localhost").is_err());
    /// ```
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, FieldError> {
        let value = required(field, raw)?;
        if !email_regex().is_match(&value) {
            return Err(FieldError::Invalid { field });
        }
        Ok(Self(value))
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse("email", &value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// A row of the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub role_approved: bool,
    pub edu_coins: i64,
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Profile for a freshly registered account.
    ///
    /// Students are approved immediately; teacher and admin requests wait
    /// for an administrator.
    #[must_use]
    pub fn new_signup(
        id: UserId,
        email: &EmailAddress,
        full_name: String,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.as_str().to_owned(),
            full_name,
            role,
            role_approved: role.auto_approved(),
            edu_coins: 0,
            preferred_language: Language::En,
            created_at,
        }
    }

    /// Approved administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role_approved && self.role == Role::Admin
    }

    /// Approved administrator or approved teacher.
    #[must_use]
    pub fn can_manage_courses(&self) -> bool {
        self.role_approved && matches!(self.role, Role::Admin | Role::Teacher)
    }
}
