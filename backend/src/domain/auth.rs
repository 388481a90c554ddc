//! Sign-up and login input validation.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a service.

use std::fmt;

use zeroize::Zeroizing;

use super::forms::{FieldError, required};
use super::{EmailAddress, Role};

/// Minimum password length in characters.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Raw sign-up input.
#[derive(Clone, Default)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub confirm_password: Zeroizing<String>,
    pub role: String,
}

impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Validated sign-up request.
///
/// ## Invariants
/// - `full_name` is trimmed and non-empty.
/// - `password` has at least [`PASSWORD_MIN_LEN`] characters and matched its
///   confirmation. It keeps caller-provided whitespace.
#[derive(Clone)]
pub struct SignUp {
    full_name: String,
    email: EmailAddress,
    password: Zeroizing<String>,
    role: Role,
}

impl SignUpForm {
    /// Validate every field in form order.
    ///
    /// # Examples
    /// ```
    /// use eduwarn::domain::{Role, SignUpForm};
    ///
    /// let form = SignUpForm {
    ///     full_name: "Sita Sharma".into(),
    ///     email: "sita@example.org".into(),
    ///     password: "secret1".to_owned().into(),
    ///     confirm_password: "secret1".to_owned().into(),
    ///     role: "student".into(),
    /// };
    /// let signup = form.validate().expect("valid form");
    /// assert_eq!(signup.role(), Role::Student);
    /// ```
    pub fn validate(&self) -> Result<SignUp, FieldError> {
        let full_name = required("fullName", &self.full_name)?;
        let email = EmailAddress::parse("email", &self.email)?;
        if self.password.trim().is_empty() {
            return Err(FieldError::Missing { field: "password" });
        }
        if self.confirm_password.trim().is_empty() {
            return Err(FieldError::Missing {
                field: "confirmPassword",
            });
        }
        let role: Role = self.role.parse()?;
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(FieldError::TooShort {
                field: "password",
                min: PASSWORD_MIN_LEN,
            });
        }
        if self.password.as_str() != self.confirm_password.as_str() {
            return Err(FieldError::PasswordMismatch);
        }
        Ok(SignUp {
            full_name,
            email,
            password: self.password.clone(),
            role,
        })
    }
}

impl SignUp {
    /// Display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Login e-mail.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Debug for SignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUp")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Validated login credentials.
#[derive(Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FieldError> {
        let email = EmailAddress::parse("email", email)?;
        if password.is_empty() {
            return Err(FieldError::Missing { field: "password" });
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Login e-mail.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
