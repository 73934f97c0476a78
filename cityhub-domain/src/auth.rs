use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::pii::Masked;
use crate::user::{Role, UserProfile};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("username regex"));
static SPECIAL_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("special char regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
    Reset,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub username: Option<String>,
    pub password: Masked<String>,
    pub confirm_password: Option<Masked<String>>,
}

/// Form-level validation failures. These surface verbatim as inline messages
/// and never propagate past the handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Username must contain only letters and numbers (no spaces).")]
    InvalidUsername,

    #[error("Password must contain at least one special character (!@#$).")]
    MissingSpecialCharacter,

    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,

    #[error("Passwords do not match.")]
    PasswordMismatch,
}

impl Credentials {
    /// The sign-in form's validation rules, checked in form order.
    pub fn validate(&self, mode: AuthMode) -> Result<(), AuthError> {
        if !EMAIL_RE.is_match(&self.email) {
            return Err(AuthError::InvalidEmail);
        }

        if mode == AuthMode::Register {
            let username = self.username.as_deref().unwrap_or_default();
            if !USERNAME_RE.is_match(username) {
                return Err(AuthError::InvalidUsername);
            }
        }

        if !SPECIAL_CHAR_RE.is_match(&self.password.0) {
            return Err(AuthError::MissingSpecialCharacter);
        }
        if self.password.0.len() < 6 {
            return Err(AuthError::PasswordTooShort);
        }

        if matches!(mode, AuthMode::Register | AuthMode::Reset) {
            let confirm = self.confirm_password.as_ref().map(|m| m.0.as_str());
            if confirm != Some(self.password.0.as_str()) {
                return Err(AuthError::PasswordMismatch);
            }
        }

        Ok(())
    }

    /// Display name when none was captured explicitly.
    pub fn derived_username(&self) -> String {
        self.username
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| {
                self.email
                    .split('@')
                    .next()
                    .unwrap_or("driver")
                    .to_string()
            })
    }
}

/// Credential validation capability. A real identity backend slots in here
/// without touching any handler.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn validate_credentials(
        &self,
        mode: AuthMode,
        creds: &Credentials,
    ) -> Result<UserProfile, AuthError>;
}

/// Stub backend: any well-formed credentials are accepted. Accounts whose
/// email mentions "admin" get the admin role.
pub struct StubAuthenticator;

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn validate_credentials(
        &self,
        mode: AuthMode,
        creds: &Credentials,
    ) -> Result<UserProfile, AuthError> {
        creds.validate(mode)?;

        let role = if creds.email.to_lowercase().contains("admin") {
            Role::Admin
        } else {
            Role::User
        };

        let mut profile = UserProfile::new(creds.derived_username(), role);
        profile.email = Some(creds.email.clone());
        Ok(profile)
    }
}
