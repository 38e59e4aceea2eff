use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::auth::repo_types::{User, UserId};
use crate::error::{AppError, AppResult};

/// Registration form as received from the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login form. `remember` is the "remember me" checkbox.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

/// Public part of the user, safe to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

impl RegisterRequest {
    /// Form-level checks done by the boundary before calling `register`.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("name", "must not be empty"));
        }
        if !is_valid_email(&normalize_email(&self.email)) {
            return Err(AppError::validation("email", "not a valid email address"));
        }
        if self.password.is_empty() {
            return Err(AppError::validation("password", "must not be empty"));
        }
        Ok(())
    }
}
