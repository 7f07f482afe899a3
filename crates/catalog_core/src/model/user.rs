//! User domain model.
//!
//! # Invariants
//! - `username` is stored trimmed, 1..=200 characters, unique per backend.
//! - `password` is 1..=200 characters and stored exactly as given.
//!
//! Password storage is a plain-text placeholder. It must be replaced by a
//! salted one-way hash before credentials leave a development setup.

use super::validation::{
    require_id, ValidationError, PASSWORD_MAX_CHARS, USERNAME_MAX_CHARS,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a user.
pub type UserId = Uuid;

/// Authorization role attached to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Storage/wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

/// Catalog user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    username: String,
    #[serde(skip_serializing)]
    password: String,
    role: UserRole,
}

impl User {
    /// Creates a user with a freshly generated identity.
    pub fn new(
        username: impl AsRef<str>,
        password: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), username, password, role)
    }

    /// Creates a user with a caller-provided identity.
    pub fn with_id(
        id: UserId,
        username: impl AsRef<str>,
        password: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, ValidationError> {
        let id = require_id(id, "user_id")?;
        let username = normalize_username(username.as_ref())?;
        let password = password.into();
        check_password(&password)?;

        Ok(Self {
            id,
            username,
            password,
            role,
        })
    }

    /// Replaces username, password and role after re-validating all of them.
    pub fn update(
        &mut self,
        username: impl AsRef<str>,
        password: impl Into<String>,
        role: UserRole,
    ) -> Result<(), ValidationError> {
        let username = normalize_username(username.as_ref())?;
        let password = password.into();
        check_password(&password)?;

        self.username = username;
        self.password = password;
        self.role = role;
        Ok(())
    }

    /// Compares a candidate credential with the stored one.
    pub fn password_matches(&self, candidate: &str) -> bool {
        // TODO: store an argon2 hash in `password` and verify against it here.
        self.password == candidate
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Raw stored credential, for persistence backends only.
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}

fn normalize_username(username: &str) -> Result<String, ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }
    let actual = trimmed.chars().count();
    if actual > USERNAME_MAX_CHARS {
        return Err(ValidationError::UsernameTooLong { actual });
    }
    Ok(trimmed.to_string())
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }
    let actual = password.chars().count();
    if actual > PASSWORD_MAX_CHARS {
        return Err(ValidationError::PasswordTooLong { actual });
    }
    Ok(())
}
