//! User use-case service.
//!
//! # Invariants
//! - Passwords never leave the service; `UserDto` has no password field.
//! - Credential checks go through `User::password_matches`, which is a
//!   plain-text placeholder until hashed storage lands.
//! - Unknown username and wrong password are indistinguishable to callers.

use crate::model::user::{User, UserId, UserRole};
use crate::model::validation::require_id;
use crate::repo::user_repo::UserRepository;
use crate::repo::{EntityKind, ListQuery, RepoError};
use crate::service::dto::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

/// Use-case service wrapper for user accounts.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_user(&self, request: &CreateUserRequest) -> ServiceResult<UserDto> {
        let user = User::new(
            request.username.as_str(),
            request.password.as_str(),
            request.user_role,
        )?;
        let created = self.repo.create(&user)?;
        info!(
            "event=user_create module=service status=ok user_id={} role={}",
            created.id(),
            created.role()
        );
        Ok(UserDto::from(&created))
    }

    /// Self-service sign-up; always grants `UserRole::User`.
    pub fn register(&self, username: &str, password: &str) -> ServiceResult<UserDto> {
        self.create_user(&CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            user_role: UserRole::User,
        })
    }

    pub fn get_user(&self, id: UserId) -> ServiceResult<UserDto> {
        require_id(id, "user_id")?;
        let user = self.repo.find_by_id(id)?;
        Ok(UserDto::from(&user))
    }

    pub fn list_users(&self, query: ListQuery) -> ServiceResult<Vec<UserDto>> {
        let users = self.repo.find_all(query)?;
        Ok(users.iter().map(UserDto::from).collect())
    }

    pub fn update_user(&self, request: &UpdateUserRequest) -> ServiceResult<UserDto> {
        let user = User::with_id(
            request.id,
            request.username.as_str(),
            request.password.as_str(),
            request.user_role,
        )?;
        let updated = self.repo.update(&user)?;
        info!(
            "event=user_update module=service status=ok user_id={}",
            updated.id()
        );
        Ok(UserDto::from(&updated))
    }

    pub fn delete_user(&self, id: UserId) -> ServiceResult<()> {
        require_id(id, "user_id")?;
        if !self.repo.exists(id)? {
            return Err(RepoError::NotFound(EntityKind::User).into());
        }

        self.repo.delete(id)?;
        info!("event=user_delete module=service status=ok user_id={id}");
        Ok(())
    }

    /// Checks a username/password pair and returns the matching account.
    ///
    /// # Errors
    /// - `Unauthorized` for an unknown username, a blank credential or a
    ///   password mismatch.
    pub fn authenticate(&self, username: &str, password: &str) -> ServiceResult<UserDto> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(ServiceError::Unauthorized);
        }

        let user = match self.repo.find_by_username(username) {
            Ok(user) => user,
            Err(RepoError::NotFound(EntityKind::User)) => {
                warn!("event=user_auth module=service status=rejected reason=unknown_user");
                return Err(ServiceError::Unauthorized);
            }
            Err(err) => return Err(err.into()),
        };

        if !user.password_matches(password) {
            warn!(
                "event=user_auth module=service status=rejected reason=bad_credentials user_id={}",
                user.id()
            );
            return Err(ServiceError::Unauthorized);
        }

        Ok(UserDto::from(&user))
    }
}
