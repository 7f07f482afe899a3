//! User repository contract and SQLite implementation.
//!
//! # Invariants
//! - Usernames are unique; collisions are `AlreadyExists(User)`.
//! - `find_by_username` matches the trimmed username exactly.
//! - `find_all` orders by `username ASC`.
//! - Deleting a user removes that user's ratings.

use crate::model::user::{User, UserId, UserRole};
use crate::model::validation::{require_id, ValidationError};
use crate::repo::{
    constraint_violation, parse_id, Constraint, EntityKind, ListQuery, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::str::FromStr;

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    password,
    user_role
FROM users";

/// Storage contract for users.
pub trait UserRepository {
    fn create(&self, user: &User) -> RepoResult<User>;
    fn find_by_id(&self, id: UserId) -> RepoResult<User>;
    /// Looks a user up by unique username; `NotFound(User)` when absent.
    fn find_by_username(&self, username: &str) -> RepoResult<User>;
    fn find_all(&self, query: ListQuery) -> RepoResult<Vec<User>>;
    fn update(&self, user: &User) -> RepoResult<User>;
    fn delete(&self, id: UserId) -> RepoResult<()>;
    fn exists(&self, id: UserId) -> RepoResult<bool>;
}

/// Trims a username lookup key, rejecting an empty one.
pub(crate) fn lookup_username(username: &str) -> RepoResult<&str> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::UsernameEmpty.into());
    }
    Ok(trimmed)
}

/// SQLite-backed user repository.
#[derive(Clone, Copy)]
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn find_one(&self, filter: &str, key: &str) -> RepoResult<User> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE {filter} = ?1;"))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return parse_user_row(row);
        }

        Err(RepoError::NotFound(EntityKind::User))
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create(&self, user: &User) -> RepoResult<User> {
        self.conn
            .execute(
                "INSERT INTO users (id, username, password, user_role) VALUES (?1, ?2, ?3, ?4);",
                params![
                    user.id().to_string(),
                    user.username(),
                    user.password(),
                    user.role().as_str(),
                ],
            )
            .map_err(map_write_error)?;

        Ok(user.clone())
    }

    fn find_by_id(&self, id: UserId) -> RepoResult<User> {
        require_id(id, "user_id")?;
        self.find_one("id", &id.to_string())
    }

    fn find_by_username(&self, username: &str) -> RepoResult<User> {
        let username = lookup_username(username)?;
        self.find_one("username", username)
    }

    fn find_all(&self, query: ListQuery) -> RepoResult<Vec<User>> {
        let mut sql = format!("{USER_SELECT_SQL} ORDER BY username ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        query.push_sql(&mut sql, &mut bind_values);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }

    fn update(&self, user: &User) -> RepoResult<User> {
        let changed = self
            .conn
            .execute(
                "UPDATE users
                 SET
                    username = ?1,
                    password = ?2,
                    user_role = ?3
                 WHERE id = ?4;",
                params![
                    user.username(),
                    user.password(),
                    user.role().as_str(),
                    user.id().to_string(),
                ],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::User));
        }

        Ok(user.clone())
    }

    fn delete(&self, id: UserId) -> RepoResult<()> {
        require_id(id, "user_id")?;

        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::User));
        }

        Ok(())
    }

    fn exists(&self, id: UserId) -> RepoResult<bool> {
        require_id(id, "user_id")?;

        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM users WHERE id = ?1;",
                [id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn map_write_error(err: rusqlite::Error) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::Unique) => RepoError::AlreadyExists(EntityKind::User),
        _ => err.into(),
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id: String = row.get("id")?;
    let role_text: String = row.get("user_role")?;
    let role = UserRole::from_str(&role_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid user role `{role_text}` in users.user_role"))
    })?;

    User::with_id(
        parse_id(&id, "users.id")?,
        row.get::<_, String>("username")?,
        row.get::<_, String>("password")?,
        role,
    )
    .map_err(|err| RepoError::InvalidData(format!("user row `{id}` failed validation: {err}")))
}
