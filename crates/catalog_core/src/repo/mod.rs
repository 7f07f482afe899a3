//! Repository contracts, canonical errors and storage backends.
//!
//! # Responsibility
//! - Define one storage-agnostic contract per entity.
//! - Provide an in-memory backend and a SQLite backend that behave the same
//!   for every observable outcome except list ordering.
//!
//! # Invariants
//! - Backends never re-check field rules; entities arrive already valid.
//! - Missing identities surface as `RepoError::NotFound(kind)`, collisions as
//!   `RepoError::AlreadyExists(kind)`, independent of message text.
//! - Nil identities are rejected as `RepoError::Validation` before any
//!   storage access.
//! - `exists` reports absence as `Ok(false)`, never as an error.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Value;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod game_repo;
pub mod genre_repo;
pub mod memory;
pub mod rating_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity family an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Game,
    Genre,
    User,
    Rating,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Genre => "genre",
            Self::User => "user",
            Self::Rating => "rating",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository error shared by every entity contract and backend.
#[derive(Debug)]
pub enum RepoError {
    /// Malformed input (nil identity, empty lookup key).
    Validation(ValidationError),
    /// Unexpected driver or I/O failure.
    Storage(DbError),
    /// No entity of this kind with the requested identity or key.
    NotFound(EntityKind),
    /// Identity or unique field already taken.
    AlreadyExists(EntityKind),
    /// Delete refused because other entities still point at this one.
    Referenced(EntityKind),
    /// The in-memory store lock was poisoned by a panicking writer.
    Poisoned,
    /// Persisted data cannot be turned back into a valid entity.
    InvalidData(String),
}

impl RepoError {
    pub fn is_not_found(&self, kind: EntityKind) -> bool {
        matches!(self, Self::NotFound(found) if *found == kind)
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
            Self::NotFound(kind) => write!(f, "{kind} not found"),
            Self::AlreadyExists(kind) => write!(f, "{kind} already exists"),
            Self::Referenced(kind) => write!(f, "{kind} is still referenced"),
            Self::Poisoned => write!(f, "in-memory store lock poisoned"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

/// Pagination for `find_all`.
///
/// `limit: None` returns everything from `offset` on. An offset past the end
/// yields an empty list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

impl ListQuery {
    /// Every entity, no offset.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a query from signed caller input.
    ///
    /// `limit <= 0` means "no limit"; a negative offset is treated as `0`.
    pub fn page(limit: i64, offset: i64) -> Self {
        let limit = (limit > 0).then(|| u32::try_from(limit).unwrap_or(u32::MAX));
        let offset = u32::try_from(offset.max(0)).unwrap_or(u32::MAX);
        Self { limit, offset }
    }

    pub(crate) fn slice<'a, T, I>(&self, items: I) -> Vec<T>
    where
        T: Clone + 'a,
        I: Iterator<Item = &'a T>,
    {
        let skipped = items.skip(self.offset as usize);
        match self.limit {
            Some(limit) => skipped.take(limit as usize).cloned().collect(),
            None => skipped.cloned().collect(),
        }
    }

    pub(crate) fn push_sql(&self, sql: &mut String, bind_values: &mut Vec<Value>) {
        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ? OFFSET ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            bind_values.push(Value::Integer(i64::from(self.offset)));
        } else if self.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(self.offset)));
        }
    }
}

// Extended result codes from sqlite3.h.
const SQLITE_CONSTRAINT_FOREIGNKEY: i32 = 787;
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    ForeignKey,
}

/// Classifies a constraint failure from its typed extended result code.
pub(crate) fn constraint_violation(err: &rusqlite::Error) -> Option<Constraint> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            match failure.extended_code {
                SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY => {
                    Some(Constraint::Unique)
                }
                SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
                _ => None,
            }
        }
        _ => None,
    }
}

pub(crate) fn timestamp_to_db(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_timestamp(value: &str, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| RepoError::InvalidData(format!("invalid timestamp `{value}` in {column}")))
}

pub(crate) fn parse_id(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

#[cfg(test)]
mod tests {
    use super::{constraint_violation, parse_timestamp, timestamp_to_db, Constraint, ListQuery};
    use chrono::{TimeZone, Utc};
    use rusqlite::Connection;

    #[test]
    fn page_treats_non_positive_limit_as_unbounded() {
        assert_eq!(ListQuery::page(0, 3), ListQuery { limit: None, offset: 3 });
        assert_eq!(ListQuery::page(-5, -1), ListQuery::all());
        assert_eq!(
            ListQuery::page(2, 1),
            ListQuery {
                limit: Some(2),
                offset: 1
            }
        );
    }

    #[test]
    fn slice_clamps_offset_past_end() {
        let items = [1, 2, 3];
        assert!(ListQuery::page(0, 10).slice(items.iter()).is_empty());
        assert_eq!(ListQuery::page(1, 1).slice(items.iter()), vec![2]);
        assert_eq!(ListQuery::page(0, 1).slice(items.iter()), vec![2, 3]);
    }

    #[test]
    fn timestamps_are_fixed_width_and_roundtrip() {
        let value = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let text = timestamp_to_db(value);
        assert_eq!(text, "2024-03-09T07:05:01.000000000Z");
        assert_eq!(parse_timestamp(&text, "t").unwrap(), value);
    }

    #[test]
    fn constraint_violation_reads_extended_codes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id TEXT PRIMARY KEY, name TEXT UNIQUE);
             CREATE TABLE child (id TEXT PRIMARY KEY, parent_id TEXT REFERENCES parent(id));
             INSERT INTO parent (id, name) VALUES ('p', 'n');",
        )
        .unwrap();

        let pk = conn
            .execute("INSERT INTO parent (id, name) VALUES ('p', 'other')", [])
            .unwrap_err();
        assert_eq!(constraint_violation(&pk), Some(Constraint::Unique));

        let unique = conn
            .execute("INSERT INTO parent (id, name) VALUES ('q', 'n')", [])
            .unwrap_err();
        assert_eq!(constraint_violation(&unique), Some(Constraint::Unique));

        let fk = conn
            .execute("INSERT INTO child (id, parent_id) VALUES ('c', 'missing')", [])
            .unwrap_err();
        assert_eq!(constraint_violation(&fk), Some(Constraint::ForeignKey));
    }
}
