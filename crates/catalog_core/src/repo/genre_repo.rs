//! Genre repository contract and SQLite implementation.
//!
//! # Invariants
//! - Titles are unique; a collision on create or update is
//!   `AlreadyExists(Genre)`.
//! - Deleting a genre that games still reference is `Referenced(Genre)`.
//! - `find_all` orders by `title ASC, id ASC`.

use crate::model::genre::{Genre, GenreId};
use crate::model::validation::require_id;
use crate::repo::{
    constraint_violation, parse_id, Constraint, EntityKind, ListQuery, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

/// Storage contract for genres.
pub trait GenreRepository {
    fn create(&self, genre: &Genre) -> RepoResult<Genre>;
    fn find_by_id(&self, id: GenreId) -> RepoResult<Genre>;
    fn find_all(&self, query: ListQuery) -> RepoResult<Vec<Genre>>;
    fn update(&self, genre: &Genre) -> RepoResult<Genre>;
    fn delete(&self, id: GenreId) -> RepoResult<()>;
    fn exists(&self, id: GenreId) -> RepoResult<bool>;
}

/// SQLite-backed genre repository.
#[derive(Clone, Copy)]
pub struct SqliteGenreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGenreRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GenreRepository for SqliteGenreRepository<'_> {
    fn create(&self, genre: &Genre) -> RepoResult<Genre> {
        self.conn
            .execute(
                "INSERT INTO genres (id, title) VALUES (?1, ?2);",
                params![genre.id().to_string(), genre.title()],
            )
            .map_err(map_write_error)?;

        Ok(genre.clone())
    }

    fn find_by_id(&self, id: GenreId) -> RepoResult<Genre> {
        require_id(id, "genre_id")?;

        let mut stmt = self
            .conn
            .prepare("SELECT id, title FROM genres WHERE id = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return parse_genre_row(row);
        }

        Err(RepoError::NotFound(EntityKind::Genre))
    }

    fn find_all(&self, query: ListQuery) -> RepoResult<Vec<Genre>> {
        let mut sql = String::from("SELECT id, title FROM genres ORDER BY title ASC, id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        query.push_sql(&mut sql, &mut bind_values);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut genres = Vec::new();
        while let Some(row) = rows.next()? {
            genres.push(parse_genre_row(row)?);
        }

        Ok(genres)
    }

    fn update(&self, genre: &Genre) -> RepoResult<Genre> {
        let changed = self
            .conn
            .execute(
                "UPDATE genres SET title = ?1 WHERE id = ?2;",
                params![genre.title(), genre.id().to_string()],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Genre));
        }

        Ok(genre.clone())
    }

    fn delete(&self, id: GenreId) -> RepoResult<()> {
        require_id(id, "genre_id")?;

        let changed = self
            .conn
            .execute("DELETE FROM genres WHERE id = ?1;", [id.to_string()])
            .map_err(map_write_error)?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Genre));
        }

        Ok(())
    }

    fn exists(&self, id: GenreId) -> RepoResult<bool> {
        require_id(id, "genre_id")?;

        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM genres WHERE id = ?1;",
                [id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn map_write_error(err: rusqlite::Error) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::Unique) => RepoError::AlreadyExists(EntityKind::Genre),
        Some(Constraint::ForeignKey) => RepoError::Referenced(EntityKind::Genre),
        None => err.into(),
    }
}

fn parse_genre_row(row: &Row<'_>) -> RepoResult<Genre> {
    let id: String = row.get("id")?;
    let title: String = row.get("title")?;

    Genre::with_id(parse_id(&id, "genres.id")?, title)
        .map_err(|err| RepoError::InvalidData(format!("genre row `{id}` failed validation: {err}")))
}
