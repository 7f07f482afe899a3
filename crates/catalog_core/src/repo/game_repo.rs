//! Game repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `games` table.
//! - Translate constraint failures into canonical `RepoError` values.
//!
//! # Invariants
//! - A missing genre on write surfaces as `NotFound(Genre)`.
//! - `find_all` orders by `release_date DESC, id ASC`.
//! - Read paths reject rows that no longer pass `Game` validation.

use crate::model::game::{Game, GameId};
use crate::model::validation::require_id;
use crate::repo::{
    constraint_violation, parse_id, parse_timestamp, timestamp_to_db, Constraint, EntityKind,
    ListQuery, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const GAME_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    release_date,
    genre_id
FROM games";

/// Storage contract for games.
pub trait GameRepository {
    /// Persists a new game and returns the stored copy.
    fn create(&self, game: &Game) -> RepoResult<Game>;
    fn find_by_id(&self, id: GameId) -> RepoResult<Game>;
    fn find_all(&self, query: ListQuery) -> RepoResult<Vec<Game>>;
    /// Replaces every column of an existing game.
    fn update(&self, game: &Game) -> RepoResult<Game>;
    /// Deletes a game together with its ratings.
    fn delete(&self, id: GameId) -> RepoResult<()>;
    fn exists(&self, id: GameId) -> RepoResult<bool>;
}

/// SQLite-backed game repository.
#[derive(Clone, Copy)]
pub struct SqliteGameRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGameRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GameRepository for SqliteGameRepository<'_> {
    fn create(&self, game: &Game) -> RepoResult<Game> {
        self.conn
            .execute(
                "INSERT INTO games (
                    id,
                    title,
                    description,
                    release_date,
                    genre_id
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    game.id().to_string(),
                    game.title(),
                    game.description(),
                    timestamp_to_db(game.release_date()),
                    game.genre_id().to_string(),
                ],
            )
            .map_err(map_write_error)?;

        Ok(game.clone())
    }

    fn find_by_id(&self, id: GameId) -> RepoResult<Game> {
        require_id(id, "game_id")?;

        let mut stmt = self
            .conn
            .prepare(&format!("{GAME_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return parse_game_row(row);
        }

        Err(RepoError::NotFound(EntityKind::Game))
    }

    fn find_all(&self, query: ListQuery) -> RepoResult<Vec<Game>> {
        let mut sql = format!("{GAME_SELECT_SQL} ORDER BY release_date DESC, id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        query.push_sql(&mut sql, &mut bind_values);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut games = Vec::new();
        while let Some(row) = rows.next()? {
            games.push(parse_game_row(row)?);
        }

        Ok(games)
    }

    fn update(&self, game: &Game) -> RepoResult<Game> {
        let changed = self
            .conn
            .execute(
                "UPDATE games
                 SET
                    title = ?1,
                    description = ?2,
                    release_date = ?3,
                    genre_id = ?4
                 WHERE id = ?5;",
                params![
                    game.title(),
                    game.description(),
                    timestamp_to_db(game.release_date()),
                    game.genre_id().to_string(),
                    game.id().to_string(),
                ],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Game));
        }

        Ok(game.clone())
    }

    fn delete(&self, id: GameId) -> RepoResult<()> {
        require_id(id, "game_id")?;

        let changed = self
            .conn
            .execute("DELETE FROM games WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Game));
        }

        Ok(())
    }

    fn exists(&self, id: GameId) -> RepoResult<bool> {
        require_id(id, "game_id")?;

        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM games WHERE id = ?1;",
                [id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn map_write_error(err: rusqlite::Error) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::Unique) => RepoError::AlreadyExists(EntityKind::Game),
        Some(Constraint::ForeignKey) => RepoError::NotFound(EntityKind::Genre),
        None => err.into(),
    }
}

fn parse_game_row(row: &Row<'_>) -> RepoResult<Game> {
    let id: String = row.get("id")?;
    let release_date: String = row.get("release_date")?;
    let genre_id: String = row.get("genre_id")?;

    let game = Game::with_id(
        parse_id(&id, "games.id")?,
        row.get::<_, String>("title")?,
        row.get::<_, String>("description")?,
        parse_timestamp(&release_date, "games.release_date")?,
        parse_id(&genre_id, "games.genre_id")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("game row `{id}` failed validation: {err}")))?;
    Ok(game)
}
