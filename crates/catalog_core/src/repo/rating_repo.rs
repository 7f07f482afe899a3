//! Rating repository contract and SQLite implementation.
//!
//! # Invariants
//! - Storage does not enforce one rating per (user, game); the
//!   `GameDetailsAggregate` decides what gets written.
//! - A write against a missing game reports `NotFound(Game)` before a
//!   missing user reports `NotFound(User)`.
//! - `find_by_game` orders by `created_at ASC, id ASC` and returns an empty
//!   list for a game without ratings.

use crate::model::game::GameId;
use crate::model::rating::UserRating;
use crate::model::validation::require_id;
use crate::repo::{
    constraint_violation, parse_id, parse_timestamp, timestamp_to_db, Constraint, EntityKind,
    RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Storage contract for per-user game ratings.
pub trait RatingRepository {
    fn create(&self, rating: &UserRating) -> RepoResult<UserRating>;
    /// Replaces score and timestamp of an existing rating.
    fn update(&self, rating: &UserRating) -> RepoResult<UserRating>;
    fn find_by_game(&self, game_id: GameId) -> RepoResult<Vec<UserRating>>;
}

/// SQLite-backed rating repository.
#[derive(Clone, Copy)]
pub struct SqliteRatingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRatingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn missing_parent(&self, rating: &UserRating) -> RepoResult<RepoError> {
        let game_found = self
            .conn
            .query_row(
                "SELECT 1 FROM games WHERE id = ?1;",
                [rating.game_id().to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        let kind = if game_found.is_none() {
            EntityKind::Game
        } else {
            EntityKind::User
        };
        Ok(RepoError::NotFound(kind))
    }
}

impl RatingRepository for SqliteRatingRepository<'_> {
    fn create(&self, rating: &UserRating) -> RepoResult<UserRating> {
        let result = self.conn.execute(
            "INSERT INTO user_ratings (
                id,
                user_id,
                game_id,
                rating,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                rating.id().to_string(),
                rating.user_id().to_string(),
                rating.game_id().to_string(),
                rating.rating(),
                timestamp_to_db(rating.created_at()),
            ],
        );

        match result {
            Ok(_) => Ok(rating.clone()),
            Err(err) => match constraint_violation(&err) {
                Some(Constraint::Unique) => Err(RepoError::AlreadyExists(EntityKind::Rating)),
                Some(Constraint::ForeignKey) => Err(self.missing_parent(rating)?),
                None => Err(err.into()),
            },
        }
    }

    fn update(&self, rating: &UserRating) -> RepoResult<UserRating> {
        let mut stmt = self.conn.prepare(
            "UPDATE user_ratings
             SET
                rating = ?1,
                created_at = ?2
             WHERE id = ?3
             RETURNING id, user_id, game_id, rating, created_at;",
        )?;
        let mut rows = stmt.query(params![
            rating.rating(),
            timestamp_to_db(rating.created_at()),
            rating.id().to_string(),
        ])?;
        if let Some(row) = rows.next()? {
            return parse_rating_row(row);
        }

        Err(RepoError::NotFound(EntityKind::Rating))
    }

    fn find_by_game(&self, game_id: GameId) -> RepoResult<Vec<UserRating>> {
        require_id(game_id, "game_id")?;

        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, game_id, rating, created_at
             FROM user_ratings
             WHERE game_id = ?1
             ORDER BY created_at ASC, id ASC;",
        )?;
        let mut rows = stmt.query([game_id.to_string()])?;
        let mut ratings = Vec::new();
        while let Some(row) = rows.next()? {
            ratings.push(parse_rating_row(row)?);
        }

        Ok(ratings)
    }
}

fn parse_rating_row(row: &Row<'_>) -> RepoResult<UserRating> {
    let id: String = row.get("id")?;
    let user_id: String = row.get("user_id")?;
    let game_id: String = row.get("game_id")?;
    let created_at: String = row.get("created_at")?;

    UserRating::with_parts(
        parse_id(&id, "user_ratings.id")?,
        parse_id(&user_id, "user_ratings.user_id")?,
        parse_id(&game_id, "user_ratings.game_id")?,
        row.get::<_, i32>("rating")?,
        parse_timestamp(&created_at, "user_ratings.created_at")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("rating row `{id}` failed validation: {err}")))
}
