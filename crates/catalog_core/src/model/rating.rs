//! Per-user game rating.
//!
//! # Invariants
//! - `rating` is always within `RATING_MIN..=RATING_MAX`.
//! - `user_id`, `game_id` and `id` are never nil.
//! - One rating per `(user_id, game_id)` is enforced by
//!   `GameDetailsAggregate`, not here and not by storage.

use super::game::GameId;
use super::user::UserId;
use super::validation::{check_rating, require_id, ValidationError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier of a rating.
pub type RatingId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRating {
    id: RatingId,
    user_id: UserId,
    game_id: GameId,
    rating: i32,
    created_at: DateTime<Utc>,
}

impl UserRating {
    /// Creates a rating stamped with the current UTC time.
    pub fn new(user_id: UserId, game_id: GameId, rating: i32) -> Result<Self, ValidationError> {
        Self::with_parts(Uuid::new_v4(), user_id, game_id, rating, Utc::now())
    }

    /// Rebuilds a rating from already-known parts, validating all of them.
    pub fn with_parts(
        id: RatingId,
        user_id: UserId,
        game_id: GameId,
        rating: i32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_id(id, "rating_id")?,
            user_id: require_id(user_id, "user_id")?,
            game_id: require_id(game_id, "game_id")?,
            rating: check_rating(rating)?,
            created_at,
        })
    }

    /// Sets a new score and re-stamps `created_at`.
    pub fn change(&mut self, rating: i32) -> Result<(), ValidationError> {
        self.rating = check_rating(rating)?;
        self.created_at = Utc::now();
        Ok(())
    }

    /// Copies score and timestamp from another rating; owner and game stay.
    pub(crate) fn restamp_from(&mut self, other: &UserRating) {
        self.rating = other.rating;
        self.created_at = other.created_at;
    }

    pub fn id(&self) -> RatingId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
