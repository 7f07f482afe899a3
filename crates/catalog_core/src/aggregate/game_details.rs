//! Game details aggregate: one game, its genre and all of its ratings.
//!
//! # Invariants
//! - `genre.id() == game.genre_id()`.
//! - Every rating belongs to `game` and no user appears twice.
//! - `rating_count == ratings.len()` and `average_rating` equals
//!   `calculate_average_rating()` after every successful mutation.
//!
//! Mutations only touch this in-memory instance. Persisting an accepted
//! rating is the caller's job (see `RatingService`).

use crate::model::game::Game;
use crate::model::genre::Genre;
use crate::model::rating::{RatingId, UserRating};
use crate::model::user::UserId;
use crate::model::validation::{check_rating, ValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Business rule violation raised by [`GameDetailsAggregate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// Rating value is outside `1..=5`.
    InvalidRating(i32),
    /// The user already rated this game.
    DuplicateRating(UserId),
    /// The user has no rating on this game to update.
    RatingNotFound(UserId),
    /// Genre passed in does not match `game.genre_id()`.
    GenreMismatch,
    /// A rating for another game was passed in.
    ForeignRating(RatingId),
    /// Any other field-level failure while building a rating.
    Validation(ValidationError),
}

impl Display for AggregateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRating(value) => {
                write!(f, "rating must be between 1 and 5, got {value}")
            }
            Self::DuplicateRating(user_id) => {
                write!(f, "user {user_id} has already rated this game")
            }
            Self::RatingNotFound(user_id) => {
                write!(f, "user {user_id} hasn't rated this game yet")
            }
            Self::GenreMismatch => write!(f, "genre does not match the game's genre_id"),
            Self::ForeignRating(id) => write!(f, "rating {id} belongs to another game"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AggregateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for AggregateError {
    fn from(value: ValidationError) -> Self {
        match value {
            ValidationError::RatingOutOfRange(rating) => Self::InvalidRating(rating),
            other => Self::Validation(other),
        }
    }
}

/// Read/compute view over a game, its genre and its ratings.
#[derive(Debug, Clone)]
pub struct GameDetailsAggregate {
    game: Game,
    genre: Genre,
    ratings: Vec<UserRating>,
    average_rating: f64,
    rating_count: usize,
}

impl GameDetailsAggregate {
    /// Composes the aggregate and derives its statistics.
    ///
    /// # Errors
    /// - `GenreMismatch` when `genre` is not the game's genre.
    /// - `ForeignRating` when a rating targets another game.
    /// - `DuplicateRating` when one user appears twice in `ratings`.
    pub fn new(game: Game, genre: Genre, ratings: Vec<UserRating>) -> Result<Self, AggregateError> {
        if genre.id() != game.genre_id() {
            return Err(AggregateError::GenreMismatch);
        }

        let mut seen = HashSet::with_capacity(ratings.len());
        for rating in &ratings {
            if rating.game_id() != game.id() {
                return Err(AggregateError::ForeignRating(rating.id()));
            }
            if !seen.insert(rating.user_id()) {
                return Err(AggregateError::DuplicateRating(rating.user_id()));
            }
        }

        let mut aggregate = Self {
            game,
            genre,
            ratings,
            average_rating: 0.0,
            rating_count: 0,
        };
        aggregate.recalculate();
        Ok(aggregate)
    }

    /// Adds a first rating from `user_id` and returns it.
    ///
    /// # Errors
    /// - `InvalidRating` when `rating` is outside `1..=5`.
    /// - `DuplicateRating` when `user_id` already rated this game.
    pub fn add_rating(&mut self, user_id: UserId, rating: i32) -> Result<&UserRating, AggregateError> {
        check_rating(rating)?;
        if self.rating_by(user_id).is_some() {
            return Err(AggregateError::DuplicateRating(user_id));
        }

        let created = UserRating::new(user_id, self.game.id(), rating)?;
        self.ratings.push(created);
        self.recalculate();

        let index = self.ratings.len() - 1;
        Ok(&self.ratings[index])
    }

    /// Replaces the score of the existing rating from `user_id`.
    ///
    /// Applies the same `1..=5` bound as [`Self::add_rating`].
    pub fn update_rating(
        &mut self,
        user_id: UserId,
        new_rating: i32,
    ) -> Result<&UserRating, AggregateError> {
        check_rating(new_rating)?;
        let index = self
            .ratings
            .iter()
            .position(|rating| rating.user_id() == user_id)
            .ok_or(AggregateError::RatingNotFound(user_id))?;

        self.ratings[index].change(new_rating)?;
        self.recalculate();
        Ok(&self.ratings[index])
    }

    /// Mean of all ratings, `0.0` when there are none.
    pub fn calculate_average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }

        let sum: i64 = self
            .ratings
            .iter()
            .map(|rating| i64::from(rating.rating()))
            .sum();
        sum as f64 / self.ratings.len() as f64
    }

    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    pub fn rating_count(&self) -> usize {
        self.rating_count
    }

    pub fn rating_by(&self, user_id: UserId) -> Option<&UserRating> {
        self.ratings.iter().find(|rating| rating.user_id() == user_id)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn genre(&self) -> &Genre {
        &self.genre
    }

    pub fn ratings(&self) -> &[UserRating] {
        &self.ratings
    }

    fn recalculate(&mut self) {
        self.average_rating = self.calculate_average_rating();
        self.rating_count = self.ratings.len();
    }
}

#[cfg(test)]
mod tests {
    use super::{AggregateError, GameDetailsAggregate};
    use crate::model::game::Game;
    use crate::model::genre::Genre;
    use crate::model::rating::UserRating;
    use chrono::Utc;
    use uuid::Uuid;

    fn fixture() -> (Game, Genre) {
        let genre = Genre::new("Strategy").unwrap();
        let game = Game::new("Anno", "city builder", Utc::now(), genre.id()).unwrap();
        (game, genre)
    }

    #[test]
    fn new_rejects_genre_of_another_game() {
        let (game, _) = fixture();
        let other = Genre::new("Puzzle").unwrap();
        let err = GameDetailsAggregate::new(game, other, Vec::new()).unwrap_err();
        assert_eq!(err, AggregateError::GenreMismatch);
    }

    #[test]
    fn new_rejects_rating_for_another_game() {
        let (game, genre) = fixture();
        let foreign = UserRating::new(Uuid::new_v4(), Uuid::new_v4(), 3).unwrap();
        let foreign_id = foreign.id();
        let err = GameDetailsAggregate::new(game, genre, vec![foreign]).unwrap_err();
        assert_eq!(err, AggregateError::ForeignRating(foreign_id));
    }

    #[test]
    fn new_rejects_two_ratings_from_same_user() {
        let (game, genre) = fixture();
        let user_id = Uuid::new_v4();
        let first = UserRating::new(user_id, game.id(), 2).unwrap();
        let second = UserRating::new(user_id, game.id(), 4).unwrap();
        let err = GameDetailsAggregate::new(game, genre, vec![first, second]).unwrap_err();
        assert_eq!(err, AggregateError::DuplicateRating(user_id));
    }

    #[test]
    fn add_rating_rejects_nil_user() {
        let (game, genre) = fixture();
        let mut aggregate = GameDetailsAggregate::new(game, genre, Vec::new()).unwrap();
        let err = aggregate.add_rating(Uuid::nil(), 3).unwrap_err();
        assert!(matches!(err, AggregateError::Validation(_)));
        assert_eq!(aggregate.rating_count(), 0);
    }
}
