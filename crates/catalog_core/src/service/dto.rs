//! Service input and output shapes.
//!
//! Wire names are camelCase. `UserDto` never carries the password.

use crate::aggregate::game_details::GameDetailsAggregate;
use crate::model::game::{Game, GameId};
use crate::model::genre::{Genre, GenreId};
use crate::model::user::{User, UserId, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub genre_id: GenreId,
}

/// Full replacement of a game; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    pub id: GameId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub genre_id: GenreId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub id: GameId,
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub genre_id: GenreId,
}

impl From<&Game> for GameDto {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id(),
            title: game.title().to_string(),
            description: game.description().to_string(),
            release_date: game.release_date(),
            genre_id: game.genre_id(),
        }
    }
}

/// Game projection with rating statistics from `GameDetailsAggregate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameWithStatsDto {
    pub id: GameId,
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub genre_id: GenreId,
    pub genre_title: String,
    pub average_rating: f64,
    pub rating_count: usize,
}

impl From<&GameDetailsAggregate> for GameWithStatsDto {
    fn from(details: &GameDetailsAggregate) -> Self {
        let game = details.game();
        Self {
            id: game.id(),
            title: game.title().to_string(),
            description: game.description().to_string(),
            release_date: game.release_date(),
            genre_id: game.genre_id(),
            genre_title: details.genre().title().to_string(),
            average_rating: details.average_rating(),
            rating_count: details.rating_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGenreRequest {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGenreRequest {
    pub id: GenreId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreDto {
    pub id: GenreId,
    pub title: String,
}

impl From<&Genre> for GenreDto {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id(),
            title: genre.title().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub user_role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub user_role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: UserId,
    pub username: String,
    pub user_role: UserRole,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            user_role: user.role(),
        }
    }
}
