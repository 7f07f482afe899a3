//! Game domain model.
//!
//! # Responsibility
//! - Define the catalog game record and its validated lifecycle.
//!
//! # Invariants
//! - `title` is 1..=200 characters and not whitespace-only.
//! - `description` is at most 2000 characters.
//! - `release_date` is never more than `RELEASE_HORIZON_DAYS` after the
//!   moment it was last validated, and never before `EARLIEST_RELEASE_YEAR`.
//! - `id` and `genre_id` are never nil.
//! - Updates are all-or-nothing: a rejected update leaves the game intact.

use super::genre::GenreId;
use super::validation::{
    check_title, require_id, ValidationError, DESCRIPTION_MAX_CHARS, EARLIEST_RELEASE_YEAR,
    RELEASE_HORIZON_DAYS,
};
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier of a game.
pub type GameId = Uuid;

/// Catalog game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    id: GameId,
    title: String,
    description: String,
    release_date: DateTime<Utc>,
    genre_id: GenreId,
}

impl Game {
    /// Creates a game with a freshly generated identity.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        release_date: DateTime<Utc>,
        genre_id: GenreId,
    ) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), title, description, release_date, genre_id)
    }

    /// Creates a game with a caller-provided identity.
    ///
    /// Used by backends rehydrating persisted rows and by import paths.
    pub fn with_id(
        id: GameId,
        title: impl Into<String>,
        description: impl Into<String>,
        release_date: DateTime<Utc>,
        genre_id: GenreId,
    ) -> Result<Self, ValidationError> {
        let id = require_id(id, "game_id")?;
        let title = title.into();
        let description = description.into();
        validate_fields(&title, &description, release_date, genre_id)?;

        Ok(Self {
            id,
            title,
            description,
            release_date,
            genre_id,
        })
    }

    /// Replaces every mutable field after re-checking all invariants.
    ///
    /// # Errors
    /// - Returns the first failing field; the game is left unchanged.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        release_date: DateTime<Utc>,
        genre_id: GenreId,
    ) -> Result<(), ValidationError> {
        let title = title.into();
        let description = description.into();
        validate_fields(&title, &description, release_date, genre_id)?;

        self.title = title;
        self.description = description;
        self.release_date = release_date;
        self.genre_id = genre_id;
        Ok(())
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn release_date(&self) -> DateTime<Utc> {
        self.release_date
    }

    pub fn genre_id(&self) -> GenreId {
        self.genre_id
    }
}

/// Latest release date accepted right now.
pub fn release_horizon() -> DateTime<Utc> {
    Utc::now() + Duration::days(RELEASE_HORIZON_DAYS)
}

fn validate_fields(
    title: &str,
    description: &str,
    release_date: DateTime<Utc>,
    genre_id: GenreId,
) -> Result<(), ValidationError> {
    check_title(title)?;

    let actual = description.chars().count();
    if actual > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::DescriptionTooLong { actual });
    }

    if release_date > release_horizon() {
        return Err(ValidationError::ReleaseDateTooFar);
    }
    if release_date.year() < EARLIEST_RELEASE_YEAR {
        return Err(ValidationError::ReleaseDateTooEarly);
    }

    require_id(genre_id, "genre_id")?;
    Ok(())
}
