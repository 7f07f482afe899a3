//! Game rating use-cases built on `GameDetailsAggregate`.
//!
//! # Responsibility
//! - Rebuild the aggregate from game, genre and rating repositories.
//! - Persist only what the aggregate accepted.
//!
//! # Invariants
//! - The aggregate is reconstructed per call and never cached.
//! - A rejected rating (out of range, duplicate, missing) performs no write.

use crate::aggregate::game_details::{AggregateError, GameDetailsAggregate};
use crate::model::game::GameId;
use crate::model::user::UserId;
use crate::model::validation::{check_rating, require_id};
use crate::repo::game_repo::GameRepository;
use crate::repo::genre_repo::GenreRepository;
use crate::repo::rating_repo::RatingRepository;
use crate::service::dto::GameWithStatsDto;
use crate::service::ServiceResult;
use log::info;

/// Rating and statistics service over three repositories.
pub struct RatingService<G, N, R>
where
    G: GameRepository,
    N: GenreRepository,
    R: RatingRepository,
{
    games: G,
    genres: N,
    ratings: R,
}

impl<G, N, R> RatingService<G, N, R>
where
    G: GameRepository,
    N: GenreRepository,
    R: RatingRepository,
{
    pub fn new(games: G, genres: N, ratings: R) -> Self {
        Self {
            games,
            genres,
            ratings,
        }
    }

    /// Returns the game with its genre title, average rating and count.
    pub fn game_details(&self, game_id: GameId) -> ServiceResult<GameWithStatsDto> {
        let details = self.load(game_id)?;
        Ok(GameWithStatsDto::from(&details))
    }

    /// Records the first rating of `user_id` for `game_id`.
    pub fn rate_game(
        &self,
        game_id: GameId,
        user_id: UserId,
        rating: i32,
    ) -> ServiceResult<GameWithStatsDto> {
        require_id(user_id, "user_id")?;
        check_rating(rating).map_err(AggregateError::from)?;

        let mut details = self.load(game_id)?;
        let accepted = details.add_rating(user_id, rating)?.clone();
        self.ratings.create(&accepted)?;

        info!(
            "event=rating_add module=service status=ok game_id={} rating_id={} rating_count={}",
            game_id,
            accepted.id(),
            details.rating_count()
        );
        Ok(GameWithStatsDto::from(&details))
    }

    /// Changes the existing rating of `user_id` for `game_id`.
    pub fn change_rating(
        &self,
        game_id: GameId,
        user_id: UserId,
        rating: i32,
    ) -> ServiceResult<GameWithStatsDto> {
        require_id(user_id, "user_id")?;
        check_rating(rating).map_err(AggregateError::from)?;

        let mut details = self.load(game_id)?;
        let changed = details.update_rating(user_id, rating)?.clone();
        self.ratings.update(&changed)?;

        info!(
            "event=rating_update module=service status=ok game_id={} rating_id={}",
            game_id,
            changed.id()
        );
        Ok(GameWithStatsDto::from(&details))
    }

    fn load(&self, game_id: GameId) -> ServiceResult<GameDetailsAggregate> {
        require_id(game_id, "game_id")?;

        let game = self.games.find_by_id(game_id)?;
        let genre = self.genres.find_by_id(game.genre_id())?;
        let ratings = self.ratings.find_by_game(game_id)?;
        Ok(GameDetailsAggregate::new(game, genre, ratings)?)
    }
}
