//! Game use-case service.
//!
//! # Invariants
//! - Updates replace every field. The replacement is validated before any
//!   repository call, so bad input is `Validation` even for a missing id.
//! - Delete checks existence first so a missing game is `NotFound(Game)`.

use crate::model::game::{Game, GameId};
use crate::model::validation::require_id;
use crate::repo::game_repo::GameRepository;
use crate::repo::{EntityKind, ListQuery, RepoError};
use crate::service::dto::{CreateGameRequest, GameDto, UpdateGameRequest};
use crate::service::ServiceResult;
use log::info;

/// Use-case service wrapper for game CRUD operations.
pub struct GameService<R: GameRepository> {
    repo: R,
}

impl<R: GameRepository> GameService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_game(&self, request: &CreateGameRequest) -> ServiceResult<GameDto> {
        let game = Game::new(
            request.title.as_str(),
            request.description.as_str(),
            request.release_date,
            request.genre_id,
        )?;

        let created = self.repo.create(&game)?;
        info!(
            "event=game_create module=service status=ok game_id={} genre_id={}",
            created.id(),
            created.genre_id()
        );
        Ok(GameDto::from(&created))
    }

    pub fn get_game(&self, id: GameId) -> ServiceResult<GameDto> {
        require_id(id, "game_id")?;
        let game = self.repo.find_by_id(id)?;
        Ok(GameDto::from(&game))
    }

    pub fn list_games(&self, query: ListQuery) -> ServiceResult<Vec<GameDto>> {
        let games = self.repo.find_all(query)?;
        Ok(games.iter().map(GameDto::from).collect())
    }

    pub fn update_game(&self, request: &UpdateGameRequest) -> ServiceResult<GameDto> {
        let game = Game::with_id(
            request.id,
            request.title.as_str(),
            request.description.as_str(),
            request.release_date,
            request.genre_id,
        )?;

        let updated = self.repo.update(&game)?;
        info!(
            "event=game_update module=service status=ok game_id={}",
            updated.id()
        );
        Ok(GameDto::from(&updated))
    }

    pub fn delete_game(&self, id: GameId) -> ServiceResult<()> {
        require_id(id, "game_id")?;
        if !self.repo.exists(id)? {
            return Err(RepoError::NotFound(EntityKind::Game).into());
        }

        self.repo.delete(id)?;
        info!("event=game_delete module=service status=ok game_id={id}");
        Ok(())
    }
}
