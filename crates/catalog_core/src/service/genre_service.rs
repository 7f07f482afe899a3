//! Genre use-case service.

use crate::model::genre::{Genre, GenreId};
use crate::model::validation::require_id;
use crate::repo::genre_repo::GenreRepository;
use crate::repo::{EntityKind, ListQuery, RepoError};
use crate::service::dto::{CreateGenreRequest, GenreDto, UpdateGenreRequest};
use crate::service::ServiceResult;
use log::info;

/// Use-case service wrapper for genre CRUD operations.
pub struct GenreService<R: GenreRepository> {
    repo: R,
}

impl<R: GenreRepository> GenreService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_genre(&self, request: &CreateGenreRequest) -> ServiceResult<GenreDto> {
        let genre = Genre::new(request.title.as_str())?;
        let created = self.repo.create(&genre)?;
        info!(
            "event=genre_create module=service status=ok genre_id={}",
            created.id()
        );
        Ok(GenreDto::from(&created))
    }

    pub fn get_genre(&self, id: GenreId) -> ServiceResult<GenreDto> {
        require_id(id, "genre_id")?;
        let genre = self.repo.find_by_id(id)?;
        Ok(GenreDto::from(&genre))
    }

    pub fn list_genres(&self, query: ListQuery) -> ServiceResult<Vec<GenreDto>> {
        let genres = self.repo.find_all(query)?;
        Ok(genres.iter().map(GenreDto::from).collect())
    }

    pub fn update_genre(&self, request: &UpdateGenreRequest) -> ServiceResult<GenreDto> {
        let genre = Genre::with_id(request.id, request.title.as_str())?;
        let updated = self.repo.update(&genre)?;
        info!(
            "event=genre_update module=service status=ok genre_id={}",
            updated.id()
        );
        Ok(GenreDto::from(&updated))
    }

    /// Deletes a genre; fails with `Referenced(Genre)` while games use it.
    pub fn delete_genre(&self, id: GenreId) -> ServiceResult<()> {
        require_id(id, "genre_id")?;
        if !self.repo.exists(id)? {
            return Err(RepoError::NotFound(EntityKind::Genre).into());
        }

        self.repo.delete(id)?;
        info!("event=genre_delete module=service status=ok genre_id={id}");
        Ok(())
    }
}
