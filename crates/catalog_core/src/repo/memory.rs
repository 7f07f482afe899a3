//! In-memory backend for every repository contract.
//!
//! # Responsibility
//! - Hold all entity tables of one catalog in a single owned [`MemoryStore`].
//! - Mirror the SQLite backend's canonical errors and referential rules.
//!
//! # Invariants
//! - One reader/writer lock guards all tables: reads share it, writes are
//!   exclusive across every entity type.
//! - Entities are cloned on the way in and on the way out; callers never hold
//!   a reference into the store.
//! - Tables are ordered by identity, so `find_all` pages are stable for a
//!   given store state.

use crate::model::game::{Game, GameId};
use crate::model::genre::{Genre, GenreId};
use crate::model::rating::{RatingId, UserRating};
use crate::model::user::{User, UserId};
use crate::model::validation::require_id;
use crate::repo::game_repo::GameRepository;
use crate::repo::genre_repo::GenreRepository;
use crate::repo::rating_repo::RatingRepository;
use crate::repo::user_repo::{lookup_username, UserRepository};
use crate::repo::{EntityKind, ListQuery, RepoError, RepoResult};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Tables {
    games: BTreeMap<GameId, Game>,
    genres: BTreeMap<GenreId, Genre>,
    users: BTreeMap<UserId, User>,
    ratings: BTreeMap<RatingId, UserRating>,
}

/// Row counts of a [`MemoryStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub games: usize,
    pub genres: usize,
    pub users: usize,
    pub ratings: usize,
}

/// Shared in-memory catalog storage.
///
/// Repositories built from the same `Arc<MemoryStore>` see each other's
/// writes, the way SQLite repositories sharing one connection do.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn counts(&self) -> RepoResult<StoreCounts> {
        let tables = self.read()?;
        Ok(StoreCounts {
            games: tables.games.len(),
            genres: tables.genres.len(),
            users: tables.users.len(),
            ratings: tables.ratings.len(),
        })
    }

    /// Drops every row from every table.
    pub fn clear(&self) -> RepoResult<()> {
        *self.write()? = Tables::default();
        Ok(())
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| RepoError::Poisoned)
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| RepoError::Poisoned)
    }
}

/// In-memory game repository.
#[derive(Debug, Clone)]
pub struct MemoryGameRepository {
    store: Arc<MemoryStore>,
}

impl MemoryGameRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl GameRepository for MemoryGameRepository {
    fn create(&self, game: &Game) -> RepoResult<Game> {
        let mut tables = self.store.write()?;
        if tables.games.contains_key(&game.id()) {
            return Err(RepoError::AlreadyExists(EntityKind::Game));
        }
        if !tables.genres.contains_key(&game.genre_id()) {
            return Err(RepoError::NotFound(EntityKind::Genre));
        }

        tables.games.insert(game.id(), game.clone());
        Ok(game.clone())
    }

    fn find_by_id(&self, id: GameId) -> RepoResult<Game> {
        require_id(id, "game_id")?;
        self.store
            .read()?
            .games
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound(EntityKind::Game))
    }

    fn find_all(&self, query: ListQuery) -> RepoResult<Vec<Game>> {
        Ok(query.slice(self.store.read()?.games.values()))
    }

    fn update(&self, game: &Game) -> RepoResult<Game> {
        let mut tables = self.store.write()?;
        if !tables.games.contains_key(&game.id()) {
            return Err(RepoError::NotFound(EntityKind::Game));
        }
        if !tables.genres.contains_key(&game.genre_id()) {
            return Err(RepoError::NotFound(EntityKind::Genre));
        }

        tables.games.insert(game.id(), game.clone());
        Ok(game.clone())
    }

    fn delete(&self, id: GameId) -> RepoResult<()> {
        require_id(id, "game_id")?;
        let mut tables = self.store.write()?;
        if tables.games.remove(&id).is_none() {
            return Err(RepoError::NotFound(EntityKind::Game));
        }

        tables.ratings.retain(|_, rating| rating.game_id() != id);
        Ok(())
    }

    fn exists(&self, id: GameId) -> RepoResult<bool> {
        require_id(id, "game_id")?;
        Ok(self.store.read()?.games.contains_key(&id))
    }
}

/// In-memory genre repository.
#[derive(Debug, Clone)]
pub struct MemoryGenreRepository {
    store: Arc<MemoryStore>,
}

impl MemoryGenreRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl GenreRepository for MemoryGenreRepository {
    fn create(&self, genre: &Genre) -> RepoResult<Genre> {
        let mut tables = self.store.write()?;
        let taken = tables.genres.contains_key(&genre.id())
            || tables
                .genres
                .values()
                .any(|existing| existing.title() == genre.title());
        if taken {
            return Err(RepoError::AlreadyExists(EntityKind::Genre));
        }

        tables.genres.insert(genre.id(), genre.clone());
        Ok(genre.clone())
    }

    fn find_by_id(&self, id: GenreId) -> RepoResult<Genre> {
        require_id(id, "genre_id")?;
        self.store
            .read()?
            .genres
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound(EntityKind::Genre))
    }

    fn find_all(&self, query: ListQuery) -> RepoResult<Vec<Genre>> {
        Ok(query.slice(self.store.read()?.genres.values()))
    }

    fn update(&self, genre: &Genre) -> RepoResult<Genre> {
        let mut tables = self.store.write()?;
        if !tables.genres.contains_key(&genre.id()) {
            return Err(RepoError::NotFound(EntityKind::Genre));
        }
        let title_taken = tables
            .genres
            .values()
            .any(|existing| existing.id() != genre.id() && existing.title() == genre.title());
        if title_taken {
            return Err(RepoError::AlreadyExists(EntityKind::Genre));
        }

        tables.genres.insert(genre.id(), genre.clone());
        Ok(genre.clone())
    }

    fn delete(&self, id: GenreId) -> RepoResult<()> {
        require_id(id, "genre_id")?;
        let mut tables = self.store.write()?;
        if !tables.genres.contains_key(&id) {
            return Err(RepoError::NotFound(EntityKind::Genre));
        }
        if tables.games.values().any(|game| game.genre_id() == id) {
            return Err(RepoError::Referenced(EntityKind::Genre));
        }

        tables.genres.remove(&id);
        Ok(())
    }

    fn exists(&self, id: GenreId) -> RepoResult<bool> {
        require_id(id, "genre_id")?;
        Ok(self.store.read()?.genres.contains_key(&id))
    }
}

/// In-memory user repository.
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl UserRepository for MemoryUserRepository {
    fn create(&self, user: &User) -> RepoResult<User> {
        let mut tables = self.store.write()?;
        let taken = tables.users.contains_key(&user.id())
            || tables
                .users
                .values()
                .any(|existing| existing.username() == user.username());
        if taken {
            return Err(RepoError::AlreadyExists(EntityKind::User));
        }

        tables.users.insert(user.id(), user.clone());
        Ok(user.clone())
    }

    fn find_by_id(&self, id: UserId) -> RepoResult<User> {
        require_id(id, "user_id")?;
        self.store
            .read()?
            .users
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound(EntityKind::User))
    }

    fn find_by_username(&self, username: &str) -> RepoResult<User> {
        let username = lookup_username(username)?;
        self.store
            .read()?
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned()
            .ok_or(RepoError::NotFound(EntityKind::User))
    }

    fn find_all(&self, query: ListQuery) -> RepoResult<Vec<User>> {
        Ok(query.slice(self.store.read()?.users.values()))
    }

    fn update(&self, user: &User) -> RepoResult<User> {
        let mut tables = self.store.write()?;
        if !tables.users.contains_key(&user.id()) {
            return Err(RepoError::NotFound(EntityKind::User));
        }
        let username_taken = tables
            .users
            .values()
            .any(|existing| existing.id() != user.id() && existing.username() == user.username());
        if username_taken {
            return Err(RepoError::AlreadyExists(EntityKind::User));
        }

        tables.users.insert(user.id(), user.clone());
        Ok(user.clone())
    }

    fn delete(&self, id: UserId) -> RepoResult<()> {
        require_id(id, "user_id")?;
        let mut tables = self.store.write()?;
        if tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound(EntityKind::User));
        }

        tables.ratings.retain(|_, rating| rating.user_id() != id);
        Ok(())
    }

    fn exists(&self, id: UserId) -> RepoResult<bool> {
        require_id(id, "user_id")?;
        Ok(self.store.read()?.users.contains_key(&id))
    }
}

/// In-memory rating repository.
#[derive(Debug, Clone)]
pub struct MemoryRatingRepository {
    store: Arc<MemoryStore>,
}

impl MemoryRatingRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl RatingRepository for MemoryRatingRepository {
    fn create(&self, rating: &UserRating) -> RepoResult<UserRating> {
        let mut tables = self.store.write()?;
        if tables.ratings.contains_key(&rating.id()) {
            return Err(RepoError::AlreadyExists(EntityKind::Rating));
        }
        if !tables.games.contains_key(&rating.game_id()) {
            return Err(RepoError::NotFound(EntityKind::Game));
        }
        if !tables.users.contains_key(&rating.user_id()) {
            return Err(RepoError::NotFound(EntityKind::User));
        }

        tables.ratings.insert(rating.id(), rating.clone());
        Ok(rating.clone())
    }

    fn update(&self, rating: &UserRating) -> RepoResult<UserRating> {
        let mut tables = self.store.write()?;
        let stored = tables
            .ratings
            .get_mut(&rating.id())
            .ok_or(RepoError::NotFound(EntityKind::Rating))?;

        stored.restamp_from(rating);
        Ok(stored.clone())
    }

    fn find_by_game(&self, game_id: GameId) -> RepoResult<Vec<UserRating>> {
        require_id(game_id, "game_id")?;
        let tables = self.store.read()?;
        let mut ratings: Vec<UserRating> = tables
            .ratings
            .values()
            .filter(|rating| rating.game_id() == game_id)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(ratings)
    }
}
