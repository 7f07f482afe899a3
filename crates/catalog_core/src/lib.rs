//! Core domain and persistence layer for the game catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod aggregate;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use aggregate::game_details::{AggregateError, GameDetailsAggregate};
pub use config::{CatalogConfig, ConfigError, StorageBackend};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::game::{Game, GameId};
pub use model::genre::{Genre, GenreId};
pub use model::rating::{RatingId, UserRating};
pub use model::user::{User, UserId, UserRole};
pub use model::validation::ValidationError;
pub use repo::game_repo::{GameRepository, SqliteGameRepository};
pub use repo::genre_repo::{GenreRepository, SqliteGenreRepository};
pub use repo::memory::{
    MemoryGameRepository, MemoryGenreRepository, MemoryRatingRepository, MemoryStore,
    MemoryUserRepository, StoreCounts,
};
pub use repo::rating_repo::{RatingRepository, SqliteRatingRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{EntityKind, ListQuery, RepoError, RepoResult};
pub use service::game_service::GameService;
pub use service::genre_service::GenreService;
pub use service::rating_service::RatingService;
pub use service::user_service::UserService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
