//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load `CatalogConfig`, start logging and open the configured backend.
//! - Print entity counts so a deployment can be sanity-checked quickly.

use catalog_core::db::open_db;
use catalog_core::{
    core_version, init_logging, CatalogConfig, GameRepository, GenreRepository, ListQuery,
    MemoryStore, SqliteGameRepository, SqliteGenreRepository, SqliteUserRepository,
    StorageBackend, UserRepository,
};
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_run module=cli status=error");
            eprintln!("catalog: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = CatalogConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir).map_err(|err| err.to_string())?;
    }
    info!(
        "event=cli_start module=cli status=ok storage={:?} version={}",
        config.storage,
        core_version()
    );

    println!("catalog_core version={}", core_version());
    match config.storage {
        StorageBackend::Memory => {
            let counts = MemoryStore::new().counts().map_err(|err| err.to_string())?;
            println!(
                "storage=memory games={} genres={} users={}",
                counts.games, counts.genres, counts.users
            );
        }
        StorageBackend::Sqlite => {
            // Schema failures abort startup here; nothing is retried.
            let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
            let all = ListQuery::all();
            let games = SqliteGameRepository::new(&conn)
                .find_all(all)
                .map_err(|err| err.to_string())?;
            let genres = SqliteGenreRepository::new(&conn)
                .find_all(all)
                .map_err(|err| err.to_string())?;
            let users = SqliteUserRepository::new(&conn)
                .find_all(all)
                .map_err(|err| err.to_string())?;
            println!(
                "storage=sqlite path={} games={} genres={} users={}",
                config.db_path.display(),
                games.len(),
                genres.len(),
                users.len()
            );
        }
    }

    Ok(())
}
