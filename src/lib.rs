//! Songbook Library
//!
//! Catalogs a musician's songs in repertoires and keeps them in sync with
//! the audio and sheet music folders each repertoire points at. The folder
//! sync records everything it changes so the latest run can be undone.

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod storage;
pub mod sync;

// Re-export commonly used items for easier imports
pub use config::CONFIG;
pub use database::SongbookDatabase;
pub use models::*;
pub use sync::{SyncEngine, SyncReport, UndoReport};

use crate::config::Config;
use crate::error::{ConfigError, SyncError};
use log::debug;
use std::path::PathBuf;

/// Opens the database named by the configuration
pub fn open_database(config: &Config) -> Result<SongbookDatabase, SyncError> {
    let db_path = config
        .database_path()
        .ok_or_else(|| ConfigError::InvalidValue("database_path is not set".to_string()))?;
    debug!("Using database path from config: {}", db_path);
    Ok(SongbookDatabase::new(PathBuf::from(db_path))?)
}
