//! Folder sync for repertoires.
//!
//! A sync run scans a repertoire's audio and sheet folders, creates songs
//! from audio file names, links audio and charts to existing songs and copies
//! charts into canonical storage. Every mutation is written to the ledger so
//! the latest run can be undone exactly.

pub mod filename;
pub mod ledger;
pub mod lock;
pub mod matcher;
pub mod orchestrator;
pub mod path_resolver;
pub mod undo;

use log::info;
use rusqlite::TransactionBehavior;

pub use filename::{parse_filename, ParsedFilename};
pub use ledger::{LedgerEntry, SyncLedger};
pub use lock::RepertoireLocks;
pub use orchestrator::{SyncDebug, SyncReport};
pub use path_resolver::PathResolver;
pub use undo::UndoReport;

use crate::config::Config;
use crate::database::{SongStore, SongbookDatabase};
use crate::error::SyncError;
use crate::storage::{ChartStorage, FileStore, LocalFileStore};
use orchestrator::Orchestrator;
use undo::UndoEngine;

pub struct SyncEngine<F: FileStore> {
    files: F,
    charts: ChartStorage,
    resolver: PathResolver,
    locks: RepertoireLocks,
}

impl SyncEngine<LocalFileStore> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            LocalFileStore::new(),
            ChartStorage::from_config(config),
            PathResolver::from_config(config),
        )
    }
}

impl<F: FileStore> SyncEngine<F> {
    pub fn new(files: F, charts: ChartStorage, resolver: PathResolver) -> Self {
        Self {
            files,
            charts,
            resolver,
            locks: RepertoireLocks::new(),
        }
    }

    /// Runs all four phases for the repertoire in one transaction.
    ///
    /// Phase failures are reported in [`SyncReport::errors`]; what earlier
    /// phases did is still committed and recorded in the ledger.
    pub fn sync(
        &self,
        db: &mut SongbookDatabase,
        repertoire_id: i64,
    ) -> Result<SyncReport, SyncError> {
        let lock = self.locks.get(repertoire_id);
        let _guard = lock.lock();
        info!("Starting sync of repertoire {}", repertoire_id);

        let tx = db
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let repertoire = tx
            .read_repertoire(repertoire_id)?
            .ok_or(SyncError::RepertoireNotFound(repertoire_id))?;

        let ledger = SyncLedger::start_run(&*tx, repertoire_id)?;
        let report = Orchestrator {
            store: &*tx,
            files: &self.files,
            charts: &self.charts,
            resolver: &self.resolver,
            ledger: &ledger,
            repertoire: &repertoire,
        }
        .run()?;
        tx.commit()?;

        info!(
            "Synced repertoire {}: {} songs added, {} audio linked, {} sheets linked, {} charts migrated, {} errors",
            repertoire_id,
            report.songs_added,
            report.audio_linked,
            report.sheets_linked,
            report.charts_migrated,
            report.errors.len()
        );
        Ok(report)
    }

    /// Reverses the latest sync run of the repertoire and clears its ledger
    pub fn undo(
        &self,
        db: &mut SongbookDatabase,
        repertoire_id: i64,
    ) -> Result<UndoReport, SyncError> {
        let lock = self.locks.get(repertoire_id);
        let _guard = lock.lock();
        info!("Undoing last sync of repertoire {}", repertoire_id);

        let tx = db
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if tx.read_repertoire(repertoire_id)?.is_none() {
            return Err(SyncError::RepertoireNotFound(repertoire_id));
        }

        let records = tx.list_ledger(repertoire_id)?;
        if records.is_empty() {
            return Err(SyncError::NothingToUndo(repertoire_id));
        }

        let report = UndoEngine {
            store: &*tx,
            files: &self.files,
            charts: &self.charts,
        }
        .undo_all(&records)?;
        tx.clear_ledger(repertoire_id)?;
        tx.commit()?;

        Ok(report)
    }
}
