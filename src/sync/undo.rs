use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::Path;

use super::ledger::LedgerEntry;
use crate::database::{LedgerRecord, SongStore};
use crate::error::SyncError;
use crate::models::SongField;
use crate::storage::{ChartStorage, FileStore};

/// Outcome of undoing a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UndoReport {
    pub songs_deleted: usize,
    pub audio_unlinked: usize,
    pub charts_unlinked: usize,
    pub charts_restored: usize,
    pub files_deleted: usize,
}

/// Reverses ledger entries against a store already inside the undo
/// transaction. File deletions are best-effort.
pub(crate) struct UndoEngine<'a, S: SongStore + ?Sized, F: FileStore + ?Sized> {
    pub store: &'a S,
    pub files: &'a F,
    pub charts: &'a ChartStorage,
}

impl<S: SongStore + ?Sized, F: FileStore + ?Sized> UndoEngine<'_, S, F> {
    pub fn undo_all(&self, records: &[LedgerRecord]) -> Result<UndoReport, SyncError> {
        let mut report = UndoReport::default();
        for record in records {
            self.reverse(&record.entry, &mut report)?;
        }
        info!("Reversed {} ledger entries: {:?}", records.len(), report);
        Ok(report)
    }

    pub fn reverse(&self, entry: &LedgerEntry, report: &mut UndoReport) -> Result<(), SyncError> {
        match entry {
            LedgerEntry::SongCreated { song_id } => {
                if !self.store.delete_song(*song_id)? {
                    debug!("Song {} was already deleted", song_id);
                }
                report.songs_deleted += 1;
            }
            LedgerEntry::FieldUpdated {
                song_id,
                field: SongField::AudioPath,
                old_value,
                ..
            } => {
                self.restore_field(*song_id, SongField::AudioPath, old_value.as_deref())?;
                report.audio_unlinked += 1;
            }
            LedgerEntry::FieldUpdated {
                song_id,
                field: SongField::ChartPath,
                old_value,
                new_value,
            } => {
                if self.charts.contains(Path::new(new_value)) {
                    self.delete_copied_file(new_value, report);
                }
                self.restore_field(*song_id, SongField::ChartPath, old_value.as_deref())?;
                report.charts_unlinked += 1;
            }
            LedgerEntry::ChartMoved {
                song_id,
                old_value,
                new_value,
            } => {
                self.delete_copied_file(new_value, report);
                self.restore_field(*song_id, SongField::ChartPath, Some(old_value))?;
                report.charts_restored += 1;
            }
        }
        Ok(())
    }

    fn restore_field(
        &self,
        song_id: i64,
        field: SongField,
        value: Option<&str>,
    ) -> Result<(), SyncError> {
        if !self.store.update_song_field(song_id, field, value)? {
            debug!("Song {} no longer exists, {} not restored", song_id, field);
        }
        Ok(())
    }

    fn delete_copied_file(&self, path: &str, report: &mut UndoReport) {
        let path = Path::new(path);
        if !self.files.exists(path) {
            warn!("Copied file {} is already gone", path.display());
            return;
        }
        match self.files.remove(path) {
            Ok(()) => {
                debug!("Deleted {}", path.display());
                report.files_deleted += 1;
            }
            Err(e) => error!("Error deleting file {}: {}", path.display(), e),
        }
    }
}
