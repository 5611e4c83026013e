use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::filename::parse_filename;
use super::ledger::{LedgerEntry, SyncLedger};
use super::matcher::{find_audio_match, find_chart_match};
use super::path_resolver::PathResolver;
use crate::database::SongStore;
use crate::error::SyncError;
use crate::models::{NewSong, Repertoire, SongField};
use crate::storage::{ChartStorage, FileStore, AUDIO_EXTENSIONS, CHART_EXTENSIONS};

/// Outcome of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub songs_added: usize,
    pub audio_linked: usize,
    pub sheets_linked: usize,
    pub charts_migrated: usize,
    /// One message per phase that failed
    pub errors: Vec<String>,
    pub debug: SyncDebug,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncDebug {
    pub songs_in_repertoire: usize,
    pub audio_files_found: usize,
    pub sheet_files_found: usize,
    pub external_charts_found: usize,
    pub audio_folder: Option<String>,
    pub sheet_folder: Option<String>,
    pub songlist_folder: Option<String>,
}

/// Runs the four sync phases for one repertoire against a store that is
/// already inside the run's transaction.
pub(crate) struct Orchestrator<'a, S: SongStore + ?Sized, F: FileStore + ?Sized> {
    pub store: &'a S,
    pub files: &'a F,
    pub charts: &'a ChartStorage,
    pub resolver: &'a PathResolver,
    pub ledger: &'a SyncLedger,
    pub repertoire: &'a Repertoire,
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl<S: SongStore + ?Sized, F: FileStore + ?Sized> Orchestrator<'_, S, F> {
    pub fn run(&self) -> Result<SyncReport, SyncError> {
        let repertoire = self.repertoire;
        let mut report = SyncReport {
            debug: SyncDebug {
                songs_in_repertoire: self.store.list_songs(repertoire.id)?.len(),
                audio_folder: repertoire.audio_folder.clone(),
                sheet_folder: repertoire.sheet_folder.clone(),
                songlist_folder: repertoire.songlist_folder.clone(),
                ..SyncDebug::default()
            },
            ..SyncReport::default()
        };

        let audio_dir = self.resolve_folder(repertoire.audio_folder.as_deref());
        let sheet_dir = self.resolve_folder(repertoire.sheet_folder.as_deref());

        if let Some(dir) = &audio_dir {
            if let Err(e) = self.create_from_audio(dir, &mut report) {
                warn!("Audio scan failed for repertoire {}: {}", repertoire.id, e);
                report.errors.push(format!("Audio scan error: {}", e));
            }
            if let Err(e) = self.link_orphan_audio(dir, &mut report) {
                warn!("Audio linking failed for repertoire {}: {}", repertoire.id, e);
                report.errors.push(format!("Audio linking error: {}", e));
            }
        }

        if let Some(dir) = &sheet_dir {
            if let Err(e) = self.link_charts(dir, &mut report) {
                warn!("Sheet sync failed for repertoire {}: {}", repertoire.id, e);
                report.errors.push(format!("Sheet sync error: {}", e));
            }
        }

        if let Err(e) = self.migrate_external_charts(&mut report) {
            warn!("Chart migration failed for repertoire {}: {}", repertoire.id, e);
            report.errors.push(format!("Chart migration error: {}", e));
        }

        Ok(report)
    }

    /// Resolved folder, or None when unset or not a directory
    fn resolve_folder(&self, folder: Option<&str>) -> Option<PathBuf> {
        let folder = folder.map(str::trim).filter(|f| !f.is_empty())?;
        let resolved = PathBuf::from(self.resolver.resolve(folder));
        if self.files.is_dir(&resolved) {
            Some(resolved)
        } else {
            debug!("Skipping folder {}: not a directory", resolved.display());
            None
        }
    }

    /// Phase 1: a new song for every unlinked audio file with an unseen title
    fn create_from_audio(&self, dir: &Path, report: &mut SyncReport) -> Result<(), SyncError> {
        let repertoire = self.repertoire;
        let audio_files = self.files.list_files(dir, AUDIO_EXTENSIONS)?;
        report.debug.audio_files_found = audio_files.len();
        debug!("Found {} audio files in {}", audio_files.len(), dir.display());

        let linked = self.store.linked_audio_paths()?;
        let mut titles: HashSet<String> = self.store.song_titles(repertoire.id)?;

        for audio_path in &audio_files {
            let audio_path_str = path_string(audio_path);
            if linked.contains(&audio_path_str) {
                continue;
            }

            let stem = audio_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let parsed = parse_filename(&stem);
            if parsed.title.is_empty() {
                debug!("Skipping {}: no title in file name", audio_path.display());
                continue;
            }
            if titles.contains(&parsed.title.to_lowercase()) {
                continue;
            }

            let song_number = self.store.max_song_number(repertoire.id)? + 1;
            let mut song = NewSong::new(repertoire.id, &parsed.title, &parsed.artist, song_number);
            song.release_year = parsed.release_year;
            song.duration = self.files.probe_duration(audio_path);
            song.audio_path = Some(audio_path_str);
            song.practice_target = (repertoire.default_skills.len() as i64 + 1).max(1);
            song.skills = repertoire.default_skills.clone();

            let song_id = self.store.create_song(&song)?;
            self.ledger
                .record(self.store, LedgerEntry::SongCreated { song_id })?;

            info!("Created song {} '{}' from {}", song_id, song.title, audio_path.display());
            titles.insert(song.title.to_lowercase());
            report.songs_added += 1;
            report.audio_linked += 1;
        }

        Ok(())
    }

    /// Phase 2: link songs without audio to the first matching audio file
    fn link_orphan_audio(&self, dir: &Path, report: &mut SyncReport) -> Result<(), SyncError> {
        let songs = self
            .store
            .list_songs_missing(self.repertoire.id, SongField::AudioPath)?;
        if songs.is_empty() {
            return Ok(());
        }

        let audio_files = self.files.list_files(dir, AUDIO_EXTENSIONS)?;
        for song in &songs {
            let Some(audio_path) = find_audio_match(&song.title, &song.artist, &audio_files) else {
                continue;
            };
            let new_value = path_string(audio_path);

            self.ledger.record(
                self.store,
                LedgerEntry::FieldUpdated {
                    song_id: song.id,
                    field: SongField::AudioPath,
                    old_value: None,
                    new_value: new_value.clone(),
                },
            )?;
            self.store
                .update_song_field(song.id, SongField::AudioPath, Some(&new_value))?;

            debug!("Linked audio {} to song {}", new_value, song.id);
            report.audio_linked += 1;
        }

        info!(
            "Linked audio for {} of {} songs in repertoire {}",
            report.audio_linked - report.songs_added,
            songs.len(),
            self.repertoire.id
        );
        Ok(())
    }

    /// Phase 3: copy the best matching sheet of each chartless song into
    /// canonical storage
    fn link_charts(&self, dir: &Path, report: &mut SyncReport) -> Result<(), SyncError> {
        let songs = self
            .store
            .list_songs_missing(self.repertoire.id, SongField::ChartPath)?;
        let sheet_files = self.files.list_files(dir, CHART_EXTENSIONS)?;
        report.debug.sheet_files_found = sheet_files.len();
        debug!("Found {} sheet files in {}", sheet_files.len(), dir.display());

        for song in &songs {
            let Some(sheet) = find_chart_match(&song.title, &song.artist, &sheet_files) else {
                continue;
            };

            let dest = self.charts.store_chart(self.files, song.id, &song.title, sheet)?;
            let new_value = path_string(&dest);

            self.ledger.record(
                self.store,
                LedgerEntry::FieldUpdated {
                    song_id: song.id,
                    field: SongField::ChartPath,
                    old_value: None,
                    new_value: new_value.clone(),
                },
            )?;
            self.store
                .update_song_field(song.id, SongField::ChartPath, Some(&new_value))?;

            debug!("Linked chart {} to song {}", sheet.display(), song.id);
            report.sheets_linked += 1;
        }

        info!(
            "Linked {} charts in repertoire {}",
            report.sheets_linked, self.repertoire.id
        );
        Ok(())
    }

    /// Phase 4: copy charts referenced outside canonical storage into it
    fn migrate_external_charts(&self, report: &mut SyncReport) -> Result<(), SyncError> {
        let songs = self.store.list_songs_with_chart(self.repertoire.id)?;

        for song in &songs {
            let Some(old_value) = song.chart_path.as_deref() else {
                continue;
            };
            if self.charts.contains(Path::new(old_value)) {
                continue;
            }
            let resolved = PathBuf::from(self.resolver.resolve(old_value));
            if self.charts.contains(&resolved) {
                debug!(
                    "Chart of song {} already lives in canonical storage at {}",
                    song.id,
                    resolved.display()
                );
                continue;
            }
            report.debug.external_charts_found += 1;

            if !self.files.exists(&resolved) || self.files.is_dir(&resolved) {
                debug!(
                    "External chart of song {} not found at {}",
                    song.id,
                    resolved.display()
                );
                continue;
            }

            let dest = self.charts.store_chart(self.files, song.id, &song.title, &resolved)?;
            let new_value = path_string(&dest);

            self.ledger.record(
                self.store,
                LedgerEntry::ChartMoved {
                    song_id: song.id,
                    old_value: old_value.to_string(),
                    new_value: new_value.clone(),
                },
            )?;
            self.store
                .update_song_field(song.id, SongField::ChartPath, Some(&new_value))?;

            info!("Migrated chart of song {} from {}", song.id, old_value);
            report.charts_migrated += 1;
        }

        Ok(())
    }
}
