use chrono::{DateTime, Local};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::collections::HashSet;

use super::helpers::{row_to_song, SONG_COLUMNS};
use super::models::{from_timestamp, SqlDateTime};
use crate::error::DatabaseError;
use crate::models::{NewSong, Repertoire, Song, SongField};
use crate::sync::ledger::LedgerEntry;

/// A ledger entry as stored, with its insertion id and run timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRecord {
    pub id: i64,
    pub repertoire_id: i64,
    pub run_timestamp: DateTime<Local>,
    pub entry: LedgerEntry,
}

/// Record access used by folder sync and undo.
///
/// Implemented for [`Connection`], so a `rusqlite::Transaction` can be passed
/// wherever a store is expected and a whole run commits at once.
pub trait SongStore {
    fn read_repertoire(&self, repertoire_id: i64) -> Result<Option<Repertoire>, DatabaseError>;

    fn list_songs(&self, repertoire_id: i64) -> Result<Vec<Song>, DatabaseError>;

    /// Songs of the repertoire where `field` is NULL
    fn list_songs_missing(
        &self,
        repertoire_id: i64,
        field: SongField,
    ) -> Result<Vec<Song>, DatabaseError>;

    /// Songs of the repertoire with a chart path set
    fn list_songs_with_chart(&self, repertoire_id: i64) -> Result<Vec<Song>, DatabaseError>;

    /// Every audio path referenced by any song, in any repertoire
    fn linked_audio_paths(&self) -> Result<HashSet<String>, DatabaseError>;

    /// Lowercased titles of the repertoire's songs
    fn song_titles(&self, repertoire_id: i64) -> Result<HashSet<String>, DatabaseError>;

    /// Highest song number in the repertoire, 0 when empty
    fn max_song_number(&self, repertoire_id: i64) -> Result<i64, DatabaseError>;

    /// Inserts the song and its skill assignments, returning the new id
    fn create_song(&self, song: &NewSong) -> Result<i64, DatabaseError>;

    /// Returns false when no song has this id
    fn update_song_field(
        &self,
        song_id: i64,
        field: SongField,
        value: Option<&str>,
    ) -> Result<bool, DatabaseError>;

    /// Returns false when no song has this id
    fn delete_song(&self, song_id: i64) -> Result<bool, DatabaseError>;

    fn append_ledger_entry(
        &self,
        repertoire_id: i64,
        run_timestamp: DateTime<Local>,
        entry: &LedgerEntry,
    ) -> Result<i64, DatabaseError>;

    /// Ledger entries in insertion order
    fn list_ledger(&self, repertoire_id: i64) -> Result<Vec<LedgerRecord>, DatabaseError>;

    /// Returns the number of entries removed
    fn clear_ledger(&self, repertoire_id: i64) -> Result<usize, DatabaseError>;
}

impl SongStore for Connection {
    fn read_repertoire(&self, repertoire_id: i64) -> Result<Option<Repertoire>, DatabaseError> {
        debug!("Reading repertoire {}", repertoire_id);
        let repertoire = self
            .query_row(
                "SELECT id, name, audio_folder, sheet_folder, songlist_folder
                 FROM repertoires WHERE id = ?",
                [repertoire_id],
                |row| {
                    Ok(Repertoire {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        audio_folder: row.get(2)?,
                        sheet_folder: row.get(3)?,
                        songlist_folder: row.get(4)?,
                        default_skills: Vec::new(),
                    })
                },
            )
            .optional()?;

        let Some(mut repertoire) = repertoire else {
            debug!("Repertoire {} not found", repertoire_id);
            return Ok(None);
        };

        let mut stmt = self.prepare(
            "SELECT skill_id FROM repertoire_skills WHERE repertoire_id = ? ORDER BY skill_id",
        )?;
        repertoire.default_skills = stmt
            .query_map([repertoire_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(Some(repertoire))
    }

    fn list_songs(&self, repertoire_id: i64) -> Result<Vec<Song>, DatabaseError> {
        let mut stmt = self.prepare(&format!(
            "SELECT {} FROM songs WHERE repertoire_id = ? ORDER BY song_number, id",
            SONG_COLUMNS
        ))?;
        let songs = stmt
            .query_map([repertoire_id], row_to_song)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(songs)
    }

    fn list_songs_missing(
        &self,
        repertoire_id: i64,
        field: SongField,
    ) -> Result<Vec<Song>, DatabaseError> {
        let mut stmt = self.prepare(&format!(
            "SELECT {} FROM songs WHERE repertoire_id = ? AND {} IS NULL ORDER BY song_number, id",
            SONG_COLUMNS,
            field.column()
        ))?;
        let songs = stmt
            .query_map([repertoire_id], row_to_song)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Found {} songs without {} in repertoire {}",
            songs.len(),
            field,
            repertoire_id
        );
        Ok(songs)
    }

    fn list_songs_with_chart(&self, repertoire_id: i64) -> Result<Vec<Song>, DatabaseError> {
        let mut stmt = self.prepare(&format!(
            "SELECT {} FROM songs WHERE repertoire_id = ? AND chart_path IS NOT NULL ORDER BY song_number, id",
            SONG_COLUMNS
        ))?;
        let songs = stmt
            .query_map([repertoire_id], row_to_song)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(songs)
    }

    fn linked_audio_paths(&self) -> Result<HashSet<String>, DatabaseError> {
        let mut stmt = self.prepare("SELECT audio_path FROM songs WHERE audio_path IS NOT NULL")?;
        let paths = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<HashSet<String>, _>>()?;
        Ok(paths)
    }

    fn song_titles(&self, repertoire_id: i64) -> Result<HashSet<String>, DatabaseError> {
        let mut stmt = self.prepare("SELECT title FROM songs WHERE repertoire_id = ?")?;
        let titles = stmt
            .query_map([repertoire_id], |row| row.get::<_, String>(0))?
            .map(|title| title.map(|t| t.to_lowercase()))
            .collect::<Result<HashSet<String>, _>>()?;
        Ok(titles)
    }

    fn max_song_number(&self, repertoire_id: i64) -> Result<i64, DatabaseError> {
        let max = self.query_row(
            "SELECT COALESCE(MAX(song_number), 0) FROM songs WHERE repertoire_id = ?",
            [repertoire_id],
            |row| row.get(0),
        )?;
        Ok(max)
    }

    fn create_song(&self, song: &NewSong) -> Result<i64, DatabaseError> {
        debug!("Creating song '{}' in repertoire {}", song.title, song.repertoire_id);
        self.execute(
            "INSERT INTO songs (
                repertoire_id, title, artist, song_number, priority, practice_count,
                practice_target, date_added, release_date, duration, audio_path, chart_path
            ) VALUES (?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?)",
            params![
                song.repertoire_id,
                song.title,
                song.artist,
                song.song_number,
                song.priority.as_str(),
                song.practice_target,
                SqlDateTime::from(song.date_added),
                song.release_year,
                song.duration,
                song.audio_path,
                song.chart_path,
            ],
        )?;
        let song_id = self.last_insert_rowid();

        for skill_id in &song.skills {
            self.execute(
                "INSERT OR IGNORE INTO song_skills (song_id, skill_id, is_mastered) VALUES (?, ?, ?)",
                params![song_id, skill_id, false],
            )?;
        }

        debug!("Created song {} with {} skills", song_id, song.skills.len());
        Ok(song_id)
    }

    fn update_song_field(
        &self,
        song_id: i64,
        field: SongField,
        value: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        debug!("Setting {} of song {} to {:?}", field, song_id, value);
        let rows_affected = self.execute(
            &format!("UPDATE songs SET {} = ? WHERE id = ?", field.column()),
            params![value, song_id],
        )?;
        Ok(rows_affected > 0)
    }

    fn delete_song(&self, song_id: i64) -> Result<bool, DatabaseError> {
        debug!("Deleting song {}", song_id);
        let rows_affected = self.execute("DELETE FROM songs WHERE id = ?", [song_id])?;
        Ok(rows_affected > 0)
    }

    fn append_ledger_entry(
        &self,
        repertoire_id: i64,
        run_timestamp: DateTime<Local>,
        entry: &LedgerEntry,
    ) -> Result<i64, DatabaseError> {
        debug!("Ledger[{}]: {:?}", repertoire_id, entry);
        self.execute(
            "INSERT INTO sync_history (
                repertoire_id, sync_timestamp, operation_type, song_id, field_name, old_value, new_value
            ) VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                repertoire_id,
                SqlDateTime::from(run_timestamp),
                entry.operation_type(),
                entry.song_id(),
                entry.field().map(|f| f.as_str()),
                entry.old_value(),
                entry.new_value(),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    fn list_ledger(&self, repertoire_id: i64) -> Result<Vec<LedgerRecord>, DatabaseError> {
        let mut stmt = self.prepare(
            "SELECT id, repertoire_id, sync_timestamp, operation_type, song_id, field_name, old_value, new_value
             FROM sync_history
             WHERE repertoire_id = ?
             ORDER BY id",
        )?;

        let rows = stmt
            .query_map([repertoire_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    from_timestamp(row.get(2)?)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, i64>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, Option<String>>(6)?,
                    row.get::<_, Option<String>>(7)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(
                |(id, repertoire_id, run_timestamp, operation, song_id, field, old, new)| {
                    let entry = LedgerEntry::from_columns(&operation, song_id, field, old, new)
                        .map_err(|e| {
                            DatabaseError::ParseError(format!("sync_history row {}: {}", id, e))
                        })?;
                    Ok(LedgerRecord {
                        id,
                        repertoire_id,
                        run_timestamp,
                        entry,
                    })
                },
            )
            .collect()
    }

    fn clear_ledger(&self, repertoire_id: i64) -> Result<usize, DatabaseError> {
        let removed = self.execute(
            "DELETE FROM sync_history WHERE repertoire_id = ?",
            [repertoire_id],
        )?;
        debug!("Cleared {} ledger entries for repertoire {}", removed, repertoire_id);
        Ok(removed)
    }
}
