//! Helper functions for tests

use songbook::database::{SongStore, SongbookDatabase};
use songbook::models::Song;
use songbook::storage::{ChartStorage, MemoryFileStore};
use songbook::sync::{PathResolver, SyncEngine};
use std::path::PathBuf;
use std::sync::Arc;

#[allow(dead_code)]
pub const CHARTS_DIR: &str = "/data/charts";
#[allow(dead_code)]
pub const AUDIO_DIR: &str = "/music/jazz";
#[allow(dead_code)]
pub const SHEET_DIR: &str = "/sheets/jazz";

#[allow(dead_code)]
pub fn memory_db() -> SongbookDatabase {
    SongbookDatabase::new(PathBuf::from(":memory:")).unwrap()
}

/// Engine over an in-memory file tree, plus a handle to that tree
#[allow(dead_code)]
pub fn memory_engine() -> (SyncEngine<Arc<MemoryFileStore>>, Arc<MemoryFileStore>) {
    let files = Arc::new(MemoryFileStore::new());
    let engine = SyncEngine::new(
        Arc::clone(&files),
        ChartStorage::new(CHARTS_DIR),
        PathResolver::default(),
    );
    (engine, files)
}

/// Songs of the repertoire, ordered by number
#[allow(dead_code)]
pub fn songs(db: &SongbookDatabase, repertoire_id: i64) -> Vec<Song> {
    db.conn.list_songs(repertoire_id).unwrap()
}

#[allow(dead_code)]
pub fn song_by_title(db: &SongbookDatabase, repertoire_id: i64, title: &str) -> Song {
    songs(db, repertoire_id)
        .into_iter()
        .find(|song| song.title == title)
        .unwrap_or_else(|| panic!("no song titled {:?}", title))
}

#[allow(dead_code)]
pub fn audio(name: &str) -> String {
    format!("{}/{}", AUDIO_DIR, name)
}

#[allow(dead_code)]
pub fn sheet(name: &str) -> String {
    format!("{}/{}", SHEET_DIR, name)
}
