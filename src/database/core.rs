use crate::error::DatabaseError;
use log::{debug, info};
use rusqlite::Connection;
use std::path::PathBuf;

pub struct SongbookDatabase {
    pub conn: Connection,
}

impl SongbookDatabase {
    pub fn new(db_path: PathBuf) -> Result<Self, DatabaseError> {
        debug!("Opening database at {:?}", db_path);
        let conn = Connection::open(&db_path)?;
        let mut db = Self { conn };
        db.initialize()?;
        info!("Database initialized successfully at {:?}", db_path);
        Ok(db)
    }

    fn initialize(&mut self) -> Result<(), DatabaseError> {
        debug!("Initializing database tables and indexes");
        self.conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS repertoires (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                date_created DATETIME NOT NULL,
                songlist_folder TEXT,
                audio_folder TEXT,
                sheet_folder TEXT,
                notes TEXT
            );

            CREATE TABLE IF NOT EXISTS skills (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS songs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                repertoire_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                artist TEXT NOT NULL,
                song_number INTEGER NOT NULL,
                priority TEXT NOT NULL CHECK(priority IN ('low', 'mid', 'high')),
                practice_count INTEGER NOT NULL DEFAULT 0,
                practice_target INTEGER NOT NULL DEFAULT 0,
                date_added DATETIME NOT NULL,
                release_date TEXT,
                duration INTEGER,
                audio_path TEXT,
                chart_path TEXT,
                FOREIGN KEY (repertoire_id) REFERENCES repertoires(id) ON DELETE CASCADE
            );

            -- Junction tables
            CREATE TABLE IF NOT EXISTS repertoire_skills (
                repertoire_id INTEGER NOT NULL,
                skill_id INTEGER NOT NULL,
                PRIMARY KEY (repertoire_id, skill_id),
                FOREIGN KEY (repertoire_id) REFERENCES repertoires(id) ON DELETE CASCADE,
                FOREIGN KEY (skill_id) REFERENCES skills(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS song_skills (
                song_id INTEGER NOT NULL,
                skill_id INTEGER NOT NULL,
                is_mastered BOOLEAN NOT NULL DEFAULT FALSE,
                PRIMARY KEY (song_id, skill_id),
                FOREIGN KEY (song_id) REFERENCES songs(id) ON DELETE CASCADE,
                FOREIGN KEY (skill_id) REFERENCES skills(id) ON DELETE CASCADE
            );

            -- Mutations made by the latest folder sync of each repertoire.
            -- song_id has no foreign key: entries outlive the songs they created.
            CREATE TABLE IF NOT EXISTS sync_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                repertoire_id INTEGER NOT NULL,
                sync_timestamp DATETIME NOT NULL,
                operation_type TEXT NOT NULL,
                song_id INTEGER NOT NULL,
                field_name TEXT,
                old_value TEXT,
                new_value TEXT,
                FOREIGN KEY (repertoire_id) REFERENCES repertoires(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_songs_repertoire ON songs(repertoire_id);
            CREATE INDEX IF NOT EXISTS idx_songs_audio_path ON songs(audio_path);
            CREATE INDEX IF NOT EXISTS idx_sync_history_repertoire ON sync_history(repertoire_id, id);
            "#,
        )?;

        debug!("Database schema initialized successfully");
        Ok(())
    }
}
