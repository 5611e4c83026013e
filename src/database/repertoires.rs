use crate::database::models::SqlDateTime;
use crate::error::DatabaseError;
use crate::models::Repertoire;
use chrono::Local;
use log::debug;
use rusqlite::params;

use super::{SongStore, SongbookDatabase};

impl SongbookDatabase {
    pub fn create_repertoire(
        &mut self,
        name: &str,
        audio_folder: Option<&str>,
        sheet_folder: Option<&str>,
        songlist_folder: Option<&str>,
    ) -> Result<i64, DatabaseError> {
        debug!("Creating repertoire: {}", name);
        self.conn.execute(
            "INSERT INTO repertoires (name, date_created, audio_folder, sheet_folder, songlist_folder)
             VALUES (?, ?, ?, ?, ?)",
            params![
                name,
                SqlDateTime::from(Local::now()),
                audio_folder,
                sheet_folder,
                songlist_folder
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Successfully created repertoire: {} ({})", name, id);
        Ok(id)
    }

    pub fn set_repertoire_folders(
        &mut self,
        repertoire_id: i64,
        audio_folder: Option<&str>,
        sheet_folder: Option<&str>,
    ) -> Result<(), DatabaseError> {
        debug!("Updating folders of repertoire {}", repertoire_id);
        let rows_affected = self.conn.execute(
            "UPDATE repertoires SET audio_folder = ?, sheet_folder = ? WHERE id = ?",
            params![audio_folder, sheet_folder, repertoire_id],
        )?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Repertoire with id {} not found",
                repertoire_id
            )));
        }
        Ok(())
    }

    pub fn get_repertoire(&self, repertoire_id: i64) -> Result<Option<Repertoire>, DatabaseError> {
        self.conn.read_repertoire(repertoire_id)
    }

    pub fn list_repertoires(&self) -> Result<Vec<Repertoire>, DatabaseError> {
        debug!("Listing repertoires");
        let mut stmt = self.conn.prepare("SELECT id FROM repertoires ORDER BY name")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut repertoires = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(repertoire) = self.conn.read_repertoire(id)? {
                repertoires.push(repertoire);
            }
        }
        Ok(repertoires)
    }

    pub fn create_skill(&mut self, name: &str) -> Result<i64, DatabaseError> {
        debug!("Creating skill: {}", name);
        self.conn
            .execute("INSERT INTO skills (name) VALUES (?)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Makes `skill_id` a default skill for songs created in the repertoire
    pub fn add_repertoire_skill(
        &mut self,
        repertoire_id: i64,
        skill_id: i64,
    ) -> Result<(), DatabaseError> {
        debug!("Adding skill {} to repertoire {}", skill_id, repertoire_id);
        self.conn.execute(
            "INSERT OR IGNORE INTO repertoire_skills (repertoire_id, skill_id) VALUES (?, ?)",
            params![repertoire_id, skill_id],
        )?;
        Ok(())
    }
}
