use crate::error::DatabaseError;
use crate::models::{NewSong, Song};
use log::debug;
use rusqlite::OptionalExtension;

use super::helpers::{row_to_song, SONG_COLUMNS};
use super::{SongStore, SongbookDatabase};

impl SongbookDatabase {
    /// Inserts a song together with its skill rows in one transaction
    pub fn add_song(&mut self, song: &NewSong) -> Result<i64, DatabaseError> {
        let tx = self.conn.transaction()?;
        let id = tx.create_song(song)?;
        tx.commit()?;
        debug!("Added song '{}' as {}", song.title, id);
        Ok(id)
    }

    pub fn get_song(&self, song_id: i64) -> Result<Option<Song>, DatabaseError> {
        let song = self
            .conn
            .query_row(
                &format!("SELECT {} FROM songs WHERE id = ?", SONG_COLUMNS),
                [song_id],
                row_to_song,
            )
            .optional()?;
        Ok(song)
    }

    pub fn get_songs(&self, repertoire_id: i64) -> Result<Vec<Song>, DatabaseError> {
        self.conn.list_songs(repertoire_id)
    }

    /// Skill ids attached to a song, with their mastered flag
    pub fn get_song_skills(&self, song_id: i64) -> Result<Vec<(i64, bool)>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT skill_id, is_mastered FROM song_skills WHERE song_id = ? ORDER BY skill_id",
        )?;
        let skills = stmt
            .query_map([song_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SongField;
    use std::path::PathBuf;

    fn setup_db() -> (SongbookDatabase, i64) {
        let mut db = SongbookDatabase::new(PathBuf::from(":memory:")).unwrap();
        let rep = db.create_repertoire("Rock", None, None, None).unwrap();
        (db, rep)
    }

    #[test]
    fn test_add_song_attaches_unmastered_skills() {
        let (mut db, rep) = setup_db();
        let skill = db.create_skill("strumming").unwrap();
        let mut song = NewSong::new(rep, "Creep", "Radiohead", 1);
        song.skills = vec![skill];

        let id = db.add_song(&song).unwrap();
        assert_eq!(db.get_song_skills(id).unwrap(), vec![(skill, false)]);

        let stored = db.get_song(id).unwrap().unwrap();
        assert_eq!(stored.title, "Creep");
        assert_eq!(stored.audio_path, None);
    }

    #[test]
    fn test_delete_song_cascades_skills() {
        let (mut db, rep) = setup_db();
        let skill = db.create_skill("strumming").unwrap();
        let mut song = NewSong::new(rep, "Creep", "Radiohead", 1);
        song.skills = vec![skill];
        let id = db.add_song(&song).unwrap();

        assert!(db.conn.delete_song(id).unwrap());
        assert!(db.get_song(id).unwrap().is_none());
        assert!(db.get_song_skills(id).unwrap().is_empty());
        assert!(!db.conn.delete_song(id).unwrap());
    }

    #[test]
    fn test_missing_field_queries_are_scoped_to_repertoire() {
        let (mut db, rep) = setup_db();
        let other = db.create_repertoire("Pop", None, None, None).unwrap();

        let mut linked = NewSong::new(rep, "Linked", "A", 1);
        linked.audio_path = Some("/a/Linked.mp3".into());
        db.add_song(&linked).unwrap();
        db.add_song(&NewSong::new(rep, "Unlinked", "B", 2)).unwrap();
        db.add_song(&NewSong::new(other, "Elsewhere", "C", 1)).unwrap();

        let missing = db.conn.list_songs_missing(rep, SongField::AudioPath).unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].title, "Unlinked");

        assert_eq!(db.conn.max_song_number(rep).unwrap(), 2);
        assert_eq!(db.conn.max_song_number(other + 1).unwrap(), 0);
        assert!(db.conn.linked_audio_paths().unwrap().contains("/a/Linked.mp3"));
        assert!(db.conn.song_titles(rep).unwrap().contains("unlinked"));
    }
}
