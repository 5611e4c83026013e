//! Test data builders

use songbook::database::{SongStore, SongbookDatabase};
use songbook::models::NewSong;

/// Creates a repertoire with folders and default skills
#[allow(dead_code)]
pub struct RepertoireBuilder {
    name: String,
    audio_folder: Option<String>,
    sheet_folder: Option<String>,
    skills: Vec<String>,
}

#[allow(dead_code)]
impl RepertoireBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            audio_folder: None,
            sheet_folder: None,
            skills: Vec::new(),
        }
    }

    pub fn audio_folder(mut self, folder: &str) -> Self {
        self.audio_folder = Some(folder.to_string());
        self
    }

    pub fn sheet_folder(mut self, folder: &str) -> Self {
        self.sheet_folder = Some(folder.to_string());
        self
    }

    pub fn default_skill(mut self, skill: &str) -> Self {
        self.skills.push(skill.to_string());
        self
    }

    pub fn create(self, db: &mut SongbookDatabase) -> i64 {
        let id = db
            .create_repertoire(
                &self.name,
                self.audio_folder.as_deref(),
                self.sheet_folder.as_deref(),
                None,
            )
            .unwrap();
        for skill in &self.skills {
            let skill_id = db
                .create_skill(&format!("{} {}", self.name, skill))
                .unwrap();
            db.add_repertoire_skill(id, skill_id).unwrap();
        }
        id
    }
}

/// Adds a song at the end of the repertoire
#[allow(dead_code)]
pub fn add_song(
    db: &mut SongbookDatabase,
    repertoire_id: i64,
    title: &str,
    artist: &str,
    chart_path: Option<&str>,
) -> i64 {
    let number = db.conn.max_song_number(repertoire_id).unwrap() + 1;
    let mut song = NewSong::new(repertoire_id, title, artist, number);
    song.chart_path = chart_path.map(String::from);
    db.add_song(&song).unwrap()
}
