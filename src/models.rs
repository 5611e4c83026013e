use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A named song collection with the folders it is synced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repertoire {
    pub id: i64,
    pub name: String,
    pub audio_folder: Option<String>,
    pub sheet_folder: Option<String>,
    /// Not read by folder sync yet.
    pub songlist_folder: Option<String>,
    /// Skill ids assigned to every song created in this repertoire
    pub default_skills: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Song {
    pub id: i64,
    pub repertoire_id: i64,
    pub title: String,
    pub artist: String,
    pub song_number: i64,
    pub release_year: Option<String>,
    /// Length in whole seconds, when known
    pub duration: Option<u32>,
    pub audio_path: Option<String>,
    pub chart_path: Option<String>,
}

impl Song {
    pub fn field(&self, field: SongField) -> Option<&str> {
        match field {
            SongField::AudioPath => self.audio_path.as_deref(),
            SongField::ChartPath => self.chart_path.as_deref(),
        }
    }
}

/// Fields of a new song record.
#[derive(Debug, Clone)]
pub struct NewSong {
    pub repertoire_id: i64,
    pub title: String,
    pub artist: String,
    pub song_number: i64,
    pub release_year: Option<String>,
    pub duration: Option<u32>,
    pub audio_path: Option<String>,
    pub chart_path: Option<String>,
    pub priority: Priority,
    pub practice_target: i64,
    pub date_added: DateTime<Local>,
    /// Skills to attach, unmastered
    pub skills: Vec<i64>,
}

impl NewSong {
    pub fn new(repertoire_id: i64, title: &str, artist: &str, song_number: i64) -> Self {
        Self {
            repertoire_id,
            title: title.to_string(),
            artist: artist.to_string(),
            song_number,
            release_year: None,
            duration: None,
            audio_path: None,
            chart_path: None,
            priority: Priority::Mid,
            practice_target: 1,
            date_added: Local::now(),
            skills: Vec::new(),
        }
    }
}

/// Song path fields that folder sync may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SongField {
    AudioPath,
    ChartPath,
}

impl SongField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SongField::AudioPath => "audio_path",
            SongField::ChartPath => "chart_path",
        }
    }

    /// Column name in the `songs` table
    pub(crate) fn column(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for SongField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SongField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio_path" => Ok(SongField::AudioPath),
            "chart_path" => Ok(SongField::ChartPath),
            _ => Err(format!("Unknown song field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Mid,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Mid => "mid",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "mid" => Ok(Priority::Mid),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_field_round_trips_through_column_name() {
        for field in [SongField::AudioPath, SongField::ChartPath] {
            assert_eq!(field.as_str().parse::<SongField>().unwrap(), field);
        }
        assert!("duration".parse::<SongField>().is_err());
    }
}
