use crate::models::Song;
use rusqlite::Row;

/// Column list matching [`row_to_song`]
pub(crate) const SONG_COLUMNS: &str =
    "id, repertoire_id, title, artist, song_number, release_date, duration, audio_path, chart_path";

/// Convert a database row selected with [`SONG_COLUMNS`] to a Song
pub(crate) fn row_to_song(row: &Row) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get("id")?,
        repertoire_id: row.get("repertoire_id")?,
        title: row.get("title")?,
        artist: row.get("artist")?,
        song_number: row.get("song_number")?,
        release_year: row.get("release_date")?,
        duration: row.get("duration")?,
        audio_path: row.get("audio_path")?,
        chart_path: row.get("chart_path")?,
    })
}
