use std::path::{Path, PathBuf};

/// Case-insensitive match between a song and a file stem.
///
/// Matches when the title is inside the stem, the stem is inside the title,
/// or the stem contains `"<artist> - <title>"`. Empty titles and stems never
/// match.
pub fn matches(title: &str, artist: &str, stem: &str) -> bool {
    let title = title.to_lowercase();
    let stem = stem.to_lowercase();
    if title.is_empty() || stem.is_empty() {
        return false;
    }

    let artist_title = format!("{} - {}", artist.to_lowercase(), title);
    stem.contains(&title) || title.contains(&stem) || stem.contains(&artist_title)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name_lower(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// First candidate, in listing order, matching the song
pub fn find_audio_match<'a>(
    title: &str,
    artist: &str,
    candidates: &'a [PathBuf],
) -> Option<&'a PathBuf> {
    candidates
        .iter()
        .find(|path| matches(title, artist, &stem_of(path)))
}

/// Best chart for the song.
///
/// Among matching candidates, the first whose file name contains `chords`
/// wins, then the first containing `chart`, then the first match.
pub fn find_chart_match<'a>(
    title: &str,
    artist: &str,
    candidates: &'a [PathBuf],
) -> Option<&'a PathBuf> {
    let matching: Vec<&PathBuf> = candidates
        .iter()
        .filter(|path| matches(title, artist, &stem_of(path)))
        .collect();

    ["chords", "chart"]
        .iter()
        .find_map(|keyword| {
            matching
                .iter()
                .find(|path| file_name_lower(path).contains(keyword))
                .copied()
        })
        .or_else(|| matching.first().copied())
}
