/// Metadata inferred from an audio file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub release_year: Option<String>,
    pub title: String,
    pub artist: String,
}

const SEPARATOR: &str = " - ";
const UNKNOWN_ARTIST: &str = "Unknown";

/// Parses a file stem (extension already removed).
///
/// Accepted shapes, tried in order:
/// - `YYYY - Title - Artist` (artist keeps any further ` - ` parts) or `YYYY - Title`
/// - `Title - Artist` (parts after the artist are dropped)
/// - `Title`
pub fn parse_filename(stem: &str) -> ParsedFilename {
    if !stem.contains(SEPARATOR) {
        return ParsedFilename {
            release_year: None,
            title: stem.trim().to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
        };
    }

    let parts: Vec<&str> = stem.split(SEPARATOR).map(str::trim).collect();

    if parts.len() >= 2 && is_year(parts[0]) {
        let artist = if parts.len() >= 3 {
            parts[2..].join(SEPARATOR)
        } else {
            UNKNOWN_ARTIST.to_string()
        };
        return ParsedFilename {
            release_year: Some(parts[0].to_string()),
            title: parts[1].to_string(),
            artist,
        };
    }

    ParsedFilename {
        release_year: None,
        title: parts[0].to_string(),
        artist: parts
            .get(1)
            .map(|artist| artist.to_string())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
    }
}

fn is_year(part: &str) -> bool {
    part.len() == 4 && part.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(year: Option<&str>, title: &str, artist: &str) -> ParsedFilename {
        ParsedFilename {
            release_year: year.map(String::from),
            title: title.to_string(),
            artist: artist.to_string(),
        }
    }

    #[test]
    fn test_parse_filename_shapes() {
        let cases = [
            (
                "2019 - Summer Nights - The Band",
                parsed(Some("2019"), "Summer Nights", "The Band"),
            ),
            (
                "Summer Nights - The Band",
                parsed(None, "Summer Nights", "The Band"),
            ),
            ("Summer Nights", parsed(None, "Summer Nights", "Unknown")),
            ("2019 - Summer Nights", parsed(Some("2019"), "Summer Nights", "Unknown")),
            (
                "1999 - Song - Crosby - Stills",
                parsed(Some("1999"), "Song", "Crosby - Stills"),
            ),
            ("Song - Artist - Live", parsed(None, "Song", "Artist")),
            ("  Padded Title  ", parsed(None, "Padded Title", "Unknown")),
        ];

        for (stem, expected) in cases {
            assert_eq!(parse_filename(stem), expected, "stem: {:?}", stem);
        }
    }

    #[test]
    fn test_non_year_prefix_is_a_title() {
        assert_eq!(parse_filename("19999 - Intro"), parsed(None, "19999", "Intro"));
        assert_eq!(parse_filename("20a9 - Intro"), parsed(None, "20a9", "Intro"));
        assert_eq!(parse_filename("1984"), parsed(None, "1984", "Unknown"));
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(
            parse_filename("hey JUDE - the Beatles"),
            parsed(None, "hey JUDE", "the Beatles")
        );
    }
}
