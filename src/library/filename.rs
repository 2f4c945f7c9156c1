use std::path::Path;

/// Separator between artist and title inside a file name.
pub const ARTIST_TITLE_SEPARATOR: &str = " - ";

/// Ordinal, artist and title read from a track's file name.
///
/// The grammar is
///
/// ```text
/// file_name := body "." extension | body
/// body      := [ordinal ". " spaces*] rest
/// rest      := artist " - " title      (split at the first " - ")
///            | title
/// ```
///
/// Both sides of the split are trimmed; if either is empty the whole
/// `rest` becomes the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    WithArtist {
        ordinal: Option<u32>,
        artist: String,
        title: String,
    },
    TitleOnly {
        ordinal: Option<u32>,
        title: String,
    },
}

impl ParsedName {
    pub fn ordinal(&self) -> Option<u32> {
        match self {
            Self::WithArtist { ordinal, .. } | Self::TitleOnly { ordinal, .. } => *ordinal,
        }
    }

    pub fn artist(&self) -> Option<&str> {
        match self {
            Self::WithArtist { artist, .. } => Some(artist),
            Self::TitleOnly { .. } => None,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::WithArtist { title, .. } | Self::TitleOnly { title, .. } => title,
        }
    }

    /// `"artist - title"` or just `"title"`, as shown in the tracklist.
    pub fn label(&self, lowercase: bool) -> String {
        let label = match self {
            Self::WithArtist { artist, title, .. } => {
                format!("{artist}{ARTIST_TITLE_SEPARATOR}{title}")
            }
            Self::TitleOnly { title, .. } => title.clone(),
        };
        if lowercase {
            label.to_lowercase()
        } else {
            label
        }
    }
}

/// Split a leading `NNN. ` ordinal off `name`.
///
/// The dot must be followed by whitespace, so `"1.5 Mix"` keeps its number.
pub fn split_ordinal(name: &str) -> Option<(u32, &str)> {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let after = name[digits..].strip_prefix('.')?;
    if !after.starts_with(char::is_whitespace) {
        return None;
    }
    let ordinal = name[..digits].parse().ok()?;
    Some((ordinal, after.trim_start()))
}

/// Number in front of the first `.` of `name`, with or without a space
/// after the dot: `"001. Song"` and `"001.Song"` both give 1.
pub fn numbered_prefix(name: &str) -> Option<u32> {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || !name[digits..].starts_with('.') {
        return None;
    }
    name[..digits].parse().ok()
}

/// Parse a file name stem (extension already removed).
pub fn parse_stem(stem: &str, strip_ordinal: bool) -> ParsedName {
    let (ordinal, rest) = match split_ordinal(stem) {
        Some((ordinal, rest)) if strip_ordinal => (Some(ordinal), rest),
        _ => (None, stem),
    };
    let rest = rest.trim();

    if let Some((artist, title)) = rest.split_once(ARTIST_TITLE_SEPARATOR) {
        let (artist, title) = (artist.trim(), title.trim());
        if !artist.is_empty() && !title.is_empty() {
            return ParsedName::WithArtist {
                ordinal,
                artist: artist.to_string(),
                title: title.to_string(),
            };
        }
    }

    ParsedName::TitleOnly {
        ordinal,
        title: rest.to_string(),
    }
}

/// Parse the file name of `path`.
pub fn parse_file_name(path: &Path, strip_ordinal: bool) -> ParsedName {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    parse_stem(stem, strip_ordinal)
}
