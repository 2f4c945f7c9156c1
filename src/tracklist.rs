//! Timestamped tracklist text.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// One tracklist line: where a track starts and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracklistEntry {
    pub start_offset: Duration,
    pub label: String,
}

/// `HH:MM:SS`, truncating sub-second time.
///
/// Hours do not wrap at 24 and are padded to two digits, so 100 hours and
/// more print with three.
pub fn format_timestamp(offset: Duration) -> String {
    let total = offset.as_secs();
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// One `"<HH:MM:SS> <label>"` line per entry, newline terminated.
pub fn render(entries: &[TracklistEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{} {}", format_timestamp(entry.start_offset), entry.label);
    }
    out
}

pub fn write_tracklist(entries: &[TracklistEntry], path: &Path) -> io::Result<()> {
    fs::write(path, render(entries))
}
