use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::library::ParsedName;
use crate::tracklist::TracklistEntry;

/// Channel layout and rate of the program. Fixed by the first track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramFormat {
    pub channels: u16,
    pub sample_rate: u32,
}

impl ProgramFormat {
    /// Exact duration of `frames` frames at this rate.
    pub fn frames_to_duration(&self, frames: u64) -> Duration {
        let rate = u64::from(self.sample_rate);
        let secs = frames / rate;
        let nanos = (frames % rate) * 1_000_000_000 / rate;
        Duration::new(secs, nanos as u32)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    path: PathBuf,
    ordinal: usize,
    name: ParsedName,
    label: String,
    duration: Duration,
    start_offset: Duration,
}

impl Track {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1-based position in the program.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn artist(&self) -> Option<&str> {
        self.name.artist()
    }

    pub fn title(&self) -> &str {
        self.name.title()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Decoded length of the track.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Where the track starts in the program.
    pub fn start_offset(&self) -> Duration {
        self.start_offset
    }
}

/// Tracks in program order with a running end offset.
///
/// `tracks[i].start_offset` is the sum of the durations before it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    tracks: Vec<Track>,
    end: Duration,
}

impl Playlist {
    /// Append a track starting where the previous one ended.
    pub(super) fn push(
        &mut self,
        path: PathBuf,
        name: ParsedName,
        label: String,
        duration: Duration,
    ) -> &Track {
        let track = Track {
            path,
            ordinal: self.tracks.len() + 1,
            name,
            label,
            duration,
            start_offset: self.end,
        };
        self.end += duration;
        self.tracks.push(track);
        &self.tracks[self.tracks.len() - 1]
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn total_duration(&self) -> Duration {
        self.end
    }

    pub fn tracklist(&self) -> Vec<TracklistEntry> {
        self.tracks
            .iter()
            .map(|t| TracklistEntry {
                start_offset: t.start_offset,
                label: t.label.clone(),
            })
            .collect()
    }
}
