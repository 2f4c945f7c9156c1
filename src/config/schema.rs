use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings for a pipeline run.
///
/// File format: TOML
/// Default path: `./mixtape.toml`, or `$MIXTAPE_CONFIG_PATH` when set
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `MIXTAPE__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub catalog: CatalogSettings,
    pub rename: RenameSettings,
    pub normalize: NormalizeSettings,
    pub naming: NamingSettings,
    pub output: OutputSettings,
    pub tools: ToolSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory holding the cover image and, by default, the track folder.
    pub assets_dir: PathBuf,
    /// Track folder. Defaults to `<assets_dir>/tracks`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks_dir: Option<PathBuf>,
    /// Directory receiving the program, tracklist, cover and video.
    pub output_dir: PathBuf,
}

impl PathSettings {
    pub fn tracks_dir(&self) -> PathBuf {
        self.tracks_dir
            .clone()
            .unwrap_or_else(|| self.assets_dir.join("tracks"))
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            tracks_dir: None,
            output_dir: PathBuf::from("output"),
        }
    }
}

/// How catalogued files are put in program order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingPolicy {
    /// Sort by the integer before the first separator; every file must have one.
    #[serde(alias = "numeric", alias = "numeric_prefix")]
    NumericPrefix,
    /// Plain string sort of file names.
    #[serde(alias = "lexical", alias = "alphabetical")]
    Lexicographic,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Track file extension (case-insensitive, without dot).
    pub extension: String,
    pub ordering: OrderingPolicy,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            extension: "mp3".to_string(),
            ordering: OrderingPolicy::NumericPrefix,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenameMode {
    /// Leave file names alone.
    #[serde(alias = "none")]
    Off,
    /// Number files in their current (lexicographic) order.
    #[serde(alias = "number")]
    Sequential,
    /// Number files after a random permutation.
    #[serde(alias = "shuffle")]
    Shuffled,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenameSettings {
    pub mode: RenameMode,
    /// Seed for the shuffle; unseeded runs draw from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RenameSettings {
    fn default() -> Self {
        Self {
            mode: RenameMode::Off,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizeSettings {
    /// Rewrite every track to the fixed loudness profile before concatenation.
    pub enabled: bool,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingSettings {
    /// Drop a leading `NNN. ` ordinal before reading artist and title.
    pub strip_ordinal_prefix: bool,
    /// Lower-case tracklist labels.
    pub lowercase_labels: bool,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            strip_ordinal_prefix: true,
            lowercase_labels: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    pub audio_file: String,
    pub tracklist_file: String,
    pub cover_file: String,
    pub video_file: String,
    pub cover_width: u32,
    pub cover_height: u32,
    pub fps: u32,
    /// Whether to mux the cover and program into a video.
    pub video: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            audio_file: "audio.wav".to_string(),
            tracklist_file: "tracklist.txt".to_string(),
            cover_file: "cover.jpg".to_string(),
            video_file: "video.mp4".to_string(),
            cover_width: 1920,
            cover_height: 1080,
            fps: 24,
            video: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolSettings {
    /// `ffmpeg` executable used for loudness normalization and muxing.
    pub ffmpeg: PathBuf,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }
}
