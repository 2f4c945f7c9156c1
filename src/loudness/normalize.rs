use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lofty::prelude::AudioFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ffmpeg::{Ffmpeg, ToolError};

/// Integrated loudness, loudness range and true-peak ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoudnessProfile {
    /// LUFS
    pub integrated: f64,
    /// LU
    pub range: f64,
    /// dBTP
    pub true_peak: f64,
}

impl LoudnessProfile {
    /// ffmpeg `loudnorm` filter expression for this profile.
    pub fn filter(&self) -> String {
        format!(
            "loudnorm=I={}:LRA={}:TP={}",
            self.integrated, self.range, self.true_peak
        )
    }
}

/// The one profile every track is normalized to.
pub const LOUDNESS_PROFILE: LoudnessProfile = LoudnessProfile {
    integrated: -16.0,
    range: 11.0,
    true_peak: -1.5,
};

/// External renderer that writes a normalized copy of `input` to `output`.
pub trait LoudnessTransform {
    fn apply(&self, input: &Path, output: &Path) -> Result<(), ToolError>;
}

/// `ffmpeg -af loudnorm` with [`LOUDNESS_PROFILE`].
#[derive(Debug, Clone)]
pub struct FfmpegLoudnorm {
    ffmpeg: Ffmpeg,
}

impl FfmpegLoudnorm {
    pub fn new(ffmpeg: Ffmpeg) -> Self {
        Self { ffmpeg }
    }
}

impl LoudnessTransform for FfmpegLoudnorm {
    fn apply(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        let filter = LOUDNESS_PROFILE.filter();
        self.ffmpeg.run([
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-af"),
            OsStr::new(&filter),
            output.as_os_str(),
        ])
    }
}

/// Why a staged output was not swapped in.
#[derive(Debug, Error)]
pub enum FailureReason {
    #[error(transparent)]
    Transform(#[from] ToolError),

    #[error("transform produced no output file")]
    MissingOutput,

    #[error("transform produced an empty file")]
    EmptyOutput,

    #[error("transform output is not readable audio: {0}")]
    InvalidOutput(String),
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("loudness normalization failed for {}: {reason}", path.display())]
    Failed {
        path: PathBuf,
        #[source]
        reason: FailureReason,
    },

    #[error("failed to replace {} with its normalized copy: {source}", path.display())]
    Swap {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Hidden sibling `.<stem>.loudnorm.<ext>`; the extension is kept so the
/// transform picks the same container.
pub fn staging_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!(".{stem}.loudnorm.{}", ext.to_string_lossy()),
        None => format!(".{stem}.loudnorm"),
    };
    path.with_file_name(name)
}

fn validate_output(path: &Path) -> Result<(), FailureReason> {
    let meta = fs::metadata(path).map_err(|_| FailureReason::MissingOutput)?;
    if meta.len() == 0 {
        return Err(FailureReason::EmptyOutput);
    }

    let tagged =
        lofty::read_from_path(path).map_err(|e| FailureReason::InvalidOutput(e.to_string()))?;
    if tagged.properties().duration().is_zero() {
        return Err(FailureReason::InvalidOutput(
            "audio has zero duration".to_string(),
        ));
    }
    Ok(())
}

fn discard(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "could not remove staged file");
        }
    }
}

/// Normalize one file in place.
///
/// The original is only replaced after the staged output validates; on any
/// failure it is left untouched and the staged file is removed.
pub fn normalize_file(transform: &dyn LoudnessTransform, path: &Path) -> Result<(), NormalizeError> {
    let staged = staging_path(path);
    debug!(source = %path.display(), staged = %staged.display(), "normalizing");

    let outcome = transform
        .apply(path, &staged)
        .map_err(FailureReason::from)
        .and_then(|()| validate_output(&staged));

    if let Err(reason) = outcome {
        discard(&staged);
        return Err(NormalizeError::Failed {
            path: path.to_path_buf(),
            reason,
        });
    }

    fs::rename(&staged, path).map_err(|source| {
        discard(&staged);
        NormalizeError::Swap {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Normalize `paths` one after another, stopping at the first failure.
pub fn normalize_all(
    transform: &dyn LoudnessTransform,
    paths: &[PathBuf],
) -> Result<usize, NormalizeError> {
    let total = paths.len();
    for (i, path) in paths.iter().enumerate() {
        info!(
            "normalizing [{}/{}] {}",
            i + 1,
            total,
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        normalize_file(transform, path)?;
    }
    Ok(total)
}
