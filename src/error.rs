//! Errors that end a pipeline run.
//!
//! Each stage has its own error type; this enum folds them together and
//! lifts the ones a user acts on (missing folders, bad names, failed
//! normalization, missing cover) to top-level variants with their path.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ffmpeg::ToolError;
use crate::library::{CatalogError, RenameError};
use crate::loudness::{FailureReason, NormalizeError};
use crate::program::{ConcatError, SinkError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("file name has no leading track number: {}", path.display())]
    MalformedFilename { path: PathBuf },

    #[error("no .{extension} tracks found in {}", dir.display())]
    NoTracks { dir: PathBuf, extension: String },

    #[error("loudness normalization failed for {}: {reason}", path.display())]
    NormalizationFailure { path: PathBuf, reason: FailureReason },

    #[error("no cover image (cover.png, cover.jpg or cover.jpeg) found in {}", dir.display())]
    MissingCoverImage { dir: PathBuf },

    #[error(transparent)]
    Rename(#[from] RenameError),

    #[error(transparent)]
    Concat(#[from] ConcatError),

    #[error("failed to write program {}: {source}", path.display())]
    Program {
        path: PathBuf,
        #[source]
        source: SinkError,
    },

    #[error("{stage} failed: {source}")]
    Media {
        stage: &'static str,
        #[source]
        source: ToolError,
    },

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Settings(#[from] ::config::ConfigError),
}

impl From<CatalogError> for PipelineError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::MissingDirectory { path } => Self::MissingDirectory { path },
            CatalogError::MalformedFilename { path } => Self::MalformedFilename { path },
            CatalogError::Io { path, source } => Self::Io {
                action: "list",
                path,
                source,
            },
        }
    }
}

impl From<NormalizeError> for PipelineError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Failed { path, reason } => Self::NormalizationFailure { path, reason },
            NormalizeError::Swap { path, source } => Self::Io {
                action: "replace",
                path,
                source,
            },
        }
    }
}

/// Convenience Result type for the pipeline.
pub type Result<T> = std::result::Result<T, PipelineError>;
