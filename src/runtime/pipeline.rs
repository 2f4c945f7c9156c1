use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::config::{CatalogSettings, OrderingPolicy, RenameMode, Settings};
use crate::error::{PipelineError, Result};
use crate::library::{catalog, rename_tracks};
use crate::loudness::{LoudnessTransform, normalize_all};
use crate::media::{MediaAssembler, find_cover_image};
use crate::program::{WavSink, concatenate};
use crate::storage::Storage;
use crate::tracklist::{format_timestamp, write_tracklist};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub tracks: usize,
    pub total_duration: Duration,
    pub audio: PathBuf,
    pub tracklist: PathBuf,
    pub cover: PathBuf,
    pub video: Option<PathBuf>,
}

/// One run over a track folder, with its collaborators injected.
pub struct Pipeline<'a> {
    settings: &'a Settings,
    storage: &'a dyn Storage,
    loudness: &'a dyn LoudnessTransform,
    media: &'a dyn MediaAssembler,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        settings: &'a Settings,
        storage: &'a dyn Storage,
        loudness: &'a dyn LoudnessTransform,
        media: &'a dyn MediaAssembler,
    ) -> Self {
        Self {
            settings,
            storage,
            loudness,
            media,
        }
    }

    fn require_dir(&self, path: &Path) -> Result<()> {
        if self.storage.is_dir(path) {
            Ok(())
        } else {
            Err(PipelineError::MissingDirectory {
                path: path.to_path_buf(),
            })
        }
    }

    /// Give every track an ordinal prefix when renaming is enabled.
    fn number_tracks(&self, tracks_dir: &Path) -> Result<()> {
        let rename = &self.settings.rename;
        if rename.mode == RenameMode::Off {
            return Ok(());
        }

        // Unnumbered names cannot be ordered numerically yet.
        let listing = CatalogSettings {
            ordering: OrderingPolicy::Lexicographic,
            ..self.settings.catalog.clone()
        };
        let files = catalog(self.storage, tracks_dir, &listing)?;
        rename_tracks(self.storage, &files, rename.mode, rename.seed)?;
        Ok(())
    }

    /// Run every stage in order. Outputs of completed stages are left in
    /// place when a later stage fails.
    pub fn run(&self) -> Result<RunSummary> {
        let paths = &self.settings.paths;
        let output = &self.settings.output;
        let tracks_dir = paths.tracks_dir();

        self.require_dir(&paths.assets_dir)?;
        self.require_dir(&tracks_dir)?;

        self.number_tracks(&tracks_dir)?;

        let files = catalog(self.storage, &tracks_dir, &self.settings.catalog)?;
        if files.is_empty() {
            return Err(PipelineError::NoTracks {
                dir: tracks_dir,
                extension: self.settings.catalog.extension.clone(),
            });
        }
        info!(count = files.len(), dir = %tracks_dir.display(), "found tracks");

        if self.settings.normalize.enabled {
            normalize_all(self.loudness, &files)?;
        } else {
            info!("loudness normalization disabled, using tracks as they are");
        }

        fs::create_dir_all(&paths.output_dir).map_err(|source| PipelineError::Io {
            action: "create",
            path: paths.output_dir.clone(),
            source,
        })?;

        let audio_path = paths.output_dir.join(&output.audio_file);
        let mut sink = WavSink::new(&audio_path);
        let playlist = concatenate(&files, &self.settings.naming, &mut sink)?;
        sink.finalize().map_err(|source| PipelineError::Program {
            path: audio_path.clone(),
            source,
        })?;
        info!(
            path = %audio_path.display(),
            length = %format_timestamp(playlist.total_duration()),
            "program written"
        );

        let tracklist_path = paths.output_dir.join(&output.tracklist_file);
        write_tracklist(&playlist.tracklist(), &tracklist_path).map_err(|source| {
            PipelineError::Io {
                action: "write",
                path: tracklist_path.clone(),
                source,
            }
        })?;
        info!(path = %tracklist_path.display(), "tracklist written");

        let cover_src = find_cover_image(&paths.assets_dir)
            .map_err(|source| PipelineError::Io {
                action: "search",
                path: paths.assets_dir.clone(),
                source,
            })?
            .ok_or_else(|| PipelineError::MissingCoverImage {
                dir: paths.assets_dir.clone(),
            })?;

        let cover_path = paths.output_dir.join(&output.cover_file);
        self.media
            .resize_cover(
                &cover_src,
                &cover_path,
                output.cover_width,
                output.cover_height,
            )
            .map_err(|source| PipelineError::Media {
                stage: "cover resize",
                source,
            })?;
        info!(path = %cover_path.display(), "cover resized");

        let video = if output.video {
            let video_path = paths.output_dir.join(&output.video_file);
            self.media
                .mux_video(&cover_path, &audio_path, &video_path, output.fps)
                .map_err(|source| PipelineError::Media {
                    stage: "video mux",
                    source,
                })?;
            info!(path = %video_path.display(), "video written");
            Some(video_path)
        } else {
            None
        };

        Ok(RunSummary {
            tracks: playlist.tracks().len(),
            total_duration: playlist.total_duration(),
            audio: audio_path,
            tracklist: tracklist_path,
            cover: cover_path,
            video,
        })
    }
}
