use anyhow::Context;
use tracing::{debug, info};

use crate::cli::Args;
use crate::ffmpeg::Ffmpeg;
use crate::loudness::FfmpegLoudnorm;
use crate::media::FfmpegAssembler;
use crate::storage::FsStorage;
use crate::tracklist::format_timestamp;

mod pipeline;
mod settings;

pub use pipeline::Pipeline;


pub fn run(args: &Args) -> anyhow::Result<()> {
    let settings = settings::load_settings(args).context("failed to load settings")?;

    if args.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let ffmpeg = Ffmpeg::new(&settings.tools.ffmpeg);
    debug!(binary = %ffmpeg.binary().display(), "using ffmpeg");
    let loudness = FfmpegLoudnorm::new(ffmpeg.clone());
    let media = FfmpegAssembler::new(ffmpeg);
    let storage = FsStorage;

    let summary = Pipeline::new(&settings, &storage, &loudness, &media).run()?;

    info!(
        tracks = summary.tracks,
        length = %format_timestamp(summary.total_duration),
        audio = %summary.audio.display(),
        tracklist = %summary.tracklist.display(),
        "done"
    );
    if let Some(video) = &summary.video {
        info!(path = %video.display(), "video ready");
    }
    Ok(())
}
