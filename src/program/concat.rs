use std::io;
use std::path::{Path, PathBuf};

use rodio::decoder::DecoderError;
use rodio::source::UniformSourceIterator;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::NamingSettings;
use crate::library::parse_file_name;
use crate::tracklist::format_timestamp;

use super::decode;
use super::model::{Playlist, ProgramFormat};
use super::sink::{ProgramSink, SinkError};

#[derive(Debug, Error)]
pub enum ConcatError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecoderError,
    },

    #[error("{} reports no channels or sample rate", path.display())]
    NoAudio { path: PathBuf },

    #[error("failed to append {} to the program: {source}", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: SinkError,
    },
}

fn drain<I, S>(samples: I, sink: &mut S) -> Result<u64, SinkError>
where
    I: Iterator<Item = f32>,
    S: ProgramSink + ?Sized,
{
    let mut count = 0u64;
    for sample in samples {
        sink.push(sample)?;
        count += 1;
    }
    Ok(count)
}

fn fallback_label(path: &Path, lowercase: bool) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if lowercase { stem.to_lowercase() } else { stem }
}

/// Decode `paths` in order into `sink` and build the playlist.
///
/// The first track fixes the program format; later tracks with another
/// layout or rate are converted to it. Durations come from the decoded
/// frame count and start offsets from the running total.
pub fn concatenate<S>(
    paths: &[PathBuf],
    naming: &NamingSettings,
    sink: &mut S,
) -> Result<Playlist, ConcatError>
where
    S: ProgramSink + ?Sized,
{
    let mut playlist = Playlist::default();
    let mut program_format: Option<ProgramFormat> = None;

    for path in paths {
        let (decoder, format) = decode::open(path)?;
        let sink_error = |source| ConcatError::Sink {
            path: path.clone(),
            source,
        };

        let target = match program_format {
            Some(target) => target,
            None => {
                sink.begin(format).map_err(sink_error)?;
                program_format = Some(format);
                format
            }
        };

        let samples = if format == target {
            drain(decoder, sink)
        } else {
            debug!(
                path = %path.display(),
                from = ?format,
                to = ?target,
                "converting track to program format"
            );
            drain(
                UniformSourceIterator::new(decoder, target.channels, target.sample_rate),
                sink,
            )
        }
        .map_err(sink_error)?;

        let duration = target.frames_to_duration(samples / u64::from(target.channels));

        let name = parse_file_name(path, naming.strip_ordinal_prefix);
        let label = if name.title().is_empty() {
            fallback_label(path, naming.lowercase_labels)
        } else {
            name.label(naming.lowercase_labels)
        };

        let file_ordinal = name.ordinal();
        let track = playlist.push(path.clone(), name, label, duration);
        debug!(
            ordinal = track.ordinal(),
            file_ordinal = ?file_ordinal,
            path = %track.path().display(),
            artist = ?track.artist(),
            title = track.title(),
            duration = ?track.duration(),
            "appended track"
        );
        info!("{} {}", format_timestamp(track.start_offset()), track.label());
    }

    Ok(playlist)
}
