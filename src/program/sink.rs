use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use thiserror::Error;

use super::model::ProgramFormat;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Wav(#[from] hound::Error),

    #[error("program format already set to {current:?}, got {requested:?}")]
    FormatChanged {
        current: ProgramFormat,
        requested: ProgramFormat,
    },

    #[error("no audio was appended to the program")]
    Empty,

    #[error("program exceeds the {limit} byte data limit of a WAV file")]
    TooLarge { limit: u64 },
}

/// Largest data chunk [`WavSink`] writes. RIFF sizes are 32-bit and the
/// header (at most 60 bytes with an extensible format chunk) counts too.
pub const MAX_WAV_DATA_BYTES: u64 = u32::MAX as u64 - 1_024;

const BYTES_PER_SAMPLE: u64 = 2;

/// Destination of the concatenated program.
pub trait ProgramSink {
    /// Called once, before the first sample.
    fn begin(&mut self, format: ProgramFormat) -> Result<(), SinkError>;

    /// Append one interleaved sample.
    fn push(&mut self, sample: f32) -> Result<(), SinkError>;
}

/// Streams the program into a 16-bit PCM WAV file.
///
/// Refuses samples past [`MAX_WAV_DATA_BYTES`] instead of letting the
/// header sizes wrap.
pub struct WavSink {
    path: PathBuf,
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    data_bytes: u64,
    max_data_bytes: u64,
}

impl WavSink {
    /// The file is created on [`ProgramSink::begin`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_data_limit(path, MAX_WAV_DATA_BYTES)
    }

    pub(super) fn with_data_limit(path: impl Into<PathBuf>, max_data_bytes: u64) -> Self {
        Self {
            path: path.into(),
            writer: None,
            data_bytes: 0,
            max_data_bytes: max_data_bytes.min(MAX_WAV_DATA_BYTES),
        }
    }

    /// Write the WAV header sizes and close the file.
    pub fn finalize(self) -> Result<PathBuf, SinkError> {
        let writer = self.writer.ok_or(SinkError::Empty)?;
        writer.finalize()?;
        Ok(self.path)
    }
}

impl ProgramSink for WavSink {
    fn begin(&mut self, format: ProgramFormat) -> Result<(), SinkError> {
        if let Some(writer) = &self.writer {
            let spec = writer.spec();
            let current = ProgramFormat {
                channels: spec.channels,
                sample_rate: spec.sample_rate,
            };
            return Err(SinkError::FormatChanged {
                current,
                requested: format,
            });
        }

        let spec = hound::WavSpec {
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        self.writer = Some(hound::WavWriter::create(&self.path, spec)?);
        Ok(())
    }

    fn push(&mut self, sample: f32) -> Result<(), SinkError> {
        let writer = self.writer.as_mut().ok_or(SinkError::Empty)?;
        if self.data_bytes + BYTES_PER_SAMPLE > self.max_data_bytes {
            return Err(SinkError::TooLarge {
                limit: self.max_data_bytes,
            });
        }
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(value)?;
        self.data_bytes += BYTES_PER_SAMPLE;
        Ok(())
    }
}
