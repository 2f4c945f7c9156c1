use std::time::Duration;

use super::model::ProgramFormat;
use super::sink::{ProgramSink, SinkError};

/// Program held in memory as interleaved `f32` samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    format: Option<ProgramFormat>,
    samples: Vec<f32>,
}

impl Program {
    pub fn format(&self) -> Option<ProgramFormat> {
        self.format
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn frames(&self) -> u64 {
        match self.format {
            Some(f) => self.samples.len() as u64 / u64::from(f.channels),
            None => 0,
        }
    }

    pub fn duration(&self) -> Duration {
        match self.format {
            Some(f) => f.frames_to_duration(self.frames()),
            None => Duration::ZERO,
        }
    }
}

impl ProgramSink for Program {
    fn begin(&mut self, format: ProgramFormat) -> Result<(), SinkError> {
        match self.format {
            Some(current) if current != format => Err(SinkError::FormatChanged {
                current,
                requested: format,
            }),
            _ => {
                self.format = Some(format);
                Ok(())
            }
        }
    }

    fn push(&mut self, sample: f32) -> Result<(), SinkError> {
        self.samples.push(sample);
        Ok(())
    }
}
