//! Thin wrapper around the `ffmpeg` executable.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exited with {}: {stderr}", program.display(), exit_label(*code))]
    Failed {
        program: PathBuf,
        /// `None` when the process was killed by a signal.
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Ffmpeg {
    binary: PathBuf,
}

impl Ffmpeg {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Run ffmpeg non-interactively, overwriting outputs, and wait for it.
    pub fn run<I, S>(&self, args: I) -> Result<(), ToolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["-hide_banner", "-nostdin", "-loglevel", "error", "-y"])
            .args(args)
            .stdin(Stdio::null());

        debug!(command = ?cmd, "running ffmpeg");
        let output = cmd.output().map_err(|source| ToolError::Launch {
            program: self.binary.clone(),
            source,
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                program: self.binary.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
