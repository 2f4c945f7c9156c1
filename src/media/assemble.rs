use std::ffi::OsString;
use std::path::Path;

use crate::ffmpeg::{Ffmpeg, ToolError};

/// Produces the still cover and the final video from the program.
pub trait MediaAssembler {
    fn resize_cover(&self, src: &Path, dst: &Path, width: u32, height: u32)
    -> Result<(), ToolError>;

    fn mux_video(&self, cover: &Path, audio: &Path, dst: &Path, fps: u32) -> Result<(), ToolError>;
}

#[derive(Debug, Clone)]
pub struct FfmpegAssembler {
    ffmpeg: Ffmpeg,
}

impl FfmpegAssembler {
    pub fn new(ffmpeg: Ffmpeg) -> Self {
        Self { ffmpeg }
    }
}

pub(crate) fn resize_args(src: &Path, dst: &Path, width: u32, height: u32) -> Vec<OsString> {
    vec![
        "-i".into(),
        src.into(),
        "-vf".into(),
        format!("scale={width}:{height}").into(),
        "-frames:v".into(),
        "1".into(),
        "-q:v".into(),
        "2".into(),
        dst.into(),
    ]
}

pub(crate) fn mux_args(cover: &Path, audio: &Path, dst: &Path, fps: u32) -> Vec<OsString> {
    let fps = fps.to_string();
    vec![
        "-loop".into(),
        "1".into(),
        "-framerate".into(),
        fps.clone().into(),
        "-i".into(),
        cover.into(),
        "-i".into(),
        audio.into(),
        "-c:v".into(),
        "libx264".into(),
        "-tune".into(),
        "stillimage".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-r".into(),
        fps.into(),
        "-c:a".into(),
        "aac".into(),
        "-b:a".into(),
        "192k".into(),
        "-shortest".into(),
        dst.into(),
    ]
}

impl MediaAssembler for FfmpegAssembler {
    fn resize_cover(
        &self,
        src: &Path,
        dst: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ToolError> {
        self.ffmpeg.run(resize_args(src, dst, width, height))
    }

    fn mux_video(&self, cover: &Path, audio: &Path, dst: &Path, fps: u32) -> Result<(), ToolError> {
        self.ffmpeg.run(mux_args(cover, audio, dst, fps))
    }
}
