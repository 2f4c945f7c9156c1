//! Cover art and video assembly, delegated to ffmpeg.

mod assemble;
mod cover;

pub use assemble::*;
pub use cover::*;
