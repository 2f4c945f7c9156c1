//! The concatenated audio program and its timeline.
//!
//! `concat` decodes every track in order, appends its samples to a
//! [`ProgramSink`] and records where each track starts. The resulting
//! `Playlist` is the only place `Track` values are built.

mod concat;
mod decode;
#[cfg(test)]
mod memory;
mod model;
mod sink;

pub use concat::*;
pub use sink::*;
