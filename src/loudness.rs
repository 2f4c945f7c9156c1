//! In-place loudness normalization of track files.
//!
//! Each file is rendered by an external [`LoudnessTransform`] into a hidden
//! sibling, the result is checked, and only then swapped over the original.

mod normalize;

pub use normalize::*;

#[cfg(test)]
mod tests;
