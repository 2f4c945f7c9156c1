//! Track files on disk: enumeration, numbering and name parsing.
//!
//! `catalog` lists and orders the track files of a folder, `rename` gives
//! them ordinal prefixes, and `filename` reads ordinal, artist and title
//! back out of a file name.

mod catalog;
mod filename;
mod rename;

pub use catalog::*;
pub use filename::*;
pub use rename::*;
