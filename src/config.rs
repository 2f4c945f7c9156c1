//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive a pipeline run and helpers
//! to load them from a TOML file and the environment.

mod load;
mod schema;

pub use schema::*;
