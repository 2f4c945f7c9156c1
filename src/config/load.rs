use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "mixtape.toml";

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `MIXTAPE__`) over an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from the environment and a config file.
    ///
    /// An `explicit` path must exist; the implicit lookup is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let (config_path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (resolve_config_path(), false),
        };

        let cfg = ::config::Config::builder()
            .add_source(::config::File::from(config_path.as_path()).required(required))
            .add_source(
                ::config::Environment::with_prefix("MIXTAPE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        cfg.try_deserialize()
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let ext = self.catalog.extension.trim().trim_start_matches('.');
        if ext.is_empty() {
            return Err("catalog.extension must not be empty".to_string());
        }
        if self.output.cover_width == 0 || self.output.cover_height == 0 {
            return Err("output.cover_width and output.cover_height must be >= 1".to_string());
        }
        if self.output.fps == 0 {
            return Err("output.fps must be >= 1".to_string());
        }
        for (key, name) in [
            ("output.audio_file", &self.output.audio_file),
            ("output.tracklist_file", &self.output.tracklist_file),
            ("output.cover_file", &self.output.cover_file),
            ("output.video_file", &self.output.video_file),
        ] {
            if name.trim().is_empty() {
                return Err(format!("{key} must not be empty"));
            }
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `MIXTAPE_CONFIG_PATH`, else `./mixtape.toml`.
pub fn resolve_config_path() -> PathBuf {
    env::var_os("MIXTAPE_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
