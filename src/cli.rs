use std::path::PathBuf;

use clap::Parser;

use crate::config::{OrderingPolicy, RenameMode, Settings};

#[derive(Parser, Debug, Default)]
#[command(name = "mixtape")]
#[command(about = "Turn a folder of numbered tracks into one program with a timestamped tracklist")]
#[command(version)]
pub struct Args {
    /// Config file (defaults to $MIXTAPE_CONFIG_PATH, then ./mixtape.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the cover image and the track folder
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Track folder (defaults to <ASSETS>/tracks)
    #[arg(long, value_name = "DIR")]
    pub tracks: Option<PathBuf>,

    /// Directory receiving the program, tracklist, cover and video
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Shuffle the tracks and number them in the new order
    #[arg(long, conflicts_with = "number")]
    pub shuffle: bool,

    /// Number the tracks in their current order
    #[arg(long)]
    pub number: bool,

    /// Seed for --shuffle, for a reproducible order
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// How track files are put in program order
    #[arg(long, value_enum, value_name = "POLICY")]
    pub ordering: Option<OrderingPolicy>,

    /// Use the tracks as they are, without loudness normalization
    #[arg(long)]
    pub skip_normalize: bool,

    /// Stop after the program, tracklist and cover
    #[arg(long)]
    pub no_video: bool,

    /// Keep the original case of artist and title in the tracklist
    #[arg(long)]
    pub keep_case: bool,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Overlay the flags that were given on top of `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.assets {
            settings.paths.assets_dir = dir.clone();
        }
        if let Some(dir) = &self.tracks {
            settings.paths.tracks_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.output {
            settings.paths.output_dir = dir.clone();
        }
        if self.shuffle {
            settings.rename.mode = RenameMode::Shuffled;
        } else if self.number {
            settings.rename.mode = RenameMode::Sequential;
        }
        if self.seed.is_some() {
            settings.rename.seed = self.seed;
        }
        if let Some(ordering) = self.ordering {
            settings.catalog.ordering = ordering;
        }
        if self.skip_normalize {
            settings.normalize.enabled = false;
        }
        if self.no_video {
            settings.output.video = false;
        }
        if self.keep_case {
            settings.naming.lowercase_labels = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_leave_settings_alone() {
        let args = Args::try_parse_from(["mixtape"]).unwrap();
        let mut settings = Settings::default();
        args.apply(&mut settings);

        assert_eq!(settings.rename.mode, RenameMode::Off);
        assert_eq!(settings.catalog.ordering, OrderingPolicy::NumericPrefix);
        assert!(settings.normalize.enabled);
        assert!(settings.output.video);
    }

    #[test]
    fn shuffle_flag_selects_shuffled_numbering() {
        let args = Args::try_parse_from(["mixtape", "--shuffle", "--seed", "42"]).unwrap();
        let mut settings = Settings::default();
        args.apply(&mut settings);

        assert_eq!(settings.rename.mode, RenameMode::Shuffled);
        assert_eq!(settings.rename.seed, Some(42));
    }

    #[test]
    fn shuffle_and_number_conflict() {
        assert!(Args::try_parse_from(["mixtape", "--shuffle", "--number"]).is_err());
    }

    #[test]
    fn paths_and_policies_override_settings() {
        let args = Args::try_parse_from([
            "mixtape",
            "--assets",
            "in",
            "--tracks",
            "in/songs",
            "-o",
            "out",
            "--ordering",
            "lexicographic",
            "--skip-normalize",
            "--no-video",
            "--keep-case",
            "--number",
        ])
        .unwrap();
        let mut settings = Settings::default();
        args.apply(&mut settings);

        assert_eq!(settings.paths.assets_dir, PathBuf::from("in"));
        assert_eq!(settings.paths.tracks_dir(), PathBuf::from("in/songs"));
        assert_eq!(settings.paths.output_dir, PathBuf::from("out"));
        assert_eq!(settings.catalog.ordering, OrderingPolicy::Lexicographic);
        assert_eq!(settings.rename.mode, RenameMode::Sequential);
        assert!(!settings.normalize.enabled);
        assert!(!settings.output.video);
        assert!(!settings.naming.lowercase_labels);
    }

    #[test]
    fn unknown_ordering_is_rejected() {
        assert!(Args::try_parse_from(["mixtape", "--ordering", "random"]).is_err());
    }
}
