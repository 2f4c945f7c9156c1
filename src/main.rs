use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod ffmpeg;
mod library;
mod loudness;
mod media;
mod program;
mod runtime;
mod storage;
mod tracklist;

#[cfg(test)]
mod testutil;

use cli::Args;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mixtape=info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    runtime::run(&args)
}
