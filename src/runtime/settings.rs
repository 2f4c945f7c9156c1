use crate::cli::Args;
use crate::config;
use crate::error::PipelineError;

/// Settings from file and environment, with command-line flags on top.
pub fn load_settings(args: &Args) -> Result<config::Settings, PipelineError> {
    let mut settings = config::Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    settings.validate().map_err(PipelineError::Config)?;
    Ok(settings)
}
