use args::CliArgs;
use base::error::RoughscatError;

pub(crate) mod args;
pub mod cli;
mod config;

pub use config::*;

/// Main entry point for the roughscat app.
pub fn run() -> Result<(), RoughscatError> {
    let (args, launch_time) = base::cli::parse_args::<CliArgs>();

    let log_level = if args.verbose { 4 } else { args.log_level };
    let timestamp = args.log_timestamp.then_some(launch_time);
    base::cli::setup_logging(timestamp, log_level, &[]);
    base::cli::log_launch("roughscat", launch_time);

    let config = Config::load_config(args.config.as_deref())?;

    cli::run(args.command, config)
}
