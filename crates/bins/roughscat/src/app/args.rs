use crate::app::cli::{
    ClassifyOptions, FieldOptions, ProfileOptions, SimulateOptions,
};
use std::path::PathBuf;

/// Roughscat command line interface arguments.
#[derive(clap::Parser, Debug)]
#[clap(
    author,
    version,
    about = "Light scattering by rough metallic surfaces."
)]
pub struct CliArgs {
    /// Whether to print verbose information to stdout.
    #[clap(short, long, help = "Use verbose output (log level = 4)")]
    pub verbose: bool,

    /// Whether to show the timestamp in the log.
    #[clap(
        long,
        help = "Show timestamp for each log message in seconds since\nprogram starts"
    )]
    pub log_timestamp: bool,

    /// Verbosity level for the log.
    #[clap(
        long,
        help = "Setting logging verbosity level (higher for more\ndetails)\n  0 - error\n  1 - \
                warn + error\n  2 - info + warn + error\n  3 - debug + info + warn + error\n  4 - \
                trace + debug + info + warn + error\n\x08",
        default_value_t = 1
    )]
    pub log_level: u8,

    /// Command to execute.
    #[clap(subcommand)]
    pub command: SubCommand,

    /// Path to the user config file. If not specified, roughscat looks for
    /// `roughscat.toml` in the current directory, then in the system
    /// configuration directory.
    #[clap(short, long, help = "Path to the user config file")]
    pub config: Option<PathBuf>,
}

/// Roughscat command.
#[derive(clap::Subcommand, Debug)]
pub enum SubCommand {
    /// Simulates the angular scattering of a rough surface.
    Simulate(SimulateOptions),

    /// Prints the scattering regime of a surface.
    Classify(ClassifyOptions),

    /// Generates a 1-D height profile.
    Profile(ProfileOptions),

    /// Generates a smoothed 2-D height field.
    Field(FieldOptions),

    /// Prints related information about the current roughscat instance.
    #[clap(name = "info")]
    PrintInfo(PrintInfoOptions),
}

#[derive(clap::Args, Debug)]
#[clap(about = "Print information about roughscat.")]
pub struct PrintInfoOptions {
    #[clap(
        help = "Type of information to print. If not specified, all information\nwill be printed."
    )]
    pub kind: Option<PrintInfoKind>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintInfoKind {
    /// Print the current configuration.
    Config,
    /// Print the default surface parameters.
    Defaults,
    /// Print the material presets.
    Materials,
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::{deg, um};
    use bxdf::ScatteringModel;
    use clap::Parser;

    #[test]
    fn parse_simulate() {
        let args = CliArgs::try_parse_from([
            "roughscat",
            "--log-level",
            "3",
            "simulate",
            "--ra",
            "0.8um",
            "--incident-angle",
            "-30",
            "--model",
            "harvey-shack",
            "--domain",
            "-60 .. =60 / 0.5",
        ])
        .unwrap();
        assert_eq!(args.log_level, 3);
        match args.command {
            SubCommand::Simulate(opts) => {
                assert_eq!(opts.surface.ra, um!(0.8));
                assert_eq!(opts.surface.incident_angle, deg!(-30.0));
                assert_eq!(opts.model, ScatteringModel::HarveyShack);
                let domain = opts.domain.unwrap();
                assert_eq!(domain.start, deg!(-60.0));
                assert_eq!(domain.step_size, deg!(0.5));
            },
            _ => panic!("expected the simulate command"),
        }
    }

    #[test]
    fn parse_profile_defaults() {
        let args = CliArgs::try_parse_from(["roughscat", "profile", "--ra", "1.2"]).unwrap();
        match args.command {
            SubCommand::Profile(opts) => {
                assert_eq!(opts.length, surf::DEFAULT_PROFILE_LENGTH);
                assert!(opts.seed.is_none());
            },
            _ => panic!("expected the profile command"),
        }
    }

    #[test]
    fn zero_field_size_is_rejected() {
        assert!(CliArgs::try_parse_from(["roughscat", "field", "--ra", "1", "--size", "0"]).is_err());
    }
}
