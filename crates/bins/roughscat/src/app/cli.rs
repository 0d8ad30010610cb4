use crate::app::{args::SubCommand, Config};
use base::{
    error::RoughscatError,
    units::{Degrees, Micrometres},
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ANSI color codes.
pub mod ansi {
    pub const BRIGHT_CYAN: &str = "\u{001b}[36m";
    pub const BRIGHT_YELLOW: &str = "\u{001b}[33m";
    pub const RESET: &str = "\u{001b}[0m";

    pub const CYAN_CHECK: &str = "\u{001b}[36m✓\u{001b}[0m";
    pub const YELLOW_GT: &str = "\u{001b}[33m>\u{001b}[0m";
    pub const CYAN_MINUS: &str = "\u{001b}[36m-\u{001b}[0m";
}

mod cmd_classify;
mod cmd_field;
mod cmd_info;
mod cmd_profile;
mod cmd_simulate;

pub use cmd_classify::ClassifyOptions;
pub use cmd_field::FieldOptions;
pub use cmd_profile::ProfileOptions;
pub use cmd_simulate::SimulateOptions;

/// Description of the surface and of the illumination shared by the
/// commands.
#[derive(clap::Args, Debug, Clone)]
pub struct SurfaceArgs {
    /// Arithmetic mean roughness Ra. A bare number is read in micrometres.
    #[arg(long)]
    pub ra: Micrometres,

    /// Wavelength of the incident light. If not specified, the wavelength of
    /// the configuration is used.
    #[arg(short, long)]
    pub wavelength: Option<Micrometres>,

    /// Incident angle, from the surface normal. A bare number is read in
    /// degrees.
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    pub incident_angle: Degrees,
}

impl SurfaceArgs {
    /// Returns the wavelength, falling back to the configuration.
    pub fn wavelength_or(&self, config: &Config) -> Micrometres {
        self.wavelength.unwrap_or(config.user().wavelength)
    }
}

/// Returns the random generator of the surface generators: seeded when a
/// seed is given, the thread-local generator otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    }
}

/// Entry point of roughscat CLI.
pub fn run(cmd: SubCommand, config: Config) -> Result<(), RoughscatError> {
    match cmd {
        SubCommand::Simulate(opts) => cmd_simulate::simulate(opts, config),
        SubCommand::Classify(opts) => cmd_classify::classify(opts, config),
        SubCommand::Profile(opts) => cmd_profile::profile(opts, config),
        SubCommand::Field(opts) => cmd_field::field(opts, config),
        SubCommand::PrintInfo(opts) => cmd_info::print_info(opts, config),
    }
}
