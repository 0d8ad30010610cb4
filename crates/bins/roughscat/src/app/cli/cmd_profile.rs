use crate::{
    app::{
        cli::{ansi, rng_from_seed},
        Config,
    },
    error::RuntimeError,
};
use base::{error::RoughscatError, units::Micrometres};
use std::{io::Write, path::PathBuf};
use surf::{SurfaceProfile, DEFAULT_PROFILE_LENGTH};

#[derive(clap::Args, Debug)]
#[clap(about = "Generates a correlated 1-D height profile.")]
pub struct ProfileOptions {
    /// Arithmetic mean roughness Ra. A bare number is read in micrometres.
    #[arg(long)]
    pub ra: Micrometres,

    /// Number of samples of the profile.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PROFILE_LENGTH,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub length: usize,

    /// Seed of the random generator. If not specified, every run produces a
    /// different profile.
    #[arg(long)]
    pub seed: Option<u64>,

    /// File to write the `index,height` table to. If not specified, the
    /// table is printed to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn write_profile<W: Write>(writer: W, profile: &SurfaceProfile) -> Result<(), RuntimeError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["index", "height"])?;
    for (index, height) in profile.points() {
        wtr.write_record([index.to_string(), height.to_string()])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn profile(opts: ProfileOptions, config: Config) -> Result<(), RoughscatError> {
    let mut rng = rng_from_seed(opts.seed);
    let profile = SurfaceProfile::generate(opts.ra, opts.length, &mut *rng);
    let to_error = |err: RuntimeError| {
        RoughscatError::new("Failed to write the height profile.", Some(Box::new(err)))
    };
    match &opts.output {
        Some(output) => {
            let path = config.resolve_output_file(output, "profile")?;
            let file = std::fs::File::create(&path).map_err(|err| {
                RoughscatError::from_io_error(err, format!("Failed to create {}", path.display()))
            })?;
            write_profile(std::io::BufWriter::new(file), &profile).map_err(to_error)?;
            println!(
                "{} Wrote {} samples to {}",
                ansi::CYAN_CHECK,
                profile.len(),
                path.display()
            );
        },
        None => write_profile(std::io::stdout().lock(), &profile).map_err(to_error)?,
    }
    let (min, max) = profile.min_max().unwrap_or((0.0, 0.0));
    eprintln!("{} profile of Ra = {}", ansi::YELLOW_GT, opts.ra);
    eprintln!("  {} height range: [{}, {}] um", ansi::CYAN_MINUS, min, max);
    eprintln!("  {} mean height: {} um", ansi::CYAN_MINUS, profile.mean_height());
    eprintln!("  {} rms height: {} um", ansi::CYAN_MINUS, profile.rms_height());
    Ok(())
}
