use crate::{
    app::{
        cli::{ansi, rng_from_seed},
        Config,
    },
    error::RuntimeError,
};
use base::{error::RoughscatError, units::Micrometres};
use std::{io::Write, path::PathBuf};
use surf::{HeightField, DEFAULT_FIELD_SIZE};

#[derive(clap::Args, Debug)]
#[clap(about = "Generates a smoothed 2-D height field.")]
pub struct FieldOptions {
    /// Arithmetic mean roughness Ra. A bare number is read in micrometres.
    #[arg(long)]
    pub ra: Micrometres,

    /// Number of samples along each side of the field.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_FIELD_SIZE,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub size: usize,

    /// Seed of the random generator. If not specified, every run produces a
    /// different field.
    #[arg(long)]
    pub seed: Option<u64>,

    /// File to write the heights to, one row of the field per line. If not
    /// specified, only the statistics of the field are printed.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn write_field<W: Write>(writer: W, field: &HeightField) -> Result<(), RuntimeError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for row in field.rows_iter() {
        wtr.write_record(row.iter().map(|h| h.to_string()))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn field(opts: FieldOptions, config: Config) -> Result<(), RoughscatError> {
    let mut rng = rng_from_seed(opts.seed);
    let field = HeightField::generate(opts.ra, opts.size, &mut *rng);
    println!(
        "{} {}x{} height field of Ra = {}",
        ansi::YELLOW_GT,
        field.rows,
        field.cols,
        opts.ra
    );
    println!("  {} height range: [{}, {}] um", ansi::CYAN_MINUS, field.min, field.max);
    println!("  {} mean height: {} um", ansi::CYAN_MINUS, field.mean_height());
    println!("  {} rms height: {} um", ansi::CYAN_MINUS, field.rms_height());
    if let Some(output) = &opts.output {
        let path = config.resolve_output_file(output, "field")?;
        let file = std::fs::File::create(&path).map_err(|err| {
            RoughscatError::from_io_error(err, format!("Failed to create {}", path.display()))
        })?;
        write_field(std::io::BufWriter::new(file), &field).map_err(|err| {
            RoughscatError::new("Failed to write the height field.", Some(Box::new(err)))
        })?;
        println!(
            "{} Wrote {} samples to {}",
            ansi::CYAN_CHECK,
            field.samples_count(),
            path.display()
        );
    }
    Ok(())
}
