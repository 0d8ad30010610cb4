use crate::app::{
    cli::{ansi, SurfaceArgs},
    Config,
};
use base::{error::RoughscatError, units::Degrees};
use bxdf::{
    engine::{self, angular_domain, AngularDomain},
    io, Material, ScatteringModel, ScatteringRegime, SurfaceParameters,
};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[clap(about = "Simulates the light scattered by a rough metallic surface.")]
pub struct SimulateOptions {
    #[command(flatten)]
    pub surface: SurfaceArgs,

    /// Scattering model.
    #[arg(short, long, value_enum, default_value = "auto")]
    pub model: ScatteringModel,

    /// Material of the surface. If not specified, the material of the
    /// configuration is used.
    #[arg(long)]
    pub material: Option<Material>,

    /// Reflectivity of the surface, peak of the distribution. If not
    /// specified, the configured or nominal reflectivity of the material is
    /// used.
    #[arg(short, long)]
    pub reflectivity: Option<f64>,

    /// Multiplier on the microfacet slope width.
    #[arg(short, long)]
    pub slope_factor: Option<f64>,

    /// Angular step between two observation angles.
    #[arg(long)]
    pub resolution: Option<Degrees>,

    #[clap(
        long,
        allow_hyphen_values = true,
        help = "Observation angles in the form \"start .. =stop / step\".\nOverrides \
                --resolution. [default: -90 .. =90 / resolution]"
    )]
    pub domain: Option<AngularDomain>,

    /// File to export the distribution to. If it is a directory, a
    /// time-stamped file is created inside. If not specified, the table is
    /// printed to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SimulateOptions {
    /// Surface parameters, completed with the configuration.
    pub fn parameters(&self, config: &Config) -> SurfaceParameters {
        let user = config.user();
        let material = self.material.clone().unwrap_or_else(|| user.material.clone());
        SurfaceParameters {
            ra: self.surface.ra,
            wavelength: self.surface.wavelength_or(config),
            incident_angle: self.surface.incident_angle,
            model: self.model,
            reflectivity: self
                .reflectivity
                .unwrap_or_else(|| user.reflectivity_of(&material)),
            slope_factor: self.slope_factor.unwrap_or(user.slope_factor),
            material,
        }
    }

    /// Observation angles, completed with the configuration.
    pub fn domain(&self, config: &Config) -> AngularDomain {
        self.domain.unwrap_or_else(|| {
            angular_domain(self.resolution.unwrap_or(config.user().resolution))
        })
    }
}

fn validate_domain(domain: &AngularDomain) -> Result<(), RoughscatError> {
    let step = domain.step_size.value();
    if !step.is_finite() || step <= 0.0 {
        return Err(RoughscatError::invalid_parameter(format!(
            "Angular step must be positive, got {}",
            domain.step_size
        )));
    }
    if domain.stop.value() < domain.start.value() {
        return Err(RoughscatError::invalid_parameter(format!(
            "Angular domain {} is reversed",
            domain
        )));
    }
    Ok(())
}

pub fn simulate(opts: SimulateOptions, config: Config) -> Result<(), RoughscatError> {
    let params = opts.parameters(&config);
    let domain = opts.domain(&config);
    params.validate()?;
    validate_domain(&domain)?;

    let start = std::time::Instant::now();
    let dist = engine::simulate(&params, &domain);
    log::info!(
        "Simulated {} samples in {} ms",
        dist.len(),
        start.elapsed().as_millis()
    );
    let stats = dist.energy_concentration();

    match &opts.output {
        Some(output) => {
            let path = config.resolve_output_file(output, "roughscat")?;
            io::write_export_file(&path, &params, &dist)?;
            println!(
                "{} Exported {} samples to {}",
                ansi::CYAN_CHECK,
                dist.len(),
                path.display()
            );
        },
        None => io::write_table(std::io::stdout().lock(), &dist.samples)?,
    }

    let peak = dist
        .peak()
        .map_or(0.0, |sample| sample.intensity);
    eprintln!(
        "{} {} on {}{}",
        ansi::YELLOW_GT,
        dist.model,
        params.material,
        if params.model.is_auto() {
            " (selected from the phase parameter)"
        } else {
            ""
        }
    );
    eprintln!(
        "  {} phase parameter g: {} ({})",
        ansi::CYAN_MINUS,
        dist.phase,
        ScatteringRegime::classify(dist.phase)
    );
    eprintln!("  {} peak intensity: {}", ansi::CYAN_MINUS, peak);
    eprintln!(
        "  {} energy: {}{}{}",
        ansi::CYAN_MINUS,
        ansi::BRIGHT_YELLOW,
        stats,
        ansi::RESET
    );
    Ok(())
}
