use crate::app::{
    cli::{ansi, SurfaceArgs},
    Config,
};
use base::error::RoughscatError;
use bxdf::{
    model::{phase_parameter, ROUGH_REGIME_THRESHOLD, SMOOTH_REGIME_THRESHOLD},
    ScatteringRegime,
};

#[derive(clap::Args, Debug)]
#[clap(about = "Computes the phase parameter of a surface and the model it calls for.")]
pub struct ClassifyOptions {
    #[command(flatten)]
    pub surface: SurfaceArgs,
}

pub fn classify(opts: ClassifyOptions, config: Config) -> Result<(), RoughscatError> {
    let wavelength = opts.surface.wavelength_or(&config);
    let g = phase_parameter(opts.surface.ra, wavelength, opts.surface.incident_angle);
    let regime = ScatteringRegime::classify(g);
    log::debug!("g = {} -> {}", g, regime);
    println!(
        "{} Ra = {}, λ = {}, θi = {}",
        ansi::YELLOW_GT,
        opts.surface.ra,
        wavelength,
        opts.surface.incident_angle.prettified()
    );
    println!("  {} phase parameter g: {}", ansi::CYAN_MINUS, g);
    println!(
        "  {} regime: {} (smooth below {}, rough above {})",
        ansi::CYAN_MINUS,
        regime,
        SMOOTH_REGIME_THRESHOLD,
        ROUGH_REGIME_THRESHOLD
    );
    println!(
        "  {} model: {}{}{}",
        ansi::CYAN_MINUS,
        ansi::BRIGHT_CYAN,
        regime.model(),
        ansi::RESET
    );
    Ok(())
}
