use crate::app::{
    args::{PrintInfoKind, PrintInfoOptions},
    cli::ansi,
    Config,
};
use base::error::RoughscatError;
use bxdf::{
    engine::DEFAULT_ANGULAR_DOMAIN,
    params::{RA_PRACTICAL_RANGE, WAVELENGTH_PRACTICAL_RANGE},
    Material, SurfaceParameters,
};

/// Prints roughscat's current configurations.
pub fn print_info(opts: PrintInfoOptions, config: Config) -> Result<(), RoughscatError> {
    let kinds = match opts.kind {
        Some(kind) => vec![kind],
        None => vec![
            PrintInfoKind::Config,
            PrintInfoKind::Defaults,
            PrintInfoKind::Materials,
        ],
    };
    for kind in kinds {
        match kind {
            PrintInfoKind::Config => println!("{}", config),
            PrintInfoKind::Defaults => {
                let params = SurfaceParameters::default();
                println!("Default surface parameters:");
                println!("  {} material: {}", ansi::CYAN_MINUS, params.material);
                println!(
                    "  {} Ra: {} (practical range [{}, {}] um)",
                    ansi::CYAN_MINUS,
                    params.ra,
                    RA_PRACTICAL_RANGE.0,
                    RA_PRACTICAL_RANGE.1
                );
                println!(
                    "  {} wavelength: {} (practical range [{}, {}] um)",
                    ansi::CYAN_MINUS,
                    params.wavelength,
                    WAVELENGTH_PRACTICAL_RANGE.0,
                    WAVELENGTH_PRACTICAL_RANGE.1
                );
                println!(
                    "  {} incident angle: {}",
                    ansi::CYAN_MINUS,
                    params.incident_angle.prettified()
                );
                println!("  {} model: {}", ansi::CYAN_MINUS, params.model);
                println!("  {} reflectivity: {}", ansi::CYAN_MINUS, params.reflectivity);
                println!("  {} slope factor: {}", ansi::CYAN_MINUS, params.slope_factor);
                println!("  {} domain: {}", ansi::CYAN_MINUS, DEFAULT_ANGULAR_DOMAIN);
            },
            PrintInfoKind::Materials => {
                println!("Material presets (nominal reflectivity):");
                for material in Material::PRESETS {
                    println!(
                        "  {} {:<10} {}",
                        ansi::CYAN_MINUS,
                        material.to_string(),
                        material.nominal_reflectivity()
                    );
                }
            },
        }
    }
    Ok(())
}
