//! Tabular export of scattering distributions.
//!
//! An export starts with a preamble of `#` comment lines describing the
//! surface and the simulation, followed by a two-column CSV table:
//!
//! ```text
//! # Material: Gold
//! # Roughness Ra: 0.8 um
//! ...
//! angle,intensity
//! -90,0.0000001234
//! ```
//!
//! Intensities are written in their shortest round-trip form, so reading the
//! table back yields exactly the samples that were written.
use crate::{
    engine::{AngularDomain, ScatteringDistribution, ScatteringSample},
    model::ModelKind,
    params::{Material, SurfaceParameters},
};
use base::{
    error::RoughscatError,
    units::{Degrees, Micrometres},
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

/// Description of the simulation written before the table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportHeader {
    /// Material of the surface.
    pub material: Material,
    /// Arithmetic mean roughness.
    pub ra: Micrometres,
    /// Wavelength of the incident light.
    pub wavelength: Micrometres,
    /// Incident angle.
    pub incident_angle: Degrees,
    /// Model that produced the distribution.
    pub model: ModelKind,
    /// Reflectivity, peak of the distribution.
    pub reflectivity: f64,
    /// Slope factor.
    pub slope_factor: f64,
    /// Phase parameter.
    pub phase: f64,
    /// Angles of the samples.
    pub domain: AngularDomain,
}

const KEY_MATERIAL: &str = "Material";
const KEY_RA: &str = "Roughness Ra";
const KEY_WAVELENGTH: &str = "Wavelength";
const KEY_INCIDENT: &str = "Incident angle";
const KEY_MODEL: &str = "Model";
const KEY_REFLECTIVITY: &str = "Reflectivity";
const KEY_SLOPE_FACTOR: &str = "Slope factor";
const KEY_PHASE: &str = "Phase parameter g";
const KEY_RESOLUTION: &str = "Angular resolution";
const KEY_DOMAIN: &str = "Angular domain";

#[derive(Debug, Serialize, Deserialize)]
struct Row {
    angle: f64,
    intensity: f64,
}

impl ExportHeader {
    /// Collects the header of the distribution simulated from `params`.
    pub fn new(params: &SurfaceParameters, dist: &ScatteringDistribution) -> Self {
        Self {
            material: params.material.clone(),
            ra: params.ra,
            wavelength: params.wavelength,
            incident_angle: params.incident_angle,
            model: dist.model,
            reflectivity: params.reflectivity,
            slope_factor: params.slope_factor,
            phase: dist.phase,
            domain: dist.domain,
        }
    }

    /// Writes the header as `# Key: value` lines.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# {}: {}", KEY_MATERIAL, self.material)?;
        writeln!(writer, "# {}: {}", KEY_RA, self.ra)?;
        writeln!(writer, "# {}: {}", KEY_WAVELENGTH, self.wavelength)?;
        writeln!(writer, "# {}: {}", KEY_INCIDENT, self.incident_angle)?;
        writeln!(writer, "# {}: {}", KEY_MODEL, self.model)?;
        writeln!(writer, "# {}: {}", KEY_REFLECTIVITY, self.reflectivity)?;
        writeln!(writer, "# {}: {}", KEY_SLOPE_FACTOR, self.slope_factor)?;
        writeln!(writer, "# {}: {}", KEY_PHASE, self.phase)?;
        writeln!(writer, "# {}: {}", KEY_RESOLUTION, self.domain.step_size)?;
        writeln!(writer, "# {}: {}", KEY_DOMAIN, self.domain)
    }

    /// Parses the header from the comment lines of an export.
    ///
    /// Lines that are not comments, and comments of unknown keys, are
    /// ignored. The angular resolution, when present, must match the step of
    /// the angular domain.
    pub fn parse(text: &str) -> Result<Self, RoughscatError> {
        let entries = text
            .lines()
            .filter_map(|line| line.trim().strip_prefix('#'))
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim(), value.trim()))
            .collect::<Vec<_>>();
        let field = |key: &str| {
            entries
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .ok_or_else(|| {
                    RoughscatError::new(format!("Missing \"{}\" in export header", key), None)
                })
        };
        let domain: AngularDomain = parse_value(KEY_DOMAIN, field(KEY_DOMAIN)?)?;
        if let Ok(resolution) = field(KEY_RESOLUTION) {
            let resolution: Degrees = parse_value(KEY_RESOLUTION, resolution)?;
            if resolution != domain.step_size {
                return Err(RoughscatError::new(
                    format!(
                        "Angular resolution {} disagrees with the angular domain {}",
                        resolution, domain
                    ),
                    None,
                ));
            }
        }
        Ok(Self {
            material: parse_value(KEY_MATERIAL, field(KEY_MATERIAL)?)?,
            ra: parse_value(KEY_RA, field(KEY_RA)?)?,
            wavelength: parse_value(KEY_WAVELENGTH, field(KEY_WAVELENGTH)?)?,
            incident_angle: parse_value(KEY_INCIDENT, field(KEY_INCIDENT)?)?,
            model: parse_value(KEY_MODEL, field(KEY_MODEL)?)?,
            reflectivity: parse_value(KEY_REFLECTIVITY, field(KEY_REFLECTIVITY)?)?,
            slope_factor: parse_value(KEY_SLOPE_FACTOR, field(KEY_SLOPE_FACTOR)?)?,
            phase: parse_value(KEY_PHASE, field(KEY_PHASE)?)?,
            domain,
        })
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, RoughscatError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse::<T>().map_err(|err| {
        RoughscatError::new(
            format!("Invalid value \"{}\" for \"{}\" in export header: {}", value, key, err),
            None,
        )
    })
}

fn csv_error(err: csv::Error, message: &str) -> RoughscatError {
    RoughscatError::new(message, Some(Box::new(err)))
}

/// Writes the header and the table of `dist`.
pub fn write_export<W: Write>(
    mut writer: W,
    params: &SurfaceParameters,
    dist: &ScatteringDistribution,
) -> Result<(), RoughscatError> {
    ExportHeader::new(params, dist)
        .write_to(&mut writer)
        .map_err(|err| RoughscatError::from_io_error(err, "Failed to write export header"))?;
    write_table(writer, &dist.samples)
}

/// Writes the `angle,intensity` table without any header.
pub fn write_table<W: Write>(writer: W, samples: &[ScatteringSample]) -> Result<(), RoughscatError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for sample in samples {
        wtr.serialize(Row {
            angle: sample.angle.value(),
            intensity: sample.intensity,
        })
        .map_err(|err| csv_error(err, "Failed to write scattering sample"))?;
    }
    wtr.flush()
        .map_err(|err| RoughscatError::from_io_error(err, "Failed to flush export"))
}

/// Writes an export to a file, creating or truncating it.
pub fn write_export_file(
    path: &Path,
    params: &SurfaceParameters,
    dist: &ScatteringDistribution,
) -> Result<(), RoughscatError> {
    let file = std::fs::File::create(path).map_err(|err| {
        RoughscatError::from_io_error(err, format!("Failed to create {}", path.display()))
    })?;
    write_export(std::io::BufWriter::new(file), params, dist)?;
    log::info!("Exported {} samples to {}", dist.len(), path.display());
    Ok(())
}

/// Reads the `angle,intensity` table of an export, skipping comment lines.
pub fn read_table<R: Read>(reader: R) -> Result<Vec<ScatteringSample>, RoughscatError> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);
    let samples = rdr
        .deserialize::<Row>()
        .map(|row| {
            row.map(|row| ScatteringSample {
                angle: Degrees::new(row.angle),
                intensity: row.intensity,
            })
            .map_err(|err| csv_error(err, "Failed to read scattering sample"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::trace!("Read {} scattering samples", samples.len());
    Ok(samples)
}

/// Reads both the header and the table of an export.
pub fn read_export<R: Read>(
    mut reader: R,
) -> Result<(ExportHeader, Vec<ScatteringSample>), RoughscatError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|err| RoughscatError::from_io_error(err, "Failed to read export"))?;
    let header = ExportHeader::parse(&text)?;
    let samples = read_table(text.as_bytes())?;
    Ok((header, samples))
}

/// Reads an export from a file.
pub fn read_export_file(
    path: &Path,
) -> Result<(ExportHeader, Vec<ScatteringSample>), RoughscatError> {
    let file = std::fs::File::open(path).map_err(|err| {
        RoughscatError::from_io_error(err, format!("Failed to open {}", path.display()))
    })?;
    read_export(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::simulate, model::ScatteringModel};
    use base::{deg, um};

    fn gold_surface() -> SurfaceParameters {
        SurfaceParameters {
            material: Material::Gold,
            ra: um!(0.05),
            wavelength: um!(0.633),
            incident_angle: deg!(20.0),
            model: ScatteringModel::Auto,
            reflectivity: Material::Gold.nominal_reflectivity(),
            slope_factor: 1.5,
        }
    }

    #[test]
    fn export_round_trip() {
        let params = gold_surface();
        let dist = simulate(&params, &crate::engine::angular_domain(deg!(0.25)));
        let mut buf = Vec::new();
        write_export(&mut buf, &params, &dist).unwrap();

        let (header, samples) = read_export(buf.as_slice()).unwrap();
        assert_eq!(samples.len(), dist.len());
        for (read, written) in samples.iter().zip(dist.samples.iter()) {
            assert_eq!(read.angle.value().to_bits(), written.angle.value().to_bits());
            assert_eq!(read.intensity.to_bits(), written.intensity.to_bits());
        }
        assert_eq!(header, ExportHeader::new(&params, &dist));
    }

    #[test]
    fn preamble_lists_the_simulation() {
        let params = gold_surface();
        let dist = simulate(&params, &crate::engine::DEFAULT_ANGULAR_DOMAIN);
        let mut buf = Vec::new();
        write_export(&mut buf, &params, &dist).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("# Material: Gold"));
        assert_eq!(lines.next(), Some("# Roughness Ra: 0.05 um"));
        assert!(text.contains(&format!("# Model: {}", dist.model)));
        assert!(text.contains("# Angular resolution: 1 deg"));
        assert!(text.contains("\nangle,intensity\n"));
    }

    #[test]
    fn table_without_preamble() {
        let table = "angle,intensity\n-1,0.5\n0,0.9\n1,0.5\n";
        let samples = read_table(table.as_bytes()).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1].angle, deg!(0.0));
        assert_eq!(samples[1].intensity, 0.9);
        assert!(ExportHeader::parse(table).is_err());
    }

    #[test]
    fn export_file_round_trip() {
        let params = gold_surface();
        let dist = simulate(&params, &crate::engine::DEFAULT_ANGULAR_DOMAIN);
        let path = std::env::temp_dir().join(format!(
            "roughscat-export-{}.csv",
            std::process::id()
        ));
        write_export_file(&path, &params, &dist).unwrap();
        let read = read_export_file(&path);
        std::fs::remove_file(&path).unwrap();

        let (header, samples) = read.unwrap();
        assert_eq!(header.domain, dist.domain);
        assert_eq!(header.model, dist.model);
        assert_eq!(samples, dist.samples);
        assert!(read_export_file(&path).is_err());
    }

    #[test]
    fn resolution_must_match_domain() {
        let params = gold_surface();
        let dist = simulate(&params, &crate::engine::DEFAULT_ANGULAR_DOMAIN);
        let mut buf = Vec::new();
        write_export(&mut buf, &params, &dist).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(ExportHeader::parse(&text).is_ok());

        let tampered = text.replace("# Angular resolution: 1 deg", "# Angular resolution: 2 deg");
        assert_ne!(tampered, text);
        assert!(ExportHeader::parse(&tampered).is_err());

        let without = text.replace("# Angular resolution: 1 deg\n", "");
        assert_eq!(ExportHeader::parse(&without).unwrap().domain, dist.domain);
    }

    #[test]
    fn malformed_table_is_an_error() {
        let table = "angle,intensity\n-1,bright\n";
        assert!(read_table(table.as_bytes()).is_err());
    }
}
