use crate::error::RuntimeError;
use base::{
    error::RoughscatError,
    units::{Degrees, Micrometres},
};
use bxdf::{params::SurfaceParameters, Material};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Name of the user configuration file.
pub const CONFIG_FILE_NAME: &str = "roughscat.toml";

/// Roughscat configuration.
#[derive(Debug)]
pub struct Config {
    /// Path to the configuration directory.
    pub(crate) sys_config_dir: PathBuf,

    /// Current working directory (where the user started the program).
    /// CWD will be used in case [`UserConfig::output_dir`] is not defined.
    pub(crate) cwd: PathBuf,

    /// File the user configuration has been loaded from, if any.
    pub(crate) source: Option<PathBuf>,

    /// User-defined configuration.
    pub(crate) user: UserConfig,
}

/// Options configured by user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Path to the user-defined output directory.
    /// If not set, the current working directory is used.
    pub output_dir: Option<PathBuf>,

    /// Material used when none is given on the command line.
    pub material: Material,

    /// Wavelength used when none is given on the command line.
    pub wavelength: Micrometres,

    /// Angular step of the simulations.
    pub resolution: Degrees,

    /// Reflectivity used when none is given on the command line. If not set,
    /// the nominal reflectivity of the material is used.
    pub reflectivity: Option<f64>,

    /// Slope factor used when none is given on the command line.
    pub slope_factor: f64,
}

impl Default for UserConfig {
    fn default() -> Self {
        let params = SurfaceParameters::default();
        Self {
            output_dir: None,
            material: params.material,
            wavelength: params.wavelength,
            resolution: Degrees::new(1.0),
            reflectivity: None,
            slope_factor: params.slope_factor,
        }
    }
}

impl UserConfig {
    /// Load [`UserConfig`] from a .toml file.
    pub fn load(path: &Path) -> Result<Self, RoughscatError> {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let string = std::fs::read_to_string(path).map_err(|err| {
            RoughscatError::from_io_error(
                err,
                format!("Failed to read user configuration file: {}", path.display()),
            )
        })?;
        let mut config = Self::parse(&string).map_err(|err| {
            RoughscatError::new(
                format!(
                    "Failed to parse user configuration file: {}",
                    path.display()
                ),
                Some(Box::new(err)),
            )
        })?;
        if let Some(output_dir) = config.output_dir {
            config.output_dir = Some(canonicalize_path(base, &output_dir));
        }
        log::info!("    - User output directory: {:?}", config.output_dir);
        log::info!("    - Material: {}", config.material);
        log::info!("    - Wavelength: {}", config.wavelength);
        log::info!("    - Resolution: {}", config.resolution);
        Ok(config)
    }

    /// Parses the configuration from the content of a .toml file.
    pub fn parse(string: &str) -> Result<Self, RuntimeError> { Ok(toml::from_str(string)?) }

    /// Reflectivity to use for the given material.
    pub fn reflectivity_of(&self, material: &Material) -> f64 {
        self.reflectivity
            .unwrap_or_else(|| material.nominal_reflectivity())
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// This function accepts a file path to the user-defined configuration
    /// file. If it's not set, the function tries to load the user-defined
    /// configuration from the current working directory (named as
    /// roughscat.toml). If the file doesn't exist, the function tries the
    /// configuration folder. If this file doesn't exist either, the built-in
    /// defaults are used.
    ///
    /// # Default configuration directory
    ///
    /// + On *nix system: "$XDG_CONFIG_HOME" or "$HOME/.config"
    ///
    /// + On windows system: `%APPDATA%` which is usually
    ///   "C:\Users\username\AppData\Roaming"
    ///
    /// + On macos system: "$HOME/Library/Application Support"
    pub fn load_config(filepath: Option<&Path>) -> Result<Self, RoughscatError> {
        log::info!("Loading configurations...");
        let sys_config_dir = {
            let mut config_dir = dirs::config_dir().ok_or(RoughscatError::new(
                "System configuration directory not found.",
                Some(Box::new(RuntimeError::SysConfigDirNotFound)),
            ))?;
            config_dir.push("roughscat");
            config_dir
        };
        log::info!(
            "  - Sys configuration directory: {}",
            sys_config_dir.display()
        );

        let cwd = std::env::current_dir().map_err(|err| {
            RoughscatError::from_io_error(err, "Failed to get current working directory.")
        })?;

        let source = match filepath {
            Some(path) => {
                let path = canonicalize_path(&cwd, path);
                if !path.exists() {
                    return Err(RoughscatError::new(
                        "User specified configuration file not found.",
                        Some(Box::new(RuntimeError::UserConfigNotFound(path))),
                    ));
                }
                log::info!("  Load user specified configuration from {}", path.display());
                Some(path)
            },
            None => [cwd.join(CONFIG_FILE_NAME), sys_config_dir.join(CONFIG_FILE_NAME)]
                .into_iter()
                .find(|path| path.exists()),
        };

        let user = match &source {
            Some(path) => {
                log::info!("  Loading configuration from {}", path.display());
                UserConfig::load(path)?
            },
            None => {
                log::info!("  No configuration file found, using defaults");
                UserConfig::default()
            },
        };

        Ok(Self {
            sys_config_dir,
            cwd,
            source,
            user,
        })
    }

    /// Returns the user configuration.
    pub fn user(&self) -> &UserConfig { &self.user }

    /// Returns the output directory.
    /// If the output directory is not set, the current working directory will
    /// be returned.
    pub fn output_dir(&self) -> &Path {
        self.user
            .output_dir
            .as_ref()
            .map_or(self.cwd.as_path(), |output_dir| output_dir.as_path())
    }

    /// Resolves the path of an output file.
    ///
    /// Relative paths are resolved against the output directory. If `path`
    /// is an existing directory, a time-stamped file named after `prefix` is
    /// placed inside it.
    pub fn resolve_output_file(&self, path: &Path, prefix: &str) -> Result<PathBuf, RoughscatError> {
        let resolved = canonicalize_path(self.output_dir(), path);
        let resolved = if resolved.is_dir() {
            resolved.join(format!(
                "{}_{}.csv",
                prefix,
                base::utils::iso_timestamp_short(chrono::Local::now())
            ))
        } else {
            resolved
        };
        match resolved.parent() {
            Some(parent) if parent.as_os_str().is_empty() || parent.is_dir() => Ok(resolved),
            _ => Err(RoughscatError::new(
                "Output directory does not exist.",
                Some(Box::new(RuntimeError::InvalidOutputPath(resolved))),
            )),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  - sys config dir: {}", self.sys_config_dir.display())?;
        match &self.source {
            Some(path) => writeln!(f, "  - loaded from: {}", path.display())?,
            None => writeln!(f, "  - loaded from: built-in defaults")?,
        }
        writeln!(f, "  - output dir: {}", self.output_dir().display())?;
        writeln!(f, "  - material: {}", self.user.material)?;
        writeln!(f, "  - wavelength: {}", self.user.wavelength)?;
        writeln!(f, "  - resolution: {}", self.user.resolution.prettified())?;
        match self.user.reflectivity {
            Some(r) => writeln!(f, "  - reflectivity: {}", r)?,
            None => writeln!(f, "  - reflectivity: nominal value of the material")?,
        }
        write!(f, "  - slope factor: {}", self.user.slope_factor)
    }
}

/// Returns the absolute path of `path`.
///
/// + `path` starting with `~` is resolved against the home directory.
/// + relative `path` is resolved against `base`.
/// + absolute `path` is returned as is.
pub(crate) fn canonicalize_path(base: &Path, path: &Path) -> PathBuf {
    log::trace!(
        "Canonicalizing path: base={}, path={}",
        base.display(),
        path.display()
    );
    let resolved = match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(stripped), Some(home)) => home.join(stripped),
        _ if path.is_absolute() => path.to_path_buf(),
        _ => base.join(path),
    };
    resolved.canonicalize().unwrap_or(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::{deg, um};

    #[test]
    fn partial_config_uses_defaults() {
        let config = UserConfig::parse("wavelength = \"0.633 um\"\nmaterial = \"gold\"\n").unwrap();
        assert_eq!(config.wavelength, um!(0.633));
        assert_eq!(config.material, Material::Gold);
        assert_eq!(config.resolution, deg!(1.0));
        assert_eq!(config.reflectivity_of(&config.material), 0.80);
    }

    #[test]
    fn material_names_resolve_to_presets() {
        let config = UserConfig::parse("material = \"Gold\"\n").unwrap();
        assert_eq!(config.material, Material::Gold);
        assert_eq!(config.reflectivity_of(&config.material), 0.80);

        let config = UserConfig::parse("material = \"aluminum\"\n").unwrap();
        assert_eq!(config.material, Material::Aluminium);

        let config = UserConfig::parse("material = \"CU\"\n").unwrap();
        assert_eq!(config.material, Material::Copper);

        let config = UserConfig::parse("material = \"Brass\"\n").unwrap();
        assert_eq!(config.material, Material::Custom(String::from("Brass")));
        assert_eq!(config.reflectivity_of(&config.material), 0.9);

        assert!(UserConfig::parse("material = \"\"\n").is_err());
    }

    #[test]
    fn presets_serialise_to_their_display_name() {
        for material in Material::PRESETS {
            let config = UserConfig {
                material: material.clone(),
                ..Default::default()
            };
            let string = toml::to_string(&config).unwrap();
            assert!(string.contains(&format!("material = \"{}\"", material)));
            assert_eq!(UserConfig::parse(&string).unwrap().material, material);
        }
    }

    #[test]
    fn numbers_are_accepted_for_quantities() {
        let config = UserConfig::parse("resolution = 0.1\nreflectivity = 0.5\n").unwrap();
        assert_eq!(config.resolution, deg!(0.1));
        assert_eq!(config.reflectivity_of(&Material::Silver), 0.5);
    }

    #[test]
    fn config_round_trip() {
        let config = UserConfig {
            output_dir: Some(PathBuf::from("/tmp/roughscat")),
            material: Material::Custom(String::from("Brass")),
            reflectivity: Some(0.7),
            ..Default::default()
        };
        let string = toml::to_string(&config).unwrap();
        assert_eq!(UserConfig::parse(&string).unwrap(), config);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(UserConfig::parse("slope_factor = \"steep\"").is_err());
    }

    #[test]
    fn relative_paths_are_resolved_against_base() {
        let base = PathBuf::from("/nonexistent/base");
        assert_eq!(
            canonicalize_path(&base, Path::new("out.csv")),
            PathBuf::from("/nonexistent/base/out.csv")
        );
        assert_eq!(
            canonicalize_path(&base, Path::new("/abs/out.csv")),
            PathBuf::from("/abs/out.csv")
        );
    }
}
