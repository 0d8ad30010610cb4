use std::path::PathBuf;

/// Failures of the command line front-end, carried as the source of a
/// [`base::error::RoughscatError`].
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("System configuration directory not found")]
    SysConfigDirNotFound,

    #[error("Configuration file {0} not found")]
    UserConfigNotFound(PathBuf),

    #[error("Invalid output path {0}")]
    InvalidOutputPath(PathBuf),

    #[error("Failed to parse the configuration: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
