//! # roughscat-base
//! Core library for roughscat.
//! Contains the units, ranges, math helpers and the error type shared by the
//! surface generators, the scattering engine and the command line front-end.
#![warn(missing_docs)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod math;
pub mod range;
pub mod roughness;
pub mod units;

/// Utility functions.
pub mod utils {
    use chrono::{DateTime, Local};

    /// Returns the given time as a timestamp without the timezone and the
    /// colon in the time field, suitable for file names.
    pub fn iso_timestamp_short(datetime: DateTime<Local>) -> String {
        datetime.format("%Y-%m-%dT%H-%M-%S").to_string()
    }
}
