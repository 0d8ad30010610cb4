//! Error type for roughscat.

use std::{
    error::Error,
    fmt::{Debug, Display, Formatter},
};

/// Custom error type for roughscat.
///
/// Carries a human readable message and, optionally, the error that caused
/// it. Numerical code never produces this error; it only appears at the
/// boundaries (files, configuration, user supplied parameters).
#[derive(Debug)]
pub struct RoughscatError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl Display for RoughscatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(cause) => write!(f, "{}, caused by {}", self.message, cause),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for RoughscatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err.as_ref() as &(dyn Error + 'static))
    }
}

impl RoughscatError {
    /// Creates a new error.
    pub fn new<S>(message: S, source: Option<Box<dyn Error + Send + Sync>>) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            source,
        }
    }

    /// Creates a new error from a `std::io::Error`.
    pub fn from_io_error<S>(err: std::io::Error, message: S) -> Self
    where
        S: Into<String>,
    {
        Self::new(message, Some(Box::new(err)))
    }

    /// Creates an error describing a parameter outside its accepted range.
    pub fn invalid_parameter<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self::new(message, None)
    }

    /// Returns the message of the error, without its cause.
    pub fn message(&self) -> &str { &self.message }
}
