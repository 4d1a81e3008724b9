//! Error types for the library layer.

use thiserror::Error;

/// Why fetching a year of holidays failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The API rejected the year with a non-success status.
    #[error("The year: {year} is not supported (HTTP {status})")]
    InvalidYear { year: String, status: u16 },
    /// Transport failure, timeout, or a body that did not parse.
    #[error("Request for {year} failed: {reason}")]
    Network { year: String, reason: String },
}

impl FetchError {
    /// The year the failed request was for.
    pub fn year(&self) -> &str {
        match self {
            Self::InvalidYear { year, .. } | Self::Network { year, .. } => year,
        }
    }
}

/// The controller task has stopped and no longer accepts commands.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Acquisition controller is no longer running")]
pub struct ControllerClosed;

/// An environment variable held a value that could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} names no Canadian province or territory: '{value}'")]
    UnknownProvince { var: &'static str, value: String },
}
