//! Configuration error types.
//!
//! Runtime interaction never fails: every precondition failure is an ignored
//! no-op. Only bad configuration is an error, reported at startup.

use std::fmt;

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero, negative, NaN or infinite.
    NonPositiveThreshold {
        /// Name of the setting.
        name: &'static str,
        value: f64,
    },
    /// A magnitude that must not be negative was negative, NaN or infinite.
    NegativeValue { name: &'static str, value: f64 },
    /// A finite value too large for the range it spans.
    OutOfRange { name: &'static str, value: f64 },
    /// The configuration document could not be parsed.
    InvalidJson(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveThreshold { name, value } => {
                write!(f, "`{name}` must be greater than zero, got {value}")
            }
            ConfigError::NegativeValue { name, value } => {
                write!(f, "`{name}` must not be negative, got {value}")
            }
            ConfigError::OutOfRange { name, value } => {
                write!(f, "`{name}` is too large, got {value}")
            }
            ConfigError::InvalidJson(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Check that `value` is strictly positive and finite (NaN fails).
pub fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveThreshold { name, value })
    }
}

/// Check that `value` is zero or positive and finite (NaN fails).
pub fn require_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NegativeValue { name, value })
    }
}

/// Check that `[-value, value]` is a usable symmetric range: `value` is
/// non-negative and the span `2 * value` is still finite.
pub fn require_symmetric_span(name: &'static str, value: f64) -> Result<(), ConfigError> {
    require_non_negative(name, value)?;
    if (2.0 * value).is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}
