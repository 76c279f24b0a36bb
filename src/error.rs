//! Construction-time error types

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while building a configuration object.
///
/// All of these are raised at construction time, so a config object can never
/// be observed in an invalid state.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parameter '{0}' must be a finite positive number, got {1}")]
    NonPositive(&'static str, f64),

    #[error("Parameter '{0}' must be a finite non-negative number, got {1}")]
    Negative(&'static str, f64),

    #[error("A holonomic drivetrain requires at least 2 module locations, got {0}")]
    TooFewModules(usize),

    #[error("Module geometry is degenerate, cannot invert the kinematics: {0}")]
    DegenerateGeometry(&'static str),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Check that a parameter is finite and strictly positive.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive(name, value))
    }
}

/// Check that a parameter is finite and non-negative.
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative(name, value))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
