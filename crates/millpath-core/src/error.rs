//! Error handling for MillPath
//!
//! Provides the error types shared by every motion generator:
//! - Parameter errors (missing, conflicting or out-of-range configuration)
//! - Geometry errors (degenerate input geometry)
//! - Serialization errors (parameter sets loaded from JSON)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Non-fatal conditions (unknown pocketing selection, inconsistent slicing
//! state) are never returned as errors; they are reported through a
//! diagnostic sink instead.

use thiserror::Error;

/// Errors related to generator parameter validation.
///
/// These are always fatal for the call that received them and are surfaced
/// synchronously to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A required parameter is missing.
    #[error("Missing required parameter: {0}")]
    Missing(String),

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
        /// Lower bound of the valid range.
        min: f64,
        /// Upper bound of the valid range.
        max: f64,
    },

    /// An enumerated value (milling style, direction, ...) is not recognized.
    #[error("Unknown {kind}: {value}")]
    UnknownVariant {
        /// The enumeration that was being parsed.
        kind: &'static str,
        /// The unrecognized input.
        value: String,
    },
}

/// Errors raised by geometry operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A polygon needs more points than it was given.
    #[error("Polygon needs at least {required} points, got {actual}")]
    TooFewPoints {
        /// Minimum number of points.
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },
}

/// Top-level error type for motion generation.
#[derive(Error, Debug)]
pub enum MotionError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// A geometry error occurred.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MotionError {
    /// Returns true for errors caused by invalid caller configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Parameter(_) | Self::Serialization(_))
    }
}

/// Result type alias for motion generation.
pub type MotionResult<T> = Result<T, MotionError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
