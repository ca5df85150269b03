// src/error.rs
use thiserror::Error;

/// Error type for the bsm-greeks library
///
/// Every failure is an invalid input: the engine validates up front and never
/// lets a bad value turn into `NaN` or `Infinity` further down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BsmError {
    /// A parameter violated its constraint
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: String,
        constraint: String,
    },
}

impl BsmError {
    pub fn invalid_parameter(
        parameter: &str,
        value: impl ToString,
        constraint: impl Into<String>,
    ) -> Self {
        BsmError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Name of the offending input field, for placing the message next to it
    pub fn parameter(&self) -> &str {
        match self {
            BsmError::InvalidParameter { parameter, .. } => parameter,
        }
    }
}

/// Result type alias for bsm-greeks operations
pub type BsmResult<T> = Result<T, BsmError>;

/// Validation utilities
pub mod validation {
    use super::{BsmError, BsmResult};

    /// Largest grid a single sweep may request
    pub const MAX_POINT_COUNT: usize = 1_000_000;

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> BsmResult<()> {
        if !value.is_finite() {
            Err(BsmError::invalid_parameter(
                name,
                value,
                "must be finite (not NaN or infinite)",
            ))
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> BsmResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(BsmError::invalid_parameter(
                name,
                value,
                "must be positive (> 0)",
            ))
        } else {
            Ok(())
        }
    }

    /// Validate a sweep point count
    pub fn validate_point_count(point_count: usize) -> BsmResult<()> {
        if point_count < 2 {
            Err(BsmError::invalid_parameter(
                "point_count",
                point_count,
                "must be at least 2",
            ))
        } else if point_count > MAX_POINT_COUNT {
            Err(BsmError::invalid_parameter(
                "point_count",
                point_count,
                format!("exceeds maximum allowed ({})", MAX_POINT_COUNT),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate a relative width strictly inside (0, 1)
    pub fn validate_width(name: &str, width: f64) -> BsmResult<()> {
        validate_finite(name, width)?;
        if width <= 0.0 || width >= 1.0 {
            Err(BsmError::invalid_parameter(
                name,
                width,
                "must be in range (0, 1)",
            ))
        } else {
            Ok(())
        }
    }
}
