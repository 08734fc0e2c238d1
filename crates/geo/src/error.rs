//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors raised while ingesting location data.
///
/// The distance arithmetic itself never fails; these only come out of the
/// parsing and validation done when rows enter the crate.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid WKT format
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A required field is absent from a row
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A row field has the wrong shape
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Numeric error codes, 10xxx range.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid WKT format
    InvalidWkt = 10001,
    /// Invalid coordinate values
    InvalidCoordinate = 10002,
    /// JSON parsing error
    JsonParsing = 10003,
    /// Missing row field
    MissingField = 10004,
    /// Malformed row field
    InvalidValue = 10005,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidWkt(_) => GeoErrorCode::InvalidWkt,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::MissingField(_) => GeoErrorCode::MissingField,
            GeoError::InvalidValue(_) => GeoErrorCode::InvalidValue,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }
}
