//! Error types for location lookups

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use wanderlust_geo::GeoError;

/// Result type alias for location operations
pub type LocateResult<T> = Result<T, LocateError>;

/// Errors from geocoding, geolocation and origin resolution
#[derive(Error, Debug)]
pub enum LocateError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Geocoding service returned an error response
    #[error("Geocoding error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response was well-formed JSON but not a usable place
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Nothing matched the query
    #[error("No place found for \"{0}\"")]
    NotFound(String),

    /// Current position could not be acquired
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    /// Coordinate failed validation
    #[error(transparent)]
    Geo(#[from] GeoError),
}

impl LocateError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

/// Stable codes for geolocation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeolocationErrorCode {
    /// The user or platform refused location access
    PermissionDenied,
    /// The platform could not determine a position
    PositionUnavailable,
    /// No position arrived within the configured timeout
    Timeout,
    /// No location service is available in this runtime
    Unsupported,
}

impl GeolocationErrorCode {
    /// Code as it appears in logs and JSON output
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::PositionUnavailable => "POSITION_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::Unsupported => "UNSUPPORTED",
        }
    }
}

impl fmt::Display for GeolocationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the current position could not be acquired
///
/// All variants are recoverable: the caller may retry or fall back to a
/// place name typed by the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    /// Location access was refused
    #[error("Location access was denied. Enable location permissions or enter a place manually.")]
    PermissionDenied,

    /// The location service answered without a position
    #[error("Your location could not be determined right now.")]
    PositionUnavailable,

    /// The location service did not answer in time
    #[error("Timed out while waiting for your location.")]
    Timeout,

    /// There is no location service to ask
    #[error("Geolocation is not supported on this device.")]
    Unsupported,
}

impl GeolocationError {
    /// Stable code for this failure
    #[must_use]
    pub fn code(&self) -> GeolocationErrorCode {
        match self {
            Self::PermissionDenied => GeolocationErrorCode::PermissionDenied,
            Self::PositionUnavailable => GeolocationErrorCode::PositionUnavailable,
            Self::Timeout => GeolocationErrorCode::Timeout,
            Self::Unsupported => GeolocationErrorCode::Unsupported,
        }
    }

    /// Human-readable message
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geolocation_codes_are_distinct() {
        let all = [
            GeolocationError::PermissionDenied,
            GeolocationError::PositionUnavailable,
            GeolocationError::Timeout,
            GeolocationError::Unsupported,
        ];
        let codes: std::collections::HashSet<_> = all.iter().map(GeolocationError::code).collect();
        let messages: std::collections::HashSet<_> = all.iter().map(GeolocationError::message).collect();
        assert_eq!(codes.len(), 4);
        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn test_code_serialization() {
        let json = serde_json::to_string(&GeolocationErrorCode::PositionUnavailable).unwrap();
        assert_eq!(json, "\"POSITION_UNAVAILABLE\"");
        assert_eq!(GeolocationErrorCode::Timeout.to_string(), "TIMEOUT");
    }

    #[test]
    fn test_status_classification() {
        assert!(LocateError::api_response(404, "nope").is_client_error());
        assert!(LocateError::api_response(503, "down").is_server_error());
        assert!(!LocateError::config("bad").is_server_error());
    }

    #[test]
    fn test_geolocation_error_is_transparent() {
        let err: LocateError = GeolocationError::Timeout.into();
        assert_eq!(err.to_string(), GeolocationError::Timeout.message());
    }
}
