//! Current-position acquisition.
//!
//! The platform location service sits behind [`PositionSource`]. A
//! [`Geolocator`] asks its source once per call, enforces the timeout, and
//! turns every failure into one of the four [`GeolocationError`] variants.

use crate::config::PositionOptions;
use crate::error::GeolocationError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use wanderlust_geo::Coordinate;

/// A position fix reported by a location service
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// Where the device is
    pub coordinate: Coordinate,
    /// Accuracy radius in meters, when reported
    pub accuracy_m: Option<f64>,
    /// When the fix was taken
    pub timestamp: DateTime<Utc>,
}

/// A platform location service
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Produce one position fix, honoring `options` as far as the platform can
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeolocationError>;
}

/// Always reports the same coordinate
///
/// Backs the configured home position that `--here` resolves to.
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionSource {
    coordinate: Coordinate,
}

impl FixedPositionSource {
    /// Source pinned to `coordinate`
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeolocationError> {
        if !self.coordinate.is_valid() {
            return Err(GeolocationError::PositionUnavailable);
        }

        Ok(Position {
            coordinate: self.coordinate,
            accuracy_m: Some(0.0),
            timestamp: Utc::now(),
        })
    }
}

/// Refuses every request, as a user declining the permission prompt would
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedPositionSource;

#[async_trait]
impl PositionSource for DeniedPositionSource {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}

/// Single-shot access to the current position
#[derive(Clone)]
pub struct Geolocator {
    source: Option<Arc<dyn PositionSource>>,
    options: PositionOptions,
}

impl Geolocator {
    /// Geolocator backed by `source`, with default options
    pub fn new(source: impl PositionSource + 'static) -> Self {
        Self {
            source: Some(Arc::new(source)),
            options: PositionOptions::default(),
        }
    }

    /// Geolocator for a runtime with no location service
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            source: None,
            options: PositionOptions::default(),
        }
    }

    /// Replace the position options
    #[must_use]
    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    /// Options passed to the source
    #[must_use]
    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Whether a location service is present at all
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.source.is_some()
    }

    /// Acquire a full position fix
    pub async fn current_position(&self) -> Result<Position, GeolocationError> {
        let Some(source) = &self.source else {
            warn!("Geolocation requested but no location service is available");
            return Err(GeolocationError::Unsupported);
        };

        let result = match tokio::time::timeout(self.options.timeout, source.current_position(&self.options)).await {
            Ok(result) => result,
            Err(_) => Err(GeolocationError::Timeout),
        };

        match &result {
            Ok(position) => debug!(
                latitude = position.coordinate.latitude,
                longitude = position.coordinate.longitude,
                accuracy_m = position.accuracy_m,
                "Position acquired"
            ),
            Err(e) => warn!(code = %e.code(), "Position not acquired: {e}"),
        }

        result
    }

    /// Acquire the current coordinate
    pub async fn get_current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.current_position().await.map(|p| p.coordinate)
    }
}

impl std::fmt::Debug for Geolocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geolocator")
            .field("supported", &self.is_supported())
            .field("options", &self.options)
            .finish()
    }
}
