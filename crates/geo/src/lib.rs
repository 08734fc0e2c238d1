//! Geodistance utilities for Wanderlust travel posts.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Human-readable distance labels
//! - Nearby filtering over anything that may carry a coordinate
//! - Location parsing (GeoJSON, WKT and plain lat/lng objects)
//! - Travel post ingestion and explore search
//! - Batch ranking with optional parallelism
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use wanderlust_geo::{filter_nearby, format_distance, haversine_distance, Coordinate};
//!
//! let new_york = Coordinate::new(40.7128, -74.0060);
//! let london = Coordinate::new(51.5074, -0.1278);
//!
//! let km = haversine_distance(&new_york, &london);
//! assert!((km - 5570.0).abs() < 20.0);
//! assert_eq!(format_distance(km), format!("{}km", km.round() as i64));
//!
//! let spots = vec![Some(Coordinate::new(40.7306, -73.9352)), None, Some(london)];
//! let nearby = filter_nearby(&spots, &new_york, 50.0);
//! assert_eq!(nearby.len(), 1);
//! ```

mod error;
mod format;
mod haversine;
mod location;
mod nearby;
pub mod batch;
pub mod explore;
pub mod post;

#[cfg(feature = "wasm")]
mod wasm;

pub use batch::{calculate_distances, DistanceResult};
pub use error::{GeoError, GeoErrorCode, Result};
pub use explore::{explore, ExploreHit, ExploreQuery};
pub use format::format_distance;
pub use haversine::{distance, haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use location::parse_location;
pub use nearby::{filter_nearby, nearby_with_distance, sort_by_distance, Locatable, Nearby};
pub use post::TravelPost;

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// No range check is performed; see [`Coordinate::is_valid`].
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Checked constructor used at ingestion boundaries.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "({latitude}, {longitude}) is outside [-90, 90] x [-180, 180]"
            )))
        }
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
