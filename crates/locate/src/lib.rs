//! Geolocation and geocoding for Wanderlust
//!
//! This crate holds the two network-bound edges of the geo features:
//!
//! - **Geolocation**: single-shot acquisition of the device position through
//!   a pluggable [`PositionSource`], with typed failure codes
//! - **Geocoding**: forward and reverse lookups against a
//!   Nominatim-compatible HTTP service, degrading to "no answer" on failure
//! - **Origin resolution**: "near me", "near a place" or an explicit point
//!
//! # Example
//!
//! ```rust,no_run
//! use wanderlust_locate::{Geocoder, GeocoderConfig, NominatimClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NominatimClient::with_config(GeocoderConfig::default())?;
//!
//!     if let Some(coord) = client.forward_geocode("Lisbon").await {
//!         let name = client.reverse_geocode(coord.latitude, coord.longitude).await;
//!         println!("{name}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod geocoding;
pub mod geolocation;
pub mod origin;

pub use config::{GeocoderConfig, PositionOptions};
pub use error::{GeolocationError, GeolocationErrorCode, LocateError, LocateResult};
pub use geocoding::{format_coordinate, Geocoder, NominatimClient, Place};
pub use geolocation::{DeniedPositionSource, FixedPositionSource, Geolocator, Position, PositionSource};
pub use origin::{resolve_origin, Origin};
