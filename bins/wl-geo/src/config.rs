//! Configuration file loading
//!
//! Values come from an optional TOML file, then `WANDERLUST_*` environment
//! variables, then command-line flags, each layer overriding the last.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wanderlust_geo::Coordinate;
use wanderlust_locate::{FixedPositionSource, GeocoderConfig, Geolocator, PositionOptions};
use wanderlust_telemetry::TelemetryConfig;

/// Everything `wl-geo` can be configured with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub geocoder: GeocoderConfig,
    pub geolocation: GeolocationConfig,
    pub log: TelemetryConfig,
}

/// `[geolocation]` table
///
/// A terminal has no location service, so `--here` resolves to the home
/// position configured here, or fails as unsupported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timeout_secs: Option<u64>,
}

impl GeolocationConfig {
    /// The configured home position, if any
    pub fn home(&self) -> Result<Option<Coordinate>> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Some(
                Coordinate::try_new(latitude, longitude).context("Invalid [geolocation] position")?,
            )),
            (None, None) => Ok(None),
            _ => bail!("[geolocation] needs both latitude and longitude"),
        }
    }

    /// Position options with the configured timeout applied
    pub fn options(&self) -> PositionOptions {
        let options = PositionOptions::default();
        match self.timeout_secs {
            Some(secs) => options.with_timeout(Duration::from_secs(secs)),
            None => options,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the first standard location that exists,
    /// then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path.map(Path::to_path_buf).or_else(find_config_file) {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };

        config.merge_env()
    }

    /// Parse a TOML configuration file without looking at the environment
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    fn merge_env(mut self) -> Result<Self> {
        self.geocoder = self.geocoder.merge_env()?;
        Ok(self)
    }

    /// Geolocator for `--here`
    pub fn geolocator(&self) -> Result<Geolocator> {
        let geolocator = match self.geolocation.home()? {
            Some(home) => Geolocator::new(FixedPositionSource::new(home)),
            None => Geolocator::unsupported(),
        };

        Ok(geolocator.with_options(self.geolocation.options()))
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("wanderlust.toml");
    let user = dirs::config_dir().map(|dir| dir.join("wanderlust").join("config.toml"));

    std::iter::once(local)
        .chain(user)
        .find(|candidate| candidate.exists())
}
