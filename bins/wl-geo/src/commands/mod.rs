//! CLI command implementations

pub mod distance;
pub mod explore;
pub mod format;
pub mod geocode;
pub mod locate;
pub mod nearby;
pub mod reverse;

use crate::config::AppConfig;
use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::Path;
use wanderlust_cli::{progress, OutputFormat};
use wanderlust_geo::{Coordinate, TravelPost};
use wanderlust_locate::{resolve_origin, Geolocator, LocateError, NominatimClient, Origin};

/// State shared by every command
pub struct App {
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl App {
    pub fn new(config: AppConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    pub fn geocoder(&self) -> Result<NominatimClient> {
        NominatimClient::with_config(self.config.geocoder.clone()).map_err(describe)
    }

    /// Resolve an origin, showing a spinner while the network or the
    /// location service is involved
    pub async fn resolve(&self, origin: &Origin) -> Result<Coordinate> {
        let message = match origin {
            Origin::At(_) => None,
            Origin::Place(name) => Some(format!("Geocoding {name}...")),
            Origin::Here => Some("Locating...".to_string()),
        };
        let spinner = message.filter(|_| !self.format.is_json()).map(|m| progress::spinner(&m));

        let resolved = match origin {
            // Transport failures surface as errors, not as NotFound
            Origin::Place(name) => match self.geocoder()?.search(name).await {
                Ok(Some(place)) => Ok(place.coordinate),
                Ok(None) => Err(LocateError::NotFound(name.clone())),
                Err(e) => Err(e),
            },
            Origin::Here => {
                let geolocator = self.config.geolocator()?;
                resolve_origin(origin, &geolocator, &self.geocoder()?).await
            }
            Origin::At(_) => resolve_origin(origin, &Geolocator::unsupported(), &self.geocoder()?).await,
        };

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        resolved.map_err(describe)
    }
}

/// Turn a locate error into a CLI error, keeping geolocation codes visible
pub fn describe(err: LocateError) -> anyhow::Error {
    match err {
        LocateError::Geolocation(e) => anyhow!("{} ({})", e, e.code()),
        LocateError::NotFound(what) => anyhow!("No place found for {what:?}"),
        other => anyhow::Error::new(other),
    }
}

/// Read travel posts from a JSON array of rows; `-` reads stdin
pub fn load_posts(path: &Path) -> Result<Vec<TravelPost>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read posts from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    let rows: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))?;

    let posts = TravelPost::from_rows(&rows).with_context(|| format!("Invalid post in {}", path.display()))?;
    tracing::debug!(count = posts.len(), path = %path.display(), "Loaded posts");
    Ok(posts)
}
