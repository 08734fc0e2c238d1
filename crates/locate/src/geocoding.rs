//! Nominatim forward and reverse geocoding.
//!
//! Each call issues exactly one GET request. There is no retry, caching or
//! rate limiting; callers that hammer the public instance will be throttled
//! by it.

use crate::config::GeocoderConfig;
use crate::error::{LocateError, LocateResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn, Span};
use uuid::Uuid;
use wanderlust_geo::Coordinate;
use wanderlust_telemetry::Timer;

/// A geocoded place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    /// Where the place is
    pub coordinate: Coordinate,
    /// Full human-readable name
    pub display_name: String,
}

/// Best-effort place lookups
///
/// Both methods swallow failures: forward lookups degrade to `None`,
/// reverse lookups to [`format_coordinate`].
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Coordinates for a place name, if the service knows it
    async fn forward_geocode(&self, place: &str) -> Option<Coordinate>;

    /// A place name for a coordinate, or the coordinate itself as text
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> String;
}

/// Fallback label used when reverse geocoding fails
///
/// ```
/// use wanderlust_locate::format_coordinate;
///
/// assert_eq!(format_coordinate(38.72231, -9.13934), "38.7223, -9.1393");
/// ```
#[must_use]
pub fn format_coordinate(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4}, {longitude:.4}")
}

/// One entry of a `/search` response
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// A `/reverse` response; failures come back as `{"error": ...}` with status 200
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for a Nominatim-compatible geocoding service
#[derive(Clone)]
pub struct NominatimClient {
    inner: Client,
    config: Arc<GeocoderConfig>,
}

impl NominatimClient {
    /// Create a client configured from the environment
    pub fn new() -> LocateResult<Self> {
        Self::with_config(GeocoderConfig::from_env()?)
    }

    /// Create a client with a specific configuration
    pub fn with_config(config: GeocoderConfig) -> LocateResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| LocateError::config(format!("user_agent is not a valid header: {}", config.user_agent)))?,
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(LocateError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// Look up the best match for a place name
    ///
    /// Returns `Ok(None)` for a blank query or an empty result set; transport
    /// and decoding failures are returned as errors.
    #[instrument(skip(self), fields(request_id))]
    pub async fn search(&self, query: &str) -> LocateResult<Option<Place>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let url = self.config.endpoint("search")?;
        let hits: Vec<SearchHit> = self
            .get_json(
                url,
                &[("format", "json"), ("q", query), ("limit", "1"), ("addressdetails", "1")],
            )
            .await?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        let latitude = parse_degrees(&hit.lat, "lat")?;
        let longitude = parse_degrees(&hit.lon, "lon")?;
        let coordinate = Coordinate::try_new(latitude, longitude)?;

        Ok(Some(Place {
            coordinate,
            display_name: hit.display_name.unwrap_or_else(|| query.to_string()),
        }))
    }

    /// Look up the name of the place at a coordinate
    ///
    /// Fails with [`LocateError::NotFound`] when the service has no answer.
    #[instrument(skip(self), fields(request_id))]
    pub async fn try_reverse(&self, latitude: f64, longitude: f64) -> LocateResult<Place> {
        let url = self.config.endpoint("reverse")?;
        let (lat, lon) = (latitude.to_string(), longitude.to_string());
        let response: ReverseResponse = self
            .get_json(
                url,
                &[("format", "json"), ("lat", lat.as_str()), ("lon", lon.as_str()), ("addressdetails", "1")],
            )
            .await?;

        if let Some(reason) = response.error {
            return Err(LocateError::NotFound(format!("{} ({reason})", format_coordinate(latitude, longitude))));
        }

        match response.display_name.filter(|n| !n.trim().is_empty()) {
            Some(display_name) => Ok(Place {
                coordinate: Coordinate::new(latitude, longitude),
                display_name,
            }),
            None => Err(LocateError::NotFound(format_coordinate(latitude, longitude))),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> LocateResult<T> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let timer = Timer::start("geocoder_request");
        let response = self.inner.get(url.clone()).query(query).send().await?;
        let status = response.status();
        let elapsed = timer.stop();

        debug!(
            request_id = %request_id,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis(),
            "Geocoder responded"
        );

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LocateError::api_response(status.as_u16(), message));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn forward_geocode(&self, place: &str) -> Option<Coordinate> {
        match self.search(place).await {
            Ok(Some(found)) => Some(found.coordinate),
            Ok(None) => {
                debug!(query = %place, "No geocoding match");
                None
            }
            Err(e) => {
                warn!(query = %place, error = %e, "Forward geocoding failed");
                None
            }
        }
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> String {
        match self.try_reverse(latitude, longitude).await {
            Ok(place) => place.display_name,
            Err(e) => {
                warn!(latitude, longitude, error = %e, "Reverse geocoding failed");
                format_coordinate(latitude, longitude)
            }
        }
    }
}

impl std::fmt::Debug for NominatimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimClient").field("config", &self.config).finish()
    }
}

fn parse_degrees(raw: &str, field: &str) -> LocateResult<f64> {
    raw.trim()
        .parse()
        .map_err(|_| LocateError::InvalidResponse(format!("{field} is not a number: {raw:?}")))
}
