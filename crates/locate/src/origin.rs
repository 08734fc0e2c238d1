//! Where a nearby search is centred.

use crate::error::{LocateError, LocateResult};
use crate::geocoding::Geocoder;
use crate::geolocation::Geolocator;
use tracing::debug;
use wanderlust_geo::Coordinate;

/// The origin a user picked for a nearby search
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    /// The device's current position
    Here,
    /// A place name to geocode
    Place(String),
    /// An explicit coordinate
    At(Coordinate),
}

/// Turn an [`Origin`] into a coordinate.
///
/// Geolocation failures keep their code; a place name that geocodes to
/// nothing becomes [`LocateError::NotFound`].
pub async fn resolve_origin(
    origin: &Origin,
    geolocator: &Geolocator,
    geocoder: &dyn Geocoder,
) -> LocateResult<Coordinate> {
    let coordinate = match origin {
        Origin::Here => geolocator.get_current_position().await?,
        Origin::Place(name) => geocoder
            .forward_geocode(name)
            .await
            .ok_or_else(|| LocateError::NotFound(name.clone()))?,
        Origin::At(coordinate) => Coordinate::try_new(coordinate.latitude, coordinate.longitude)?,
    };

    debug!(?origin, latitude = coordinate.latitude, longitude = coordinate.longitude, "Origin resolved");
    Ok(coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeolocationError;
    use crate::geolocation::{DeniedPositionSource, FixedPositionSource};
    use async_trait::async_trait;

    struct Gazetteer;

    #[async_trait]
    impl Geocoder for Gazetteer {
        async fn forward_geocode(&self, place: &str) -> Option<Coordinate> {
            (place == "Marrakesh").then(|| Coordinate::new(31.6295, -7.9811))
        }

        async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> String {
            crate::format_coordinate(latitude, longitude)
        }
    }

    #[test]
    fn test_explicit_coordinate() {
        let at = Coordinate::new(64.1466, -21.9426);
        let resolved = tokio_test::block_on(resolve_origin(&Origin::At(at), &Geolocator::unsupported(), &Gazetteer));
        assert_eq!(resolved.unwrap(), at);
    }

    #[test]
    fn test_explicit_coordinate_validated() {
        let at = Coordinate::new(64.1466, -210.0);
        let resolved = tokio_test::block_on(resolve_origin(&Origin::At(at), &Geolocator::unsupported(), &Gazetteer));
        assert!(matches!(resolved, Err(LocateError::Geo(_))));
    }

    #[tokio::test]
    async fn test_here_uses_geolocator() {
        let home = Coordinate::new(59.3293, 18.0686);
        let geolocator = Geolocator::new(FixedPositionSource::new(home));
        assert_eq!(resolve_origin(&Origin::Here, &geolocator, &Gazetteer).await.unwrap(), home);
    }

    #[tokio::test]
    async fn test_here_keeps_geolocation_code() {
        let geolocator = Geolocator::new(DeniedPositionSource);
        let err = resolve_origin(&Origin::Here, &geolocator, &Gazetteer).await.unwrap_err();
        assert!(matches!(err, LocateError::Geolocation(GeolocationError::PermissionDenied)));
    }

    #[tokio::test]
    async fn test_place_geocoded() {
        let origin = Origin::Place("Marrakesh".into());
        let resolved = resolve_origin(&origin, &Geolocator::unsupported(), &Gazetteer).await.unwrap();
        assert_eq!(resolved, Coordinate::new(31.6295, -7.9811));
    }

    #[tokio::test]
    async fn test_unknown_place_not_found() {
        let origin = Origin::Place("Atlantis".into());
        let err = resolve_origin(&origin, &Geolocator::unsupported(), &Gazetteer).await.unwrap_err();
        assert!(matches!(err, LocateError::NotFound(name) if name == "Atlantis"));
    }
}
