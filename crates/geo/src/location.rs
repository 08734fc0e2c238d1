//! Parsing of stored post locations.
//!
//! Supports:
//! - GeoJSON points: `{"type": "Point", "coordinates": [lng, lat]}`
//! - WKT strings: `POINT(lng lat)`
//! - Plain objects: `{"latitude": .., "longitude": ..}` or `{"lat": .., "lng"|"lon": ..}`

use crate::{Coordinate, GeoError, Result};
use serde_json::Value;

/// Parses a location value as stored on a post row.
///
/// # Returns
/// * `Ok(None)` if the value is null
/// * `Ok(Some(_))` for a recognised, in-range point
/// * `Err(_)` for anything else
///
/// # Example
/// ```
/// use wanderlust_geo::parse_location;
/// use serde_json::json;
///
/// let geojson = json!({"type": "Point", "coordinates": [12.4964, 41.9028]});
/// let coord = parse_location(&geojson).unwrap().unwrap();
/// assert!((coord.latitude - 41.9028).abs() < 0.0001);
///
/// let wkt = json!("POINT(12.4964 41.9028)");
/// assert_eq!(parse_location(&wkt).unwrap(), Some(coord));
///
/// assert_eq!(parse_location(&json!(null)).unwrap(), None);
/// ```
pub fn parse_location(value: &Value) -> Result<Option<Coordinate>> {
    let coord = match value {
        Value::Null => return Ok(None),
        Value::String(wkt) => parse_wkt_point(wkt)?,
        Value::Object(map) => {
            if let Some(coords) = map.get("coordinates") {
                parse_geojson_coordinates(coords)?
            } else {
                let lat = number_field(value, &["latitude", "lat"])?;
                let lng = number_field(value, &["longitude", "lng", "lon"])?;
                Coordinate::new(lat, lng)
            }
        }
        other => {
            return Err(GeoError::InvalidCoordinate(format!(
                "Unsupported location value: {other}"
            )))
        }
    };

    Coordinate::try_new(coord.latitude, coord.longitude).map(Some)
}

fn parse_geojson_coordinates(coords: &Value) -> Result<Coordinate> {
    let pair = coords
        .as_array()
        .filter(|c| c.len() >= 2)
        .ok_or_else(|| GeoError::InvalidCoordinate(format!("Expected [lng, lat], got: {coords}")))?;

    let lng = as_number(&pair[0]).ok_or_else(|| GeoError::InvalidCoordinate(format!("Invalid longitude: {}", pair[0])))?;
    let lat = as_number(&pair[1]).ok_or_else(|| GeoError::InvalidCoordinate(format!("Invalid latitude: {}", pair[1])))?;

    Ok(Coordinate::new(lat, lng))
}

fn number_field(value: &Value, names: &[&'static str]) -> Result<f64> {
    let raw = names
        .iter()
        .find_map(|name| value.get(name))
        .ok_or(GeoError::MissingField(names[0]))?;

    as_number(raw).ok_or_else(|| GeoError::InvalidCoordinate(format!("Invalid {}: {raw}", names[0])))
}

/// Numbers may arrive as JSON numbers or numeric strings.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a WKT POINT string.
///
/// Format: `POINT(longitude latitude)`, optionally prefixed with `SRID=4326;`
fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let wkt = wkt.trim();
    let wkt = match wkt.split_once(';') {
        Some((srid, rest)) if srid.starts_with("SRID=") => rest.trim(),
        _ => wkt,
    };

    if !wkt.starts_with("POINT(") && !wkt.starts_with("POINT (") {
        return Err(GeoError::InvalidWkt(format!("Expected POINT, got: {}", wkt)));
    }

    let start = wkt.find('(').ok_or_else(|| GeoError::InvalidWkt("Missing '('".into()))?;
    let end = wkt.find(')').ok_or_else(|| GeoError::InvalidWkt("Missing ')'".into()))?;

    if start >= end {
        return Err(GeoError::InvalidWkt("Invalid parentheses".into()));
    }

    let parts: Vec<&str> = wkt[start + 1..end].split_whitespace().collect();

    if parts.len() != 2 {
        return Err(GeoError::InvalidWkt(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    }

    let lng: f64 = parts[0]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid longitude: {}", parts[0])))?;
    let lat: f64 = parts[1]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid latitude: {}", parts[1])))?;

    Ok(Coordinate::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoErrorCode;
    use serde_json::json;

    fn parsed(value: Value) -> Coordinate {
        parse_location(&value).unwrap().unwrap()
    }

    #[test]
    fn test_parse_geojson_point() {
        let coord = parsed(json!({"type": "Point", "coordinates": [-9.1393, 38.7223]}));
        assert!((coord.latitude - 38.7223).abs() < 0.0001);
        assert!((coord.longitude + 9.1393).abs() < 0.0001);
    }

    #[test]
    fn test_parse_geojson_without_type() {
        let coord = parsed(json!({"coordinates": [-9.1393, 38.7223]}));
        assert!((coord.latitude - 38.7223).abs() < 0.0001);
    }

    #[test]
    fn test_parse_wkt_variants() {
        for wkt in ["POINT(-9.1393 38.7223)", "POINT (-9.1393 38.7223)", "SRID=4326;POINT(-9.1393 38.7223)"] {
            let coord = parsed(json!(wkt));
            assert!((coord.latitude - 38.7223).abs() < 0.0001, "{wkt}");
        }
    }

    #[test]
    fn test_parse_plain_objects() {
        let a = parsed(json!({"latitude": 38.7223, "longitude": -9.1393}));
        let b = parsed(json!({"lat": "38.7223", "lon": "-9.1393"}));
        let c = parsed(json!({"lat": 38.7223, "lng": -9.1393}));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_parse_null_returns_none() {
        assert!(parse_location(&json!(null)).unwrap().is_none());
    }

    #[test]
    fn test_rejects_polygon() {
        let err = parse_location(&json!("POLYGON((0 0, 1 1, 1 0, 0 0))")).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidWkt);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = parse_location(&json!({"coordinates": [10.0, 95.0]})).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);
    }

    #[test]
    fn test_missing_longitude() {
        let err = parse_location(&json!({"latitude": 10.0})).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::MissingField);
    }

    #[test]
    fn test_rejects_bare_number() {
        assert!(parse_location(&json!(42)).is_err());
    }
}
