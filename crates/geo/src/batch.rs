//! Batch distance ranking with optional parallelism.
//!
//! Used when a feed page arrives as raw rows (id + stored location) and the
//! client needs a distance badge or a closest-first ordering for each one.

use crate::{haversine_distance, parse_location, Coordinate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Result of a distance calculation for a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// The item ID
    pub id: String,
    /// Distance in kilometers, `None` when the item has no usable location
    pub distance_km: Option<f64>,
}

/// Input item for batch distance calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationItem {
    /// Item ID
    pub id: String,
    /// Stored location (GeoJSON, WKT or lat/lng object)
    #[serde(default)]
    pub location: serde_json::Value,
}

/// Calculate distances from a user location to multiple items.
///
/// Output order matches input order.
///
/// # Example
/// ```
/// use wanderlust_geo::{calculate_distances, batch::LocationItem};
/// use serde_json::json;
///
/// let items = vec![
///     LocationItem { id: "a".into(), location: json!({"coordinates": [-0.1278, 51.5074]}) },
///     LocationItem { id: "b".into(), location: json!(null) },
/// ];
///
/// let results = calculate_distances(40.7128, -74.0060, &items);
/// assert!(results[0].distance_km.is_some());
/// assert!(results[1].distance_km.is_none());
/// ```
pub fn calculate_distances(user_lat: f64, user_lng: f64, items: &[LocationItem]) -> Vec<DistanceResult> {
    let user_coord = Coordinate::new(user_lat, user_lng);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| calculate_single_distance(&user_coord, item))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items
            .iter()
            .map(|item| calculate_single_distance(&user_coord, item))
            .collect()
    }
}

/// Calculate distances and return items sorted by distance.
///
/// Unlocated items sort last; `max_results` truncates after sorting.
pub fn calculate_distances_sorted(
    user_lat: f64,
    user_lng: f64,
    items: &[LocationItem],
    max_results: Option<usize>,
) -> Vec<DistanceResult> {
    let mut results = calculate_distances(user_lat, user_lng, items);

    results.sort_by(compare_distance);

    if let Some(max) = max_results {
        results.truncate(max);
    }

    results
}

/// Calculate distances within a radius, closest first.
///
/// Unlocated items are always dropped, even for an infinite radius.
pub fn calculate_distances_within_radius(
    user_lat: f64,
    user_lng: f64,
    items: &[LocationItem],
    radius_km: f64,
) -> Vec<DistanceResult> {
    let mut results = calculate_distances(user_lat, user_lng, items);

    results.retain(|r| r.distance_km.is_some_and(|d| d <= radius_km));
    results.sort_by(compare_distance);

    results
}

fn compare_distance(a: &DistanceResult, b: &DistanceResult) -> Ordering {
    match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[inline]
fn calculate_single_distance(user_coord: &Coordinate, item: &LocationItem) -> DistanceResult {
    let distance_km = parse_location(&item.location)
        .ok()
        .flatten()
        .map(|coord| haversine_distance(user_coord, &coord));

    DistanceResult {
        id: item.id.clone(),
        distance_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // User in Frankfurt
    const USER: (f64, f64) = (50.1109, 8.6821);

    fn create_test_items() -> Vec<LocationItem> {
        vec![
            // Berlin
            LocationItem {
                id: "berlin".into(),
                location: json!({"type": "Point", "coordinates": [13.4050, 52.5200]}),
            },
            // Paris
            LocationItem {
                id: "paris".into(),
                location: json!("POINT(2.3522 48.8566)"),
            },
            LocationItem {
                id: "nowhere".into(),
                location: json!(null),
            },
            // London
            LocationItem {
                id: "london".into(),
                location: json!({"latitude": 51.5074, "longitude": -0.1276}),
            },
            LocationItem {
                id: "garbage".into(),
                location: json!("LINESTRING(0 0, 1 1)"),
            },
        ]
    }

    #[test]
    fn test_batch_distances_keep_input_order() {
        let items = create_test_items();
        let results = calculate_distances(USER.0, USER.1, &items);

        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["berlin", "paris", "nowhere", "london", "garbage"]);

        let berlin = &results[0];
        assert!(berlin.distance_km.is_some_and(|d| d > 0.0 && d < 500.0));
        assert!(results[2].distance_km.is_none());
        assert!(results[4].distance_km.is_none());
    }

    #[test]
    fn test_sorted_distances_put_unlocated_last() {
        let items = create_test_items();
        let results = calculate_distances_sorted(USER.0, USER.1, &items, None);

        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(&ids[..3], &["berlin", "paris", "london"]);
        assert!(results[3..].iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn test_radius_filter() {
        let items = create_test_items();
        let results = calculate_distances_within_radius(USER.0, USER.1, &items, 500.0);

        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["berlin", "paris"]);
    }

    #[test]
    fn test_infinite_radius_still_drops_unlocated() {
        let items = create_test_items();
        let results = calculate_distances_within_radius(USER.0, USER.1, &items, f64::INFINITY);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_max_results() {
        let items = create_test_items();
        let results = calculate_distances_sorted(USER.0, USER.1, &items, Some(2));
        assert_eq!(results.len(), 2);
    }
}
