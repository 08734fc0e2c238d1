//! WASM bindings for the browser front end.

use crate::{explore, format_distance, haversine_distance, parse_location, Coordinate, ExploreQuery, TravelPost};
use wasm_bindgen::prelude::*;

/// Calculate distance in kilometers between two coordinates.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    crate::distance(lat1, lng1, lat2, lng2)
}

/// Render a kilometer value as a distance label.
#[wasm_bindgen(js_name = formatDistance)]
pub fn format_distance_js(km: f64) -> String {
    format_distance(km)
}

/// Filter post rows to those within `radius_km` of the user.
///
/// # Arguments
/// * `posts_json` - JSON array of post rows
///
/// # Returns
/// JSON array of hits in input order, each shaped
/// `{"post": {...}, "distance_km": 1.4, "distance_label": "1.4km"}`
#[wasm_bindgen(js_name = filterNearby)]
pub fn filter_nearby(user_lat: f64, user_lng: f64, posts_json: &str, radius_km: f64) -> Result<String, JsValue> {
    let rows: serde_json::Value = serde_json::from_str(posts_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    let posts = TravelPost::from_rows(&rows).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let origin = Coordinate::new(user_lat, user_lng);
    let hits = explore(&posts, &ExploreQuery::new().near(origin, radius_km));

    serde_json::to_string(&hits)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Parse a stored location and return coordinates.
///
/// # Returns
/// JSON string with latitude/longitude, or `null` if the value is null
#[wasm_bindgen(js_name = parseLocation)]
pub fn parse_location_js(location_json: &str) -> Result<String, JsValue> {
    let value: serde_json::Value = serde_json::from_str(location_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

    let coord = parse_location(&value).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&coord)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Distance between a post row and the user, or `undefined` when unlocated.
#[wasm_bindgen(js_name = distanceToPost)]
pub fn distance_to_post(user_lat: f64, user_lng: f64, post_json: &str) -> Result<Option<f64>, JsValue> {
    let row: serde_json::Value = serde_json::from_str(post_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    let post = TravelPost::from_row(&row).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let user = Coordinate::new(user_lat, user_lng);
    Ok(post.coordinate.map(|c| haversine_distance(&user, &c)))
}
