//! Coordinate to place name

use super::App;
use anyhow::Result;
use serde_json::json;
use wanderlust_cli::{print_json, progress};
use wanderlust_geo::Coordinate;
use wanderlust_locate::Geocoder;

/// Print the place name at `at`, or the coordinate itself when the
/// geocoder has no answer
pub async fn run(app: &App, at: Coordinate) -> Result<()> {
    let geocoder = app.geocoder()?;

    let spinner = (!app.format.is_json()).then(|| progress::spinner("Reverse geocoding..."));
    let name = geocoder.reverse_geocode(at.latitude, at.longitude).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if app.format.is_json() {
        return print_json(&json!({
            "latitude": at.latitude,
            "longitude": at.longitude,
            "display_name": name,
        }));
    }

    println!("{name}");
    Ok(())
}
