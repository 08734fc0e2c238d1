//! Current position

use super::App;
use anyhow::{anyhow, Result};
use wanderlust_cli::{print_json, progress, Status};
use wanderlust_locate::{format_coordinate, Geocoder};

/// Print the current position, optionally with its place name
pub async fn run(app: &App, with_name: bool) -> Result<()> {
    let geolocator = app.config.geolocator()?;

    let spinner = (!app.format.is_json()).then(|| progress::spinner("Locating..."));
    let result = geolocator.current_position().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let position = result.map_err(|e| anyhow!("{} ({})", e, e.code()))?;
    let coordinate = position.coordinate;

    let name = if with_name {
        Some(app.geocoder()?.reverse_geocode(coordinate.latitude, coordinate.longitude).await)
    } else {
        None
    };

    if app.format.is_json() {
        let mut value = serde_json::to_value(position)?;
        if let (Some(name), Some(obj)) = (name, value.as_object_mut()) {
            obj.insert("display_name".to_string(), name.into());
        }
        return print_json(&value);
    }

    Status::success(&format_coordinate(coordinate.latitude, coordinate.longitude));
    if let Some(name) = name {
        println!("  {name}");
    }
    Ok(())
}
