//! Place name to coordinate

use super::{describe, App};
use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use wanderlust_cli::{format_duration, print_json, progress};
use wanderlust_telemetry::Timer;

pub async fn run(app: &App, query: &str) -> Result<()> {
    let geocoder = app.geocoder()?;

    let spinner = (!app.format.is_json()).then(|| progress::spinner(&format!("Geocoding {query}...")));
    let timer = Timer::start("geocode_command");
    let result = geocoder.search(query).await;
    let elapsed = timer.stop();

    let place = match result {
        Ok(Some(place)) => {
            if let Some(pb) = &spinner {
                progress::finish_success(pb, &format!("Found in {}", format_duration(elapsed)));
            }
            place
        }
        Ok(None) => {
            if let Some(pb) = &spinner {
                progress::finish_error(pb, "No match");
            }
            bail!("No place found for {query:?}");
        }
        Err(e) => {
            if let Some(pb) = &spinner {
                progress::finish_error(pb, "Geocoder unavailable");
            }
            return Err(describe(e));
        }
    };

    if app.format.is_json() {
        return print_json(&place);
    }

    println!(
        "{}, {}  {}",
        place.coordinate.latitude,
        place.coordinate.longitude,
        place.display_name.dimmed()
    );
    Ok(())
}
