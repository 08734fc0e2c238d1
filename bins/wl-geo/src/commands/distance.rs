//! Distance between two coordinates

use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use wanderlust_cli::{print_json, OutputFormat};
use wanderlust_geo::{format_distance, haversine_distance, Coordinate};

/// Print the great-circle distance from `from` to `to`
pub fn run(from: Coordinate, to: Coordinate, format: OutputFormat) -> Result<()> {
    let km = haversine_distance(&from, &to);
    let label = format_distance(km);

    if format.is_json() {
        return print_json(&json!({
            "from": from,
            "to": to,
            "distance_km": km,
            "label": label,
        }));
    }

    println!("{} {}", label.bold(), format!("({km:.3} km)").dimmed());
    Ok(())
}
