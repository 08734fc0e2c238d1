//! Render a distance the way the app displays it

use anyhow::Result;
use serde_json::json;
use wanderlust_cli::{print_json, OutputFormat};
use wanderlust_geo::format_distance;

pub fn run(km: f64, format: OutputFormat) -> Result<()> {
    let label = format_distance(km);

    if format.is_json() {
        return print_json(&json!({ "distance_km": km, "label": label }));
    }

    println!("{label}");
    Ok(())
}
