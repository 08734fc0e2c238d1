//! Posts within a radius of an origin

use super::{load_posts, App};
use crate::args::OriginArgs;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;
use wanderlust_cli::{format_count, print_json, Status};
use wanderlust_geo::{format_distance, nearby_with_distance, sort_by_distance, TravelPost};
use wanderlust_locate::format_coordinate;

#[derive(Debug, Serialize)]
struct NearbyRow<'a> {
    #[serde(flatten)]
    post: &'a TravelPost,
    distance_km: f64,
    distance_label: String,
}

pub struct NearbyArgs<'a> {
    pub posts: &'a Path,
    pub origin: &'a OriginArgs,
    pub radius_km: f64,
    pub sort: bool,
    pub limit: Option<usize>,
}

pub async fn run(app: &App, args: NearbyArgs<'_>) -> Result<()> {
    let posts = load_posts(args.posts)?;
    let origin = app.resolve(&args.origin.require()?).await?;

    let mut hits = nearby_with_distance(&posts, &origin, args.radius_km);
    if args.sort {
        sort_by_distance(&mut hits);
    }
    if let Some(limit) = args.limit {
        hits.truncate(limit);
    }

    if app.format.is_json() {
        let rows: Vec<NearbyRow<'_>> = hits
            .iter()
            .map(|hit| NearbyRow {
                post: hit.item,
                distance_km: hit.distance_km,
                distance_label: format_distance(hit.distance_km),
            })
            .collect();
        return print_json(&rows);
    }

    let unlocated = posts.iter().filter(|p| p.coordinate.is_none()).count();
    if unlocated > 0 {
        Status::warning(&format!("Skipped {} without a location", format_count(unlocated, "post", "posts")));
    }

    Status::header(&format!(
        "{} within {} of {}",
        format_count(hits.len(), "post", "posts"),
        format_distance(args.radius_km),
        format_coordinate(origin.latitude, origin.longitude)
    ));

    for hit in &hits {
        let post = hit.item;
        let place = post
            .location_name
            .as_deref()
            .map(|name| format!(" ({name})"))
            .unwrap_or_default();
        println!(
            "{:>8}  {}{}",
            format_distance(hit.distance_km).cyan(),
            post.caption,
            place.dimmed()
        );
    }

    Ok(())
}
