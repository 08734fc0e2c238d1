//! Explore search over a feed of posts

use super::{load_posts, App};
use crate::args::OriginArgs;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;
use wanderlust_cli::{format_count, print_json, Status};
use wanderlust_geo::{explore, ExploreQuery};

pub struct ExploreArgs<'a> {
    pub posts: &'a Path,
    pub text: Option<&'a str>,
    pub origin: &'a OriginArgs,
    pub radius_km: f64,
    pub sort: bool,
}

pub async fn run(app: &App, args: ExploreArgs<'_>) -> Result<()> {
    let posts = load_posts(args.posts)?;

    let mut query = ExploreQuery::new();
    if let Some(text) = args.text {
        query = query.with_text(text);
    }
    if let Some(origin) = args.origin.origin() {
        let origin = app.resolve(&origin).await?;
        query = query.near(origin, args.radius_km);
    }
    if args.sort {
        query = query.sorted_by_distance();
    }

    let hits = explore(&posts, &query);

    if app.format.is_json() {
        return print_json(&hits);
    }

    Status::header(&format_count(hits.len(), "match", "matches"));
    for hit in &hits {
        let label = hit.distance_label.as_deref().unwrap_or("-");
        let tags = hit
            .post
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{:>8}  {}  {}", label.cyan(), hit.post.caption, tags.dimmed());
    }

    Ok(())
}
