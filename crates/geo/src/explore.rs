//! Explore page search: text matching combined with an optional radius.

use crate::nearby::Locatable;
use crate::{format_distance, haversine_distance, Coordinate, TravelPost};
use serde::Serialize;
use std::cmp::Ordering;

/// What the explore page is asking for.
#[derive(Debug, Clone, Default)]
pub struct ExploreQuery {
    /// Case-insensitive substring matched against caption, place name and tags
    pub text: Option<String>,
    /// Origin and radius in kilometers
    pub near: Option<(Coordinate, f64)>,
    /// Order results closest first instead of keeping feed order
    pub sort_by_distance: bool,
}

impl ExploreQuery {
    /// Query matching every post.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to posts mentioning `text`.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Restrict to posts within `radius_km` of `origin`.
    #[must_use]
    pub fn near(mut self, origin: Coordinate, radius_km: f64) -> Self {
        self.near = Some((origin, radius_km));
        self
    }

    /// Sort hits closest first.
    #[must_use]
    pub fn sorted_by_distance(mut self) -> Self {
        self.sort_by_distance = true;
        self
    }
}

/// A post that matched an explore query.
#[derive(Debug, Clone, Serialize)]
pub struct ExploreHit<'a> {
    /// The matched post
    pub post: &'a TravelPost,
    /// Distance from the query origin, when both sides have a position
    pub distance_km: Option<f64>,
    /// `distance_km` rendered for display
    pub distance_label: Option<String>,
}

/// Runs an explore query over a feed of posts.
///
/// Text and radius constraints combine with AND. Without a `near` clause,
/// unlocated posts remain eligible; with one, they are excluded.
pub fn explore<'a>(posts: &'a [TravelPost], query: &ExploreQuery) -> Vec<ExploreHit<'a>> {
    let needle = query.text.as_deref().map(|t| t.trim().to_lowercase());

    let mut hits: Vec<ExploreHit<'a>> = posts
        .iter()
        .filter(|post| needle.as_deref().is_none_or(|n| matches_text(post, n)))
        .filter_map(|post| match query.near {
            Some((origin, radius_km)) => {
                let d = haversine_distance(&origin, &post.coordinate()?);
                (d <= radius_km).then(|| hit(post, Some(d)))
            }
            None => Some(hit(post, None)),
        })
        .collect();

    if query.sort_by_distance {
        hits.sort_by(|a, b| match (a.distance_km, b.distance_km) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    hits
}

fn hit(post: &TravelPost, distance_km: Option<f64>) -> ExploreHit<'_> {
    ExploreHit {
        post,
        distance_km,
        distance_label: distance_km.map(format_distance),
    }
}

fn matches_text(post: &TravelPost, needle: &str) -> bool {
    post.caption.to_lowercase().contains(needle)
        || post
            .location_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle))
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
