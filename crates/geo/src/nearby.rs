//! Radius filtering over anything that may carry a coordinate.

use crate::{haversine_distance, Coordinate};
use std::cmp::Ordering;

/// Something that may have a position on the map.
///
/// Returning `None` keeps the item out of every nearby result; it is never
/// treated as sitting at the origin.
pub trait Locatable {
    /// The item's coordinate, if it has one.
    fn coordinate(&self) -> Option<Coordinate>;
}

impl Locatable for Coordinate {
    fn coordinate(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

impl Locatable for Option<Coordinate> {
    fn coordinate(&self) -> Option<Coordinate> {
        *self
    }
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }
}

/// An item that passed a nearby filter, with its distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearby<'a, T> {
    /// The matched item
    pub item: &'a T,
    /// Great-circle distance from the origin in kilometers
    pub distance_km: f64,
}

/// Keeps the items within `radius_km` of `origin`, in input order.
///
/// The boundary is inclusive and items without a coordinate are dropped.
///
/// # Example
/// ```
/// use wanderlust_geo::{filter_nearby, Coordinate};
///
/// let rome = Coordinate::new(41.9028, 12.4964);
/// let items = vec![Some(Coordinate::new(41.8902, 12.4922)), None];
///
/// assert_eq!(filter_nearby(&items, &rome, 5.0).len(), 1);
/// ```
pub fn filter_nearby<'a, T: Locatable>(items: &'a [T], origin: &Coordinate, radius_km: f64) -> Vec<&'a T> {
    nearby_with_distance(items, origin, radius_km)
        .into_iter()
        .map(|hit| hit.item)
        .collect()
}

/// Same selection as [`filter_nearby`], also reporting each distance.
pub fn nearby_with_distance<'a, T: Locatable>(
    items: &'a [T],
    origin: &Coordinate,
    radius_km: f64,
) -> Vec<Nearby<'a, T>> {
    items
        .iter()
        .filter_map(|item| {
            let coord = item.coordinate()?;
            let distance_km = haversine_distance(origin, &coord);
            (distance_km <= radius_km).then_some(Nearby { item, distance_km })
        })
        .collect()
}

/// Stable sort, closest first.
pub fn sort_by_distance<T>(hits: &mut [Nearby<'_, T>]) {
    hits.sort_by(|a, b| a.distance_km.partial_cmp(&b.distance_km).unwrap_or(Ordering::Equal));
}
