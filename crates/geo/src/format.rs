//! Human-readable distance labels.

/// Renders a distance in kilometers as the label shown next to a post.
///
/// - under 1 km: whole meters, `"500m"`
/// - under 10 km: one decimal, `"3.4km"`
/// - otherwise: whole kilometers, `"15km"`
///
/// Rounding is half away from zero, so `9.95` becomes `"10.0km"`.
///
/// # Example
/// ```
/// use wanderlust_geo::format_distance;
///
/// assert_eq!(format_distance(0.5), "500m");
/// assert_eq!(format_distance(1.0), "1.0km");
/// assert_eq!(format_distance(15.4), "15km");
/// ```
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else if km < 10.0 {
        format!("{:.1}km", (km * 10.0).round() / 10.0)
    } else {
        format!("{}km", km.round() as i64)
    }
}
