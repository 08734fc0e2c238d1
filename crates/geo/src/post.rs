//! Travel posts as read from the posts table.
//!
//! Rows are validated once here so the filtering code downstream can rely on
//! a well-formed, optional coordinate.

use crate::location::{as_number, parse_location};
use crate::{Coordinate, GeoError, Locatable, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A travel post, reduced to the fields the geo features read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPost {
    /// Post ID
    pub id: String,
    /// Author's user ID
    pub author_id: String,
    /// Free-text caption
    #[serde(default)]
    pub caption: String,
    /// Place name typed or geocoded when the post was created
    #[serde(default)]
    pub location_name: Option<String>,
    /// Where the post was taken, if known
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    /// Hashtags without the leading `#`
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TravelPost {
    /// Builds a post from a raw database row.
    ///
    /// The coordinate is taken from a `location` column (GeoJSON, WKT or a
    /// lat/lng object) or from separate `latitude`/`longitude` columns.
    /// A row with only one of the two columns, or with out-of-range values,
    /// is rejected rather than silently treated as unlocated.
    pub fn from_row(row: &Value) -> Result<Self> {
        let id = string_field(row, "id")?.ok_or(GeoError::MissingField("id"))?;
        let author_id = string_field(row, "author_id")?
            .or(string_field(row, "user_id")?)
            .ok_or(GeoError::MissingField("author_id"))?;

        let coordinate = match row.get("location") {
            Some(location) if !location.is_null() => parse_location(location)?,
            _ => column_coordinate(row)?,
        };

        let tags = match row.get("tags") {
            Some(Value::Array(tags)) => tags
                .iter()
                .filter_map(Value::as_str)
                .map(|t| t.trim_start_matches('#').to_string())
                .collect(),
            _ => Vec::new(),
        };

        let created_at = row
            .get("created_at")
            .and_then(Value::as_str)
            .map(|s| {
                DateTime::parse_from_rfc3339(s)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| GeoError::InvalidValue(format!("Invalid created_at {s}: {e}")))
            })
            .transpose()?;

        Ok(Self {
            id,
            author_id,
            caption: string_field(row, "caption")?.unwrap_or_default(),
            location_name: string_field(row, "location_name")?.filter(|s| !s.trim().is_empty()),
            coordinate,
            tags,
            created_at,
        })
    }

    /// Builds posts from a JSON array of rows, failing on the first bad row.
    pub fn from_rows(rows: &Value) -> Result<Vec<Self>> {
        rows.as_array()
            .ok_or_else(|| GeoError::InvalidValue("Expected an array of rows".into()))?
            .iter()
            .map(Self::from_row)
            .collect()
    }
}

impl Locatable for TravelPost {
    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

fn column_coordinate(row: &Value) -> Result<Option<Coordinate>> {
    let lat = row.get("latitude").filter(|v| !v.is_null());
    let lng = row.get("longitude").filter(|v| !v.is_null());

    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let lat = as_number(lat).ok_or_else(|| GeoError::InvalidCoordinate(format!("Invalid latitude: {lat}")))?;
            let lng = as_number(lng).ok_or_else(|| GeoError::InvalidCoordinate(format!("Invalid longitude: {lng}")))?;
            Coordinate::try_new(lat, lng).map(Some)
        }
        (Some(_), None) => Err(GeoError::MissingField("longitude")),
        (None, Some(_)) => Err(GeoError::MissingField("latitude")),
    }
}

/// Ids may be uuids or integers depending on the table.
fn string_field(row: &Value, name: &str) -> Result<Option<String>> {
    match row.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(GeoError::InvalidValue(format!("Field {name} has unexpected value {other}"))),
    }
}
