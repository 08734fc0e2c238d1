//! Argument types shared by several subcommands

use anyhow::{bail, Result};
use clap::Args;
use wanderlust_geo::Coordinate;
use wanderlust_locate::Origin;

/// Parse `"lat,lon"` into a validated coordinate
pub fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {raw:?}"))?;

    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("latitude is not a number: {:?}", lat.trim()))?;
    let longitude: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("longitude is not a number: {:?}", lon.trim()))?;

    Coordinate::try_new(latitude, longitude).map_err(|e| e.to_string())
}

/// Parse a non-negative, finite number of kilometers
pub fn parse_km(raw: &str) -> Result<f64, String> {
    let km: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("not a number: {raw:?}"))?;

    if !km.is_finite() || km < 0.0 {
        return Err(format!("expected a non-negative number of kilometers, got {raw}"));
    }

    Ok(km)
}

/// Where to centre a search
#[derive(Debug, Clone, Args)]
#[group(multiple = false)]
pub struct OriginArgs {
    /// Explicit origin as LAT,LON
    #[arg(long, value_name = "LAT,LON", value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub at: Option<Coordinate>,

    /// Place name to geocode as the origin
    #[arg(long, value_name = "NAME")]
    pub place: Option<String>,

    /// Use the current position
    #[arg(long)]
    pub here: bool,
}

impl OriginArgs {
    /// The origin picked on the command line, if any
    pub fn origin(&self) -> Option<Origin> {
        if let Some(at) = self.at {
            Some(Origin::At(at))
        } else if let Some(place) = &self.place {
            Some(Origin::Place(place.clone()))
        } else if self.here {
            Some(Origin::Here)
        } else {
            None
        }
    }

    /// Like [`OriginArgs::origin`], failing when none was given
    pub fn require(&self) -> Result<Origin> {
        match self.origin() {
            Some(origin) => Ok(origin),
            None => bail!("an origin is required: pass --at LAT,LON, --place NAME or --here"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("48.8566,2.3522").unwrap(), Coordinate::new(48.8566, 2.3522));
        assert_eq!(parse_coordinate(" -33.8688 , 151.2093 ").unwrap(), Coordinate::new(-33.8688, 151.2093));
    }

    #[test]
    fn test_parse_coordinate_rejects_garbage() {
        assert!(parse_coordinate("48.8566").is_err());
        assert!(parse_coordinate("north,2.35").is_err());
        assert!(parse_coordinate("48.85,east").is_err());
        assert!(parse_coordinate("95.0,2.35").is_err());
        assert!(parse_coordinate("48.85,181").is_err());
    }

    #[test]
    fn test_parse_km() {
        assert_eq!(parse_km("0").unwrap(), 0.0);
        assert_eq!(parse_km("2.5").unwrap(), 2.5);
        assert!(parse_km("-1").is_err());
        assert!(parse_km("inf").is_err());
        assert!(parse_km("NaN").is_err());
        assert!(parse_km("far").is_err());
    }

    #[test]
    fn test_origin_precedence() {
        let args = OriginArgs {
            at: None,
            place: Some("Hanoi".into()),
            here: false,
        };
        assert_eq!(args.origin(), Some(Origin::Place("Hanoi".into())));

        let none = OriginArgs {
            at: None,
            place: None,
            here: false,
        };
        assert!(none.origin().is_none());
        assert!(none.require().is_err());
    }
}
