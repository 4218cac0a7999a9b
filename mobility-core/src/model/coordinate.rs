use super::CoreError;
use crate::util::geo_utils;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a WGS84 position expressed as latitude/longitude in decimal degrees.
/// conversions to [`geo::Point`] follow the geo convention of x=longitude, y=latitude.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    /// creates a coordinate, failing if either value falls outside of the valid
    /// range of decimal degrees.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Coordinate, CoreError> {
        if !(-90.0..=90.0).contains(&latitude) {
            Err(CoreError::InvalidLatitude(latitude))
        } else if !(-180.0..=180.0).contains(&longitude) {
            Err(CoreError::InvalidLongitude(longitude))
        } else {
            Ok(Coordinate {
                latitude,
                longitude,
            })
        }
    }

    /// great-circle distance in meters to another coordinate
    pub fn haversine_to(&self, other: &Coordinate) -> f64 {
        geo_utils::haversine_distance(self.into(), other.into())
    }
}

impl From<(f64, f64)> for Coordinate {
    /// builds a coordinate from a (latitude, longitude) pair
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }
}

impl From<&Coordinate> for Point<f64> {
    fn from(value: &Coordinate) -> Self {
        Point::new(value.longitude, value.latitude)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(value: Point<f64>) -> Self {
        Coordinate {
            latitude: value.y(),
            longitude: value.x(),
        }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.latitude, self.longitude)
    }
}
