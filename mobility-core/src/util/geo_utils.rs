use geo::{Distance, HaversineMeasure, Point};

/// spherical earth radius used for all great-circle distances, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// computes the great-circle distance between two points over a spherical
/// earth of radius [`EARTH_RADIUS_METERS`].
///
/// # Arguments
///
/// * `src` - origin point, with x=longitude and y=latitude in decimal degrees
/// * `dst` - destination point, with x=longitude and y=latitude in decimal degrees
///
/// # Returns
///
/// * the distance in meters
pub fn haversine_distance(src: Point<f64>, dst: Point<f64>) -> f64 {
    HaversineMeasure::new(EARTH_RADIUS_METERS).distance(src, dst)
}
