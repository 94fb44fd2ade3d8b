//! Geographic coordinate module
//!
//! Provides the [`GeoPoint`] position type, the 7-decimal canonicalisation
//! used to detect overlapping markers, and the distance approximation used by
//! the reference-radius filter.

mod types;

pub use types::{
    round_to, CoordError, GeoPoint, COORD_DECIMALS, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG,
};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Calculates the great-circle distance between two points.
///
/// Uses the haversine formula. Good enough for a "within N miles" marker
/// filter; this is not a routing distance.
///
/// # Returns
///
/// Distance in statute miles.
///
/// # Example
///
/// ```
/// use markermap::coord::{distance_miles, GeoPoint};
///
/// // One degree of latitude is roughly 69 miles
/// let d = distance_miles(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(1.0, 0.0));
/// assert!((d - 69.1).abs() < 0.5);
/// ```
pub fn distance_miles(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1_rad = from.lat * DEG_TO_RAD;
    let lat2_rad = to.lat * DEG_TO_RAD;
    let delta_lat = (to.lat - from.lat) * DEG_TO_RAD;
    let delta_lng = (to.lng - from.lng) * DEG_TO_RAD;

    // Haversine formula
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_MILES * c
}
