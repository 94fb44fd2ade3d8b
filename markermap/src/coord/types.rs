//! Coordinate type definitions

use std::fmt;

use thiserror::Error;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;

/// Number of decimal places used when comparing marker positions.
pub const COORD_DECIMALS: u32 = 7;

/// A geographic position in decimal degrees.
///
/// Mirrors the `{ lat, lng }` objects carried in the backend's
/// `Geo_Location` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point without range validation.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a point, rejecting out-of-range or non-finite values.
    pub fn checked(lat: f64, lng: f64) -> Result<Self, CoordError> {
        if !lat.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !lng.is_finite() || !(MIN_LNG..=MAX_LNG).contains(&lng) {
            return Err(CoordError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Returns this point rounded to [`COORD_DECIMALS`] places on both axes.
    #[inline]
    pub fn rounded(&self) -> Self {
        Self {
            lat: round_to(self.lat, COORD_DECIMALS),
            lng: round_to(self.lng, COORD_DECIMALS),
        }
    }

    /// Returns a copy shifted by the given deltas, in degrees.
    #[inline]
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lng: self.lng + d_lng,
        }
    }

    /// Canonical string key for occupancy lookups.
    ///
    /// Two points produce the same key iff they are equal after rounding to
    /// [`COORD_DECIMALS`] places.
    pub fn canonical_key(&self) -> String {
        let p = self.rounded();
        // `+ 0.0` folds negative zero so "-0.0000000" never appears
        format!(
            "{:.prec$},{:.prec$}",
            p.lat + 0.0,
            p.lng + 0.0,
            prec = COORD_DECIMALS as usize
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lat, self.lng)
    }
}

/// Rounds a value to `decimals` decimal places, half away from zero.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Errors that can occur when constructing a checked coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is outside valid range (-90.0 to 90.0)
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),
}
