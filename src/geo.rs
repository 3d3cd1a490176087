//! Spherical geometry on a mean-radius Earth.
//!
//! Both functions treat the Earth as a sphere of radius [`EARTH_RADIUS_KM`]. That is
//! more than accurate enough for the coarse proximity heuristics built on top of them.

use core::fmt;

use serde::Serialize;

use crate::math::{normalize_degrees_360, normalize_longitude_180};
use crate::types::Coordinate;
use crate::ValidationError;

// ============================================================================
// Constants
// ============================================================================

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// ============================================================================
// Great-circle math
// ============================================================================

/// Great-circle distance between two coordinates in kilometers (haversine formula).
///
/// The result is symmetric in its arguments and zero when both points coincide.
///
/// # Example
///
/// ```
/// use aurora_advisor::{distance_km, Coordinate};
///
/// let london = Coordinate::new(51.5074, -0.1278).unwrap();
/// let paris = Coordinate::new(48.8566, 2.3522).unwrap();
/// let d = distance_km(&london, &paris);
/// assert!((d - 343.5).abs() < 1.0);
/// ```
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Solves the spherical direct problem.
///
/// Returns the point reached by travelling `distance_km` kilometers from `origin`
/// along the initial bearing `bearing_deg` (0° = North, increasing clockwise).
/// The longitude of the result is wrapped into [-180, 180] so the result is always
/// a valid [`Coordinate`].
///
/// # Errors
///
/// - [`ValidationError::NonFiniteBearing`] if `bearing_deg` is NaN or infinite
/// - [`ValidationError::NonFiniteDistance`] if `distance_km` is NaN or infinite
///
/// # Example
///
/// ```
/// use aurora_advisor::{destination, Coordinate};
///
/// let equator = Coordinate::new(0.0, 0.0).unwrap();
/// let east = destination(&equator, 90.0, 111.19492664455873).unwrap();
/// assert!((east.longitude() - 1.0).abs() < 1e-9);
/// assert!(destination(&equator, f64::NAN, 50.0).is_err());
/// ```
pub fn destination(origin: &Coordinate, bearing_deg: f64, distance_km: f64) -> Result<Coordinate, ValidationError> {
    if !bearing_deg.is_finite() {
        return Err(ValidationError::NonFiniteBearing);
    }
    if !distance_km.is_finite() {
        return Err(ValidationError::NonFiniteDistance);
    }

    let bearing = bearing_deg.to_radians();
    let lat1 = origin.latitude().to_radians();
    let lon1 = origin.longitude().to_radians();
    let angular = distance_km / EARTH_RADIUS_KM;

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_ang, cos_ang) = angular.sin_cos();

    let lat2 = (sin_lat1 * cos_ang + cos_lat1 * sin_ang * bearing.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lon2 = lon1 + (bearing.sin() * sin_ang * cos_lat1).atan2(cos_ang - sin_lat1 * lat2.sin());

    let latitude = lat2.to_degrees().clamp(-90.0, 90.0);
    let longitude = normalize_longitude_180(lon2.to_degrees());

    Coordinate::new(latitude, longitude)
}

// ============================================================================
// Compass directions
// ============================================================================

/// The eight cardinal and intercardinal compass directions, clockwise from North.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CompassDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl CompassDirection {
    /// All eight directions in clockwise order, starting at North.
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::North,
        CompassDirection::Northeast,
        CompassDirection::East,
        CompassDirection::Southeast,
        CompassDirection::South,
        CompassDirection::Southwest,
        CompassDirection::West,
        CompassDirection::Northwest,
    ];

    /// Nearest compass direction for a bearing in degrees.
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let sector = (normalize_degrees_360(bearing_deg) / 45.0).round() as usize % 8;
        Self::ALL[sector]
    }

    /// Bearing of this direction in degrees.
    pub fn bearing(self) -> f64 {
        45.0 * self as u8 as f64
    }

    pub fn name(self) -> &'static str {
        match self {
            CompassDirection::North => "North",
            CompassDirection::Northeast => "Northeast",
            CompassDirection::East => "East",
            CompassDirection::Southeast => "Southeast",
            CompassDirection::South => "South",
            CompassDirection::Southwest => "Southwest",
            CompassDirection::West => "West",
            CompassDirection::Northwest => "Northwest",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
