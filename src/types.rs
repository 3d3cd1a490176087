use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A validated geographic position in degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180]. The only
/// ways to obtain a `Coordinate` are [`Coordinate::new`], [`Coordinate::parse`] and
/// deserialization, all of which reject out-of-range or non-finite input instead of clamping it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ValidationError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::LatitudeOutOfRange`] if `latitude` is not a finite value in [-90, 90]
    /// - [`ValidationError::LongitudeOutOfRange`] if `longitude` is not a finite value in [-180, 180]
    ///
    /// # Example
    ///
    /// ```
    /// use aurora_advisor::Coordinate;
    ///
    /// let tromso = Coordinate::new(69.6492, 18.9553).unwrap();
    /// assert_eq!(tromso.latitude(), 69.6492);
    /// assert!(Coordinate::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        validate_latitude(latitude)?;
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange);
        }
        Ok(Self { latitude, longitude })
    }

    /// Parses a coordinate from free-form text fields, as typed into a manual entry form.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NotNumeric`] if either field is not a number, otherwise the
    /// same range errors as [`Coordinate::new`].
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, ValidationError> {
        let lat = latitude
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::NotNumeric { field: "latitude" })?;
        let lon = longitude
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::NotNumeric { field: "longitude" })?;
        Self::new(lat, lon)
    }

    /// Wraps compile-time data known to be in range, skipping validation.
    pub(crate) const fn from_trusted(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Latitude in degrees, positive north.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, positive east.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.2}° {}, {:.2}° {}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// Checks that a bare latitude lies in [-90, 90].
pub(crate) fn validate_latitude(latitude: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange);
    }
    Ok(())
}

/// A planetary geomagnetic activity index (Kp-like).
///
/// Conventionally in [0, 9], but values reported by the feed are accepted as-is;
/// only NaN and infinities are rejected. Formulas built on the index clamp their
/// outputs, never the index itself.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ActivityIndex(f64);

impl ActivityIndex {
    /// Lower end of the conventional Kp scale.
    pub const MIN: f64 = 0.0;
    /// Upper end of the conventional Kp scale.
    pub const MAX: f64 = 9.0;

    /// Wraps a raw index value.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NonFiniteActivityIndex`] if `value` is NaN or infinite.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteActivityIndex);
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            log::warn!("activity index {value} is outside the conventional 0-9 scale");
        }
        Ok(Self(value))
    }

    /// The raw index value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ActivityIndex {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActivityIndex> for f64 {
    fn from(index: ActivityIndex) -> Self {
        index.0
    }
}

impl fmt::Display for ActivityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
