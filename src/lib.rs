//! # Aurora Advisor
//!
//! Estimation engine behind an aurora-viewing advisor: given an observer's position and
//! the current planetary geomagnetic activity index (Kp), it answers "how likely am I to
//! see aurora here, and how dark is my sky?"
//!
//! The models are intentionally simple heuristics, not physics:
//!
//! - **Visibility** follows a piecewise function of distance from an oval boundary
//!   at `67° - 3°·Kp` of geographic latitude ([`visibility_chance`]).
//! - **Sky darkness** sums inverse-square contributions from a catalog of population
//!   centers within 300 km, and suggests darker directions when the sky is bright
//!   ([`estimate_light_pollution`]).
//! - **Oval rings** for both hemispheres are produced as plain `(longitude, latitude)`
//!   rings or GeoJSON ([`generate_oval_geometry`]).
//! - **Synthetic series** jitter the current index for charting. This is a stand-in, not
//!   a forecast ([`simulate_forecast`]).
//!
//! Acquiring the user's location, fetching the live index feed and rendering anything are
//! left to the caller.
//!
//! ## Basic Usage
//!
//! ```
//! use aurora_advisor::{advise, ActivityIndex, Coordinate, VisibilityOutlook};
//!
//! // Tromsø during a moderate storm
//! let here = Coordinate::new(69.6492, 18.9553).unwrap();
//! let kp = ActivityIndex::new(5.0).unwrap();
//!
//! let advisory = advise(&here, kp);
//! assert_eq!(advisory.base_latitude, 52.0);
//! assert_eq!(advisory.outlook, VisibilityOutlook::High);
//! println!("{:.0}% chance, sky: {}", advisory.visibility_chance, advisory.light_pollution.level);
//! ```
//!
//! ## Light pollution
//!
//! ```
//! use aurora_advisor::{estimate_light_pollution, Coordinate, PollutionLevel};
//!
//! let manhattan = Coordinate::new(40.7128, -74.0060).unwrap();
//! let estimate = estimate_light_pollution(&manhattan);
//! assert_eq!(estimate.level, PollutionLevel::Severe);
//! assert_eq!(estimate.nearest_source.unwrap().name, "New York");
//! if let Some(hint) = estimate.travel_hint {
//!     println!("{hint}");
//! }
//! ```
//!
//! ## Concurrency
//!
//! Every operation is a synchronous, pure function of its arguments. The built-in
//! [`LightSourceCatalog::global`] is initialized once and never mutated, so it can be
//! shared freely between threads.

use serde::Serialize;
use thiserror::Error;

pub mod aurora;
pub mod catalog;
pub mod forecast;
pub mod geo;
mod math;
pub mod oval;
pub mod pollution;
mod types;


pub use aurora::{oval_base_latitude, visibility_chance, visibility_chance_at, ActivityLevel, VisibilityOutlook};
pub use catalog::{CatalogError, LightSource, LightSourceCatalog};
pub use forecast::{ForecastSample, ForecastSettings, ForecastSimulator, UniformSource};
pub use geo::{destination, distance_km, CompassDirection, EARTH_RADIUS_KM};
pub use oval::{generate_oval_geometry, HemisphereOvals, OvalGeometry};
pub use pollution::{NearestSource, PollutionEstimate, PollutionEstimator, PollutionLevel, TravelHint};
pub use types::{ActivityIndex, Coordinate};

/// Estimates sky darkness at `coordinate` against the built-in catalog.
///
/// Use [`PollutionEstimator::new`] to estimate against a different catalog.
pub fn estimate_light_pollution(coordinate: &Coordinate) -> PollutionEstimate {
    PollutionEstimator::default().estimate(coordinate)
}

/// Simulates an hourly index series around `current`.
///
/// The series is synthetic noise, not a forecast.
///
/// # Errors
///
/// [`ValidationError::VariationOutOfRange`] if `settings.variation` is negative or not finite.
///
/// # Example
///
/// ```
/// use aurora_advisor::{simulate_forecast, ActivityIndex, ForecastSettings};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let kp = ActivityIndex::new(4.0).unwrap();
/// let series = simulate_forecast(kp, ForecastSettings::default(), &mut StdRng::seed_from_u64(1)).unwrap();
/// assert_eq!(series.len(), 24);
/// assert!(series.iter().all(|s| (0.0..=9.0).contains(&s.predicted_index)));
/// ```
pub fn simulate_forecast<S>(
    current: ActivityIndex,
    settings: ForecastSettings,
    source: &mut S,
) -> Result<Vec<ForecastSample>, ValidationError>
where
    S: UniformSource + ?Sized,
{
    Ok(ForecastSimulator::new(settings)?.simulate(current, source))
}

/// Everything the advisor reports for one observer and one activity reading.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Advisory {
    pub activity_index: ActivityIndex,
    pub activity_level: ActivityLevel,
    /// Oval boundary latitude for the index (degrees, unclamped)
    pub base_latitude: f64,
    /// Percentage chance of visible aurora, 0 to 100
    pub visibility_chance: f64,
    pub outlook: VisibilityOutlook,
    pub light_pollution: PollutionEstimate,
}

/// Builds a full [`Advisory`] using the built-in catalog.
pub fn advise(coordinate: &Coordinate, index: ActivityIndex) -> Advisory {
    advise_with(&PollutionEstimator::default(), coordinate, index)
}

/// Builds a full [`Advisory`] using the given estimator's catalog.
pub fn advise_with(estimator: &PollutionEstimator<'_>, coordinate: &Coordinate, index: ActivityIndex) -> Advisory {
    let visibility_chance = visibility_chance_at(index, coordinate);
    Advisory {
        activity_index: index,
        activity_level: ActivityLevel::from_index(index),
        base_latitude: oval_base_latitude(index),
        visibility_chance,
        outlook: VisibilityOutlook::from_chance(visibility_chance),
        light_pollution: estimator.estimate(coordinate),
    }
}

/// Errors raised when caller input cannot be represented.
///
/// Inputs are rejected rather than clamped; the only clamps in the crate are applied to
/// computed outputs.
///
/// # Variants
///
/// - `LatitudeOutOfRange`: Latitude must be a finite value in [-90, 90] degrees
/// - `LongitudeOutOfRange`: Longitude must be a finite value in [-180, 180] degrees
/// - `NonFiniteActivityIndex`: Activity index must not be NaN or infinite
/// - `VariationOutOfRange`: Forecast variation must be finite and ≥ 0
/// - `WeightOutOfRange`: Light source weight must be finite and > 0
/// - `NonFiniteBearing`: Travel bearing must not be NaN or infinite
/// - `NonFiniteDistance`: Travel distance must not be NaN or infinite
/// - `NotNumeric`: A text field could not be parsed as a number
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Latitude outside [-90, 90] degrees, or not finite
    #[error("Latitude out of range")]
    LatitudeOutOfRange,

    /// Longitude outside [-180, 180] degrees, or not finite
    #[error("Longitude out of range")]
    LongitudeOutOfRange,

    /// Activity index is NaN or infinite
    #[error("Activity index is not finite")]
    NonFiniteActivityIndex,

    /// Forecast variation negative or not finite
    #[error("Variation out of range")]
    VariationOutOfRange,

    /// Light source weight not strictly positive, or not finite
    #[error("Weight out of range")]
    WeightOutOfRange,

    /// Travel bearing is NaN or infinite
    #[error("Bearing is not finite")]
    NonFiniteBearing,

    /// Travel distance is NaN or infinite
    #[error("Distance is not finite")]
    NonFiniteDistance,

    /// Text input that should have been a number
    #[error("{field} is not a number")]
    NotNumeric {
        /// Name of the offending field
        field: &'static str,
    },
}
