//! Sky-darkness estimation from proximity to weighted light sources.
//!
//! Every catalog source closer than [`CUTOFF_DISTANCE_KM`] contributes
//! `weight * 100 / (d² + 1)` where `d` is the great-circle distance in kilometers.
//! The "+1" keeps the term finite at `d = 0` and caps a single source at `weight * 100`.
//! Contributions are summed and clamped to [0, 100].
//!
//! When the result is bright enough to spoil aurora viewing, the estimator probes
//! eight compass directions at [`SEARCH_DISTANCE_KM`] and reports those that are
//! meaningfully darker.

use core::fmt;

use serde::Serialize;

use crate::catalog::{LightSource, LightSourceCatalog};
use crate::geo::{destination, distance_km, CompassDirection};
use crate::types::Coordinate;

// ============================================================================
// Constants
// ============================================================================

/// Sources at or beyond this distance contribute nothing (kilometers)
pub const CUTOFF_DISTANCE_KM: f64 = 300.0;

/// How far out the directional search probes (kilometers)
pub const SEARCH_DISTANCE_KM: f64 = 50.0;

/// Aggregate value at which the directional search is triggered
pub const SEARCH_THRESHOLD: f64 = 60.0;

/// Minimum drop in value for a direction to count as darker
pub const MIN_IMPROVEMENT: f64 = 20.0;

const MAX_VALUE: f64 = 100.0;

// ============================================================================
// Output types
// ============================================================================

/// Qualitative sky-darkness class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PollutionLevel {
    Excellent,
    Good,
    Moderate,
    High,
    Severe,
}

impl PollutionLevel {
    /// Classifies an aggregate value: <10 Excellent, <30 Good, <60 Moderate, <80 High, else Severe.
    pub fn from_value(value: f64) -> Self {
        if value < 10.0 {
            PollutionLevel::Excellent
        } else if value < 30.0 {
            PollutionLevel::Good
        } else if value < 60.0 {
            PollutionLevel::Moderate
        } else if value < 80.0 {
            PollutionLevel::High
        } else {
            PollutionLevel::Severe
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PollutionLevel::Excellent => "Dark sky site, perfect for aurora viewing. Milky Way clearly visible.",
            PollutionLevel::Good => "Low light pollution. Aurora should be clearly visible when active.",
            PollutionLevel::Moderate => "Moderate light pollution. Aurora visible during strong activity.",
            PollutionLevel::High => "High light pollution. Aurora may be faint or difficult to see.",
            PollutionLevel::Severe => "Severe light pollution. Aurora unlikely to be visible.",
        }
    }

    /// Display colour as a hex RGB string.
    pub fn color(self) -> &'static str {
        match self {
            PollutionLevel::Excellent => "#4caf50",
            PollutionLevel::Good => "#8bc34a",
            PollutionLevel::Moderate => "#ffc107",
            PollutionLevel::High => "#ff9800",
            PollutionLevel::Severe => "#f44336",
        }
    }
}

impl fmt::Display for PollutionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PollutionLevel::Excellent => "Excellent",
            PollutionLevel::Good => "Good",
            PollutionLevel::Moderate => "Moderate",
            PollutionLevel::High => "High",
            PollutionLevel::Severe => "Severe",
        };
        f.write_str(name)
    }
}

/// The closest contributing light source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NearestSource {
    pub name: String,
    pub distance_km: f64,
}

/// Advice on where to find a darker sky.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TravelHint {
    /// Directions in which the sky 50 km out is meaningfully darker, clockwise from North
    Directions(Vec<CompassDirection>),
    /// No probed direction was darker enough
    AwayFromUrbanAreas,
}

impl fmt::Display for TravelHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelHint::Directions(directions) => {
                f.write_str("Consider traveling ")?;
                for (i, direction) in directions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    f.write_str(direction.name())?;
                }
                f.write_str(" for better aurora visibility.")
            }
            TravelHint::AwayFromUrbanAreas => f.write_str(
                "Consider traveling at least 50km away from urban areas for better aurora visibility.",
            ),
        }
    }
}

/// Sky-darkness estimate for one location.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PollutionEstimate {
    /// Clamped aggregate rounded to the nearest integer, 0 (dark) to 100 (bright)
    pub value: u8,
    pub level: PollutionLevel,
    pub description: &'static str,
    /// Closest source within the cutoff, if any
    pub nearest_source: Option<NearestSource>,
    /// Present only when the aggregate reaches [`SEARCH_THRESHOLD`]
    pub travel_hint: Option<TravelHint>,
}

// ============================================================================
// Estimator
// ============================================================================

/// Estimates light pollution against a fixed catalog.
///
/// The estimator only borrows the catalog, so any number of estimators (and threads)
/// can share one catalog without coordination.
#[derive(Copy, Clone, Debug)]
pub struct PollutionEstimator<'c> {
    catalog: &'c LightSourceCatalog,
}

impl Default for PollutionEstimator<'static> {
    fn default() -> Self {
        Self::new(LightSourceCatalog::global())
    }
}

struct Aggregate<'c> {
    value: f64,
    nearest: Option<(&'c LightSource, f64)>,
}

impl<'c> PollutionEstimator<'c> {
    pub fn new(catalog: &'c LightSourceCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c LightSourceCatalog {
        self.catalog
    }

    /// The clamped aggregate at `point`, without classification or search.
    pub fn value_at(&self, point: &Coordinate) -> f64 {
        self.aggregate(point).value
    }

    /// Full estimate at `point`, including the darker-sky search when needed.
    ///
    /// # Example
    ///
    /// ```
    /// use aurora_advisor::{Coordinate, PollutionEstimator, PollutionLevel};
    ///
    /// let estimator = PollutionEstimator::default();
    /// let mid_pacific = Coordinate::new(0.0, -140.0).unwrap();
    /// let estimate = estimator.estimate(&mid_pacific);
    /// assert_eq!(estimate.value, 0);
    /// assert_eq!(estimate.level, PollutionLevel::Excellent);
    /// ```
    pub fn estimate(&self, point: &Coordinate) -> PollutionEstimate {
        let Aggregate { value, nearest } = self.aggregate(point);
        let level = PollutionLevel::from_value(value);

        let travel_hint = if value >= SEARCH_THRESHOLD {
            let directions = self.darker_directions(point, value);
            Some(if directions.is_empty() {
                TravelHint::AwayFromUrbanAreas
            } else {
                TravelHint::Directions(directions)
            })
        } else {
            None
        };

        let nearest_source = nearest.map(|(source, distance_km)| NearestSource {
            name: source.name().to_string(),
            distance_km,
        });

        log::debug!(
            "light pollution at {point}: {value:.2} ({level}), nearest source {:?}",
            nearest_source.as_ref().map(|n| n.name.as_str())
        );

        PollutionEstimate {
            value: value.round() as u8,
            level,
            description: level.description(),
            nearest_source,
            travel_hint,
        }
    }

    fn aggregate(&self, point: &Coordinate) -> Aggregate<'c> {
        let mut total = 0.0;
        let mut nearest: Option<(&'c LightSource, f64)> = None;

        for source in self.catalog {
            let d = distance_km(point, source.coordinate());
            if d >= CUTOFF_DISTANCE_KM {
                continue;
            }
            total += source.weight() * 100.0 / (d * d + 1.0);
            // strict comparison keeps the earliest-declared source on ties
            if nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((source, d));
            }
        }

        Aggregate {
            value: total.clamp(0.0, MAX_VALUE),
            nearest,
        }
    }

    /// Compass directions whose value 50 km out is at least [`MIN_IMPROVEMENT`] below `origin_value`.
    ///
    /// One level deep: probes are evaluated with the value-only aggregate and never search themselves.
    fn darker_directions(&self, origin: &Coordinate, origin_value: f64) -> Vec<CompassDirection> {
        CompassDirection::ALL
            .into_iter()
            .filter(|direction| {
                let probe = match destination(origin, direction.bearing(), SEARCH_DISTANCE_KM) {
                    Ok(probe) => probe,
                    Err(err) => {
                        log::warn!("darkness probe {direction} from {origin} skipped: {err}");
                        return false;
                    }
                };
                let probe_value = self.value_at(&probe);
                log::trace!("darkness probe {direction} -> {probe}: {probe_value:.2}");
                probe_value <= origin_value - MIN_IMPROVEMENT
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn single(name: &str, lat: f64, lon: f64, weight: f64) -> LightSource {
        LightSource::new(name, coord(lat, lon), weight).unwrap()
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(PollutionLevel::from_value(0.0), PollutionLevel::Excellent);
        assert_eq!(PollutionLevel::from_value(9.99), PollutionLevel::Excellent);
        assert_eq!(PollutionLevel::from_value(10.0), PollutionLevel::Good);
        assert_eq!(PollutionLevel::from_value(30.0), PollutionLevel::Moderate);
        assert_eq!(PollutionLevel::from_value(59.9), PollutionLevel::Moderate);
        assert_eq!(PollutionLevel::from_value(60.0), PollutionLevel::High);
        assert_eq!(PollutionLevel::from_value(80.0), PollutionLevel::Severe);
        assert_eq!(PollutionLevel::from_value(100.0), PollutionLevel::Severe);
    }

    #[test]
    fn far_ocean_is_dark() {
        let estimate = PollutionEstimator::default().estimate(&coord(-45.0, -130.0));
        assert_eq!(estimate.value, 0);
        assert_eq!(estimate.level, PollutionLevel::Excellent);
        assert_eq!(estimate.nearest_source, None);
        assert_eq!(estimate.travel_hint, None);
        assert_eq!(estimate.description, PollutionLevel::Excellent.description());
    }

    #[test]
    fn city_center_is_severe_and_suggests_every_direction() {
        let catalog = LightSourceCatalog::builtin();
        let estimator = PollutionEstimator::new(&catalog);
        let new_york = *catalog.get("New York").unwrap().coordinate();

        let estimate = estimator.estimate(&new_york);
        assert_eq!(estimate.value, 100);
        assert_eq!(estimate.level, PollutionLevel::Severe);

        let nearest = estimate.nearest_source.unwrap();
        assert_eq!(nearest.name, "New York");
        assert!(nearest.distance_km.abs() < 1e-9);

        // 50 km out the city contributes only 10 * 100 / 2501
        assert_eq!(
            estimate.travel_hint,
            Some(TravelHint::Directions(CompassDirection::ALL.to_vec()))
        );
    }

    #[test]
    fn contribution_follows_inverse_square() {
        let catalog = LightSourceCatalog::new(vec![single("Town", 0.0, 0.0, 5.0)]).unwrap();
        let estimator = PollutionEstimator::new(&catalog);

        let point = destination(&coord(0.0, 0.0), 90.0, 3.0).unwrap();
        let d = distance_km(&point, &coord(0.0, 0.0));
        let expected = 5.0 * 100.0 / (d * d + 1.0);
        assert!((estimator.value_at(&point) - expected).abs() < 1e-9);

        let estimate = estimator.estimate(&point);
        assert_eq!(estimate.value, expected.round() as u8);
    }

    #[test]
    fn cutoff_excludes_distant_sources() {
        let catalog = LightSourceCatalog::new(vec![single("Town", 0.0, 0.0, 10.0)]).unwrap();
        let estimator = PollutionEstimator::new(&catalog);

        let inside = destination(&coord(0.0, 0.0), 0.0, 299.0).unwrap();
        let outside = destination(&coord(0.0, 0.0), 0.0, 301.0).unwrap();
        assert!(estimator.value_at(&inside) > 0.0);
        assert!(estimator.estimate(&inside).nearest_source.is_some());
        assert_eq!(estimator.value_at(&outside), 0.0);
        assert!(estimator.estimate(&outside).nearest_source.is_none());
    }

    #[test]
    fn contributions_sum_and_clamp() {
        let catalog = LightSourceCatalog::new(vec![
            single("A", 0.0, 0.0, 0.3),
            single("B", 0.0, 0.0001, 0.3),
        ])
        .unwrap();
        let estimator = PollutionEstimator::new(&catalog);
        let v = estimator.value_at(&coord(0.0, 0.0));
        assert!(v > 55.0 && v < 60.0, "v={v}");

        let heavy = LightSourceCatalog::new(vec![single("A", 0.0, 0.0, 3.0)]).unwrap();
        assert_eq!(PollutionEstimator::new(&heavy).value_at(&coord(0.0, 0.0)), 100.0);
    }

    #[test]
    fn nearest_tie_goes_to_first_declared() {
        let catalog = LightSourceCatalog::new(vec![
            single("West", 0.0, -1.0, 6.0),
            single("East", 0.0, 1.0, 6.0),
        ])
        .unwrap();
        let estimate = PollutionEstimator::new(&catalog).estimate(&coord(0.0, 0.0));
        assert_eq!(estimate.nearest_source.unwrap().name, "West");
    }

    #[test]
    fn empty_catalog_yields_zero_everywhere() {
        let catalog = LightSourceCatalog::default();
        let estimator = PollutionEstimator::new(&catalog);
        for point in [coord(40.7128, -74.0060), coord(90.0, 0.0), coord(-90.0, 180.0)] {
            let estimate = estimator.estimate(&point);
            assert_eq!(estimate.value, 0);
            assert_eq!(estimate.level, PollutionLevel::Excellent);
            assert!(estimate.travel_hint.is_none());
        }
    }

    #[test]
    fn moderate_values_get_no_hint() {
        let catalog = LightSourceCatalog::new(vec![single("Village", 0.0, 0.0, 0.4)]).unwrap();
        let estimate = PollutionEstimator::new(&catalog).estimate(&coord(0.0, 0.0));
        assert_eq!(estimate.value, 40);
        assert_eq!(estimate.level, PollutionLevel::Moderate);
        assert!(estimate.travel_hint.is_none());
    }

    #[test]
    fn only_darker_directions_are_suggested() {
        // A bright source exactly where the northern probe lands, plus a weaker one
        // underfoot: every direction but North gets darker.
        let origin = coord(10.0, 10.0);
        let north_site = destination(&origin, 0.0, SEARCH_DISTANCE_KM).unwrap();
        let catalog = LightSourceCatalog::new(vec![
            LightSource::new("Underfoot", origin, 0.7).unwrap(),
            LightSource::new("North", north_site, 10.0).unwrap(),
        ])
        .unwrap();
        let estimator = PollutionEstimator::new(&catalog);
        let estimate = estimator.estimate(&origin);
        assert!(estimator.value_at(&origin) >= SEARCH_THRESHOLD);

        match estimate.travel_hint {
            Some(TravelHint::Directions(dirs)) => {
                assert_eq!(dirs, CompassDirection::ALL[1..].to_vec());
            }
            other => panic!("unexpected hint {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_generic_hint() {
        // Sources ringed 50 km around the origin keep every probe as bright as the center.
        let origin = coord(0.0, 0.0);
        let mut sources = vec![LightSource::new("Center", origin, 2.0).unwrap()];
        for dir in CompassDirection::ALL {
            let site = destination(&origin, dir.bearing(), SEARCH_DISTANCE_KM).unwrap();
            sources.push(LightSource::new(dir.name(), site, 10.0).unwrap());
        }
        let catalog = LightSourceCatalog::new(sources).unwrap();
        let estimate = PollutionEstimator::new(&catalog).estimate(&origin);
        assert_eq!(estimate.value, 100);
        assert_eq!(estimate.travel_hint, Some(TravelHint::AwayFromUrbanAreas));
    }

    #[test]
    fn hint_text() {
        let hint = TravelHint::Directions(vec![CompassDirection::North, CompassDirection::Southwest]);
        assert_eq!(
            hint.to_string(),
            "Consider traveling North or Southwest for better aurora visibility."
        );
        assert_eq!(
            TravelHint::AwayFromUrbanAreas.to_string(),
            "Consider traveling at least 50km away from urban areas for better aurora visibility."
        );
    }
}
