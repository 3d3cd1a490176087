//! Aurora oval position and visibility scoring.
//!
//! The model is a deliberately simple heuristic: the poleward edge of the oval sits
//! at `67° - 3°·Kp` of geographic latitude (no geomagnetic coordinate conversion), and
//! the chance of seeing aurora is a piecewise function of how far the observer is
//! from that edge.
//!
//! | band (by `|lat|`)            | chance                                  |
//! |------------------------------|-----------------------------------------|
//! | `≥ base + 5`                 | `min(95, 60 + 5·Kp)`                    |
//! | `[base, base + 5)`           | `min(90, 20 + 8·Kp + 30·(|lat|-base)/5)`|
//! | `[base - 5, base)`           | `max(5, 15·(Kp - 3))`                   |
//! | `< base - 5`                 | `max(0, 10·(Kp - 6))`                   |
//!
//! The bands are not continuous across their boundaries. The jumps are part of the
//! model and are kept as-is.

use core::fmt;

use serde::Serialize;

use crate::types::{validate_latitude, ActivityIndex, Coordinate};
use crate::ValidationError;

/// Latitude of the oval's poleward boundary at Kp 0 (degrees)
const OVAL_LATITUDE_AT_QUIET: f64 = 67.0;

/// Equatorward shift of the oval per unit of Kp (degrees)
const OVAL_SHIFT_PER_KP: f64 = 3.0;

/// Width of the bands either side of the oval boundary (degrees)
const BAND_WIDTH: f64 = 5.0;

/// Characteristic latitude of the aurora oval for an activity index, in degrees.
///
/// Not clamped: extreme indices produce values below zero or above 90, and callers
/// are expected to cope with that.
///
/// # Example
///
/// ```
/// use aurora_advisor::{oval_base_latitude, ActivityIndex};
///
/// let kp = ActivityIndex::new(5.0).unwrap();
/// assert_eq!(oval_base_latitude(kp), 52.0);
/// ```
pub fn oval_base_latitude(index: ActivityIndex) -> f64 {
    OVAL_LATITUDE_AT_QUIET - OVAL_SHIFT_PER_KP * index.value()
}

/// Percentage chance (0–100) of seeing aurora at `latitude` for the given activity.
///
/// Only the magnitude of the latitude matters; both hemispheres are treated alike.
///
/// # Errors
///
/// [`ValidationError::LatitudeOutOfRange`] if `latitude` is not within [-90, 90].
///
/// # Example
///
/// ```
/// use aurora_advisor::{visibility_chance, ActivityIndex};
///
/// let kp = ActivityIndex::new(4.0).unwrap();
/// let chance = visibility_chance(kp, 58.0).unwrap();
/// assert!((chance - 70.0).abs() < 1e-9);
/// ```
pub fn visibility_chance(index: ActivityIndex, latitude: f64) -> Result<f64, ValidationError> {
    validate_latitude(latitude)?;
    Ok(chance_for_abs_latitude(index.value(), latitude.abs()))
}

/// [`visibility_chance`] for an already-validated coordinate.
pub fn visibility_chance_at(index: ActivityIndex, coordinate: &Coordinate) -> f64 {
    chance_for_abs_latitude(index.value(), coordinate.latitude().abs())
}

fn chance_for_abs_latitude(kp: f64, abs_lat: f64) -> f64 {
    let base = OVAL_LATITUDE_AT_QUIET - OVAL_SHIFT_PER_KP * kp;

    let chance = if abs_lat >= base + BAND_WIDTH {
        (60.0 + kp * 5.0).min(95.0)
    } else if abs_lat >= base {
        let factor = (abs_lat - base) / BAND_WIDTH;
        (20.0 + kp * 8.0 + factor * 30.0).min(90.0)
    } else if abs_lat >= base - BAND_WIDTH {
        ((kp - 3.0) * 15.0).max(5.0)
    } else {
        ((kp - 6.0) * 10.0).max(0.0)
    };

    // only reachable outside the conventional 0-9 Kp range
    chance.clamp(0.0, 100.0)
}

// ============================================================================
// Classification helpers
// ============================================================================

/// Coarse geomagnetic activity class for display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ActivityLevel {
    /// Kp below 3
    Low,
    /// Kp 3 up to 5
    Moderate,
    /// Kp 5 up to 7
    StrongStorm,
    /// Kp 7 and above
    SevereStorm,
}

impl ActivityLevel {
    pub fn from_index(index: ActivityIndex) -> Self {
        Self::from_value(index.value())
    }

    pub(crate) fn from_value(kp: f64) -> Self {
        if kp >= 7.0 {
            ActivityLevel::SevereStorm
        } else if kp >= 5.0 {
            ActivityLevel::StrongStorm
        } else if kp >= 3.0 {
            ActivityLevel::Moderate
        } else {
            ActivityLevel::Low
        }
    }

    /// Display colour as a hex RGB string.
    pub fn color(self) -> &'static str {
        match self {
            ActivityLevel::Low => "#4fc3f7",
            ActivityLevel::Moderate => "#4caf50",
            ActivityLevel::StrongStorm => "#ff9800",
            ActivityLevel::SevereStorm => "#f44336",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityLevel::Low => "low activity",
            ActivityLevel::Moderate => "moderate activity",
            ActivityLevel::StrongStorm => "strong storm",
            ActivityLevel::SevereStorm => "severe storm",
        };
        f.write_str(label)
    }
}

/// What a visibility percentage means for the observer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum VisibilityOutlook {
    Low,
    Moderate,
    High,
}

impl VisibilityOutlook {
    /// ≥70 High, ≥30 Moderate, otherwise Low.
    pub fn from_chance(chance: f64) -> Self {
        if chance >= 70.0 {
            VisibilityOutlook::High
        } else if chance >= 30.0 {
            VisibilityOutlook::Moderate
        } else {
            VisibilityOutlook::Low
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            VisibilityOutlook::High => {
                "High chance of seeing aurora! Get to a dark location away from city lights."
            }
            VisibilityOutlook::Moderate => {
                "Moderate chance of aurora. Worth looking if skies are clear and you're away from light pollution."
            }
            VisibilityOutlook::Low => {
                "Low chance of seeing aurora at your location. Consider traveling to higher latitudes for better visibility."
            }
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            VisibilityOutlook::High => "#4caf50",
            VisibilityOutlook::Moderate => "#ff9800",
            VisibilityOutlook::Low => "#f44336",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    fn kp(value: f64) -> ActivityIndex {
        ActivityIndex::new(value).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "actual={actual}, expected={expected}");
    }

    #[test]
    fn base_latitude_moves_equatorward() {
        assert_eq!(oval_base_latitude(kp(0.0)), 67.0);
        assert_eq!(oval_base_latitude(kp(9.0)), 40.0);
        assert_eq!(oval_base_latitude(kp(30.0)), -23.0);
        assert_eq!(oval_base_latitude(kp(-10.0)), 97.0);
    }

    #[test]
    fn deep_inside_the_oval() {
        // Kp 5: base 52, 67 >= 57
        assert_close(visibility_chance(kp(5.0), 67.0).unwrap(), 85.0);
        assert_close(visibility_chance(kp(8.0), 80.0).unwrap(), 95.0);
    }

    #[test]
    fn deep_equatorward() {
        // Kp 2: base 61, 45 < 56
        assert_close(visibility_chance(kp(2.0), 45.0).unwrap(), 0.0);
        assert_close(visibility_chance(kp(9.0), 0.0).unwrap(), 30.0);
    }

    #[test]
    fn oval_edge_blends_position_and_activity() {
        // Kp 4: base 55, factor 0.6 -> 20 + 32 + 18
        assert_close(visibility_chance(kp(4.0), 58.0).unwrap(), 70.0);
        assert_close(visibility_chance(kp(4.0), -58.0).unwrap(), 70.0);
        // capped at 90
        assert_close(visibility_chance(kp(8.9), 43.0).unwrap(), 90.0);
    }

    #[test]
    fn just_equatorward_of_the_oval() {
        // Kp 4: base 55, 52 in [50, 55)
        assert_close(visibility_chance(kp(4.0), 52.0).unwrap(), 15.0);
        // floor of 5
        assert_close(visibility_chance(kp(1.0), 62.0).unwrap(), 5.0);
    }

    #[test]
    fn band_boundaries_are_inclusive_on_the_poleward_side() {
        // Kp 2: base 61
        assert_close(visibility_chance(kp(2.0), 66.0).unwrap(), 70.0);
        assert_close(visibility_chance(kp(2.0), 61.0).unwrap(), 36.0);
        assert_close(visibility_chance(kp(2.0), 56.0).unwrap(), 5.0);
        assert_close(visibility_chance(kp(2.0), 55.999).unwrap(), 0.0);
    }

    #[test]
    fn discontinuity_at_band_edge_is_preserved() {
        // just below base+5 the edge formula gives ~20+16+30, at base+5 the deep formula gives 70
        let below = visibility_chance(kp(2.0), 65.999_999).unwrap();
        let at = visibility_chance(kp(2.0), 66.0).unwrap();
        assert!(below < 66.0 && at == 70.0, "below={below}, at={at}");
    }

    #[test]
    fn output_is_clamped_for_extreme_indices() {
        assert_close(visibility_chance(kp(-20.0), 90.0).unwrap(), 0.0);
        assert_close(visibility_chance(kp(12.0), 30.0).unwrap(), 100.0);
    }

    #[test]
    fn rejects_invalid_latitude() {
        assert!(matches!(
            visibility_chance(kp(3.0), 90.1),
            Err(ValidationError::LatitudeOutOfRange)
        ));
        assert!(visibility_chance(kp(3.0), f64::NAN).is_err());
    }

    #[test]
    fn coordinate_variant_matches() {
        let c = Coordinate::new(-58.0, 100.0).unwrap();
        assert_close(visibility_chance_at(kp(4.0), &c), 70.0);
    }

    #[test]
    fn activity_levels() {
        assert_eq!(ActivityLevel::from_index(kp(0.0)), ActivityLevel::Low);
        assert_eq!(ActivityLevel::from_index(kp(2.99)), ActivityLevel::Low);
        assert_eq!(ActivityLevel::from_index(kp(3.0)), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_index(kp(5.0)), ActivityLevel::StrongStorm);
        assert_eq!(ActivityLevel::from_index(kp(7.0)), ActivityLevel::SevereStorm);
        assert_eq!(ActivityLevel::SevereStorm.to_string(), "severe storm");
    }

    #[test]
    fn outlook_thresholds() {
        assert_eq!(VisibilityOutlook::from_chance(70.0), VisibilityOutlook::High);
        assert_eq!(VisibilityOutlook::from_chance(69.9), VisibilityOutlook::Moderate);
        assert_eq!(VisibilityOutlook::from_chance(30.0), VisibilityOutlook::Moderate);
        assert_eq!(VisibilityOutlook::from_chance(0.0), VisibilityOutlook::Low);
    }
}
