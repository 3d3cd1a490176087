//! Synthetic activity-index series for charting.
//!
//! **This is not a forecast.** [`ForecastSimulator`] jitters the current index with
//! bounded uniform noise to produce a plausible-looking hourly series. It is a
//! placeholder for the chart until a real forecast feed is wired in, and its output
//! must never be presented as a prediction.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::aurora::ActivityLevel;
use crate::types::ActivityIndex;
use crate::ValidationError;

/// Source of uniformly distributed values in `[0, 1)`.
///
/// Implemented for every [`rand::Rng`], so a seeded `StdRng` makes a series
/// reproducible and `rand::rng()` gives a fresh one each run.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: rand::Rng + ?Sized> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Length and spread of a simulated series.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Number of hourly samples
    pub hours: u32,
    /// Maximum absolute perturbation applied to the current index
    pub variation: f64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            hours: 24,
            variation: 1.5,
        }
    }
}

impl ForecastSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.variation.is_finite() || self.variation < 0.0 {
            return Err(ValidationError::VariationOutOfRange);
        }
        Ok(())
    }
}

/// One simulated hourly value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ForecastSample {
    /// Hours after the series start, from 0
    pub hour_offset: u32,
    /// Simulated index, always within [0, 9]
    pub predicted_index: f64,
}

impl ForecastSample {
    /// Axis label such as `"5h"`.
    pub fn label(&self) -> String {
        format!("{}h", self.hour_offset)
    }

    pub fn activity_level(&self) -> ActivityLevel {
        ActivityLevel::from_value(self.predicted_index)
    }

    /// Wall-clock time this sample refers to, for a series issued at `issued_at`.
    ///
    /// `None` only if the result falls outside chrono's representable range.
    pub fn valid_at(&self, issued_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        TimeDelta::try_hours(i64::from(self.hour_offset)).and_then(|d| issued_at.checked_add_signed(d))
    }
}

/// Produces bounded synthetic series around a current index.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ForecastSimulator {
    settings: ForecastSettings,
}

impl ForecastSimulator {
    /// # Errors
    ///
    /// [`ValidationError::VariationOutOfRange`] if the variation is negative or not finite.
    pub fn new(settings: ForecastSettings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    /// One sample per hour: `current + u·variation` for `u` uniform in [-1, 1),
    /// clamped to the conventional [0, 9] scale.
    pub fn simulate<S>(&self, current: ActivityIndex, source: &mut S) -> Vec<ForecastSample>
    where
        S: UniformSource + ?Sized,
    {
        let variation = self.settings.variation;
        (0..self.settings.hours)
            .map(|hour_offset| {
                let perturbation = (source.next_uniform() * 2.0 - 1.0) * variation;
                let predicted_index =
                    (current.value() + perturbation).clamp(ActivityIndex::MIN, ActivityIndex::MAX);
                ForecastSample {
                    hour_offset,
                    predicted_index,
                }
            })
            .collect()
    }

    /// [`simulate`](Self::simulate) using the thread-local generator.
    pub fn simulate_with_entropy(&self, current: ActivityIndex) -> Vec<ForecastSample> {
        self.simulate(current, &mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn kp(value: f64) -> ActivityIndex {
        ActivityIndex::new(value).unwrap()
    }

    #[test]
    fn default_settings() {
        let settings = ForecastSettings::default();
        assert_eq!(settings.hours, 24);
        assert_eq!(settings.variation, 1.5);

        let samples = ForecastSimulator::default().simulate(kp(3.0), &mut StdRng::seed_from_u64(7));
        assert_eq!(samples.len(), 24);
        let offsets: Vec<u32> = samples.iter().map(|s| s.hour_offset).collect();
        assert_eq!(offsets, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_series() {
        let sim = ForecastSimulator::default();
        let a = sim.simulate(kp(4.0), &mut StdRng::seed_from_u64(42));
        let b = sim.simulate(kp(4.0), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn samples_stay_within_variation_and_scale() {
        let sim = ForecastSimulator::new(ForecastSettings { hours: 200, variation: 1.5 }).unwrap();
        for s in sim.simulate(kp(4.0), &mut StdRng::seed_from_u64(1)) {
            assert!((2.5..=5.5).contains(&s.predicted_index), "{s:?}");
        }
        for s in sim.simulate(kp(8.5), &mut StdRng::seed_from_u64(2)) {
            assert!(s.predicted_index <= 9.0);
        }
        for s in sim.simulate(kp(0.2), &mut StdRng::seed_from_u64(3)) {
            assert!(s.predicted_index >= 0.0);
        }
    }

    #[test]
    fn zero_variation_is_flat() {
        let sim = ForecastSimulator::new(ForecastSettings { hours: 5, variation: 0.0 }).unwrap();
        let samples = sim.simulate(kp(6.0), &mut StdRng::seed_from_u64(9));
        assert!(samples.iter().all(|s| s.predicted_index == 6.0));
        // out-of-scale current value is clamped
        let samples = sim.simulate(kp(11.0), &mut StdRng::seed_from_u64(9));
        assert!(samples.iter().all(|s| s.predicted_index == 9.0));
    }

    #[test]
    fn zero_hours_is_empty() {
        let sim = ForecastSimulator::new(ForecastSettings { hours: 0, variation: 1.0 }).unwrap();
        assert!(sim.simulate(kp(3.0), &mut StdRng::seed_from_u64(0)).is_empty());
    }

    #[test]
    fn rejects_bad_variation() {
        for variation in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ForecastSimulator::new(ForecastSettings { hours: 24, variation }),
                Err(ValidationError::VariationOutOfRange)
            ));
        }
    }

    #[test]
    fn sample_helpers() {
        let sample = ForecastSample {
            hour_offset: 5,
            predicted_index: 5.2,
        };
        assert_eq!(sample.label(), "5h");
        assert_eq!(sample.activity_level(), ActivityLevel::StrongStorm);

        let issued = Utc.with_ymd_and_hms(2024, 3, 24, 22, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 25, 3, 0, 0).unwrap();
        assert_eq!(sample.valid_at(issued), Some(expected));
    }

    #[test]
    fn entropy_series_has_requested_length() {
        let sim = ForecastSimulator::new(ForecastSettings { hours: 12, variation: 2.0 }).unwrap();
        assert_eq!(sim.simulate_with_entropy(kp(5.0)).len(), 12);
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let s: ForecastSettings = serde_json::from_str(r#"{"hours": 48}"#).unwrap();
        assert_eq!(s, ForecastSettings { hours: 48, variation: 1.5 });
    }
}
