//! Weighted artificial light sources.
//!
//! The catalog is a coarse stand-in for a night-sky brightness atlas: each entry is
//! a large population center with a hand-assigned weight reflecting its relative
//! light output. Weights are configuration, not photometric measurements.

use std::collections::HashSet;
use std::io::Read;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Coordinate;
use crate::ValidationError;

/// A single weighted light source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLightSource", into = "RawLightSource")]
pub struct LightSource {
    name: String,
    coordinate: Coordinate,
    weight: f64,
}

#[derive(Serialize, Deserialize)]
struct RawLightSource {
    name: String,
    latitude: f64,
    longitude: f64,
    weight: f64,
}

impl TryFrom<RawLightSource> for LightSource {
    type Error = ValidationError;

    fn try_from(raw: RawLightSource) -> Result<Self, Self::Error> {
        LightSource::new(raw.name, Coordinate::new(raw.latitude, raw.longitude)?, raw.weight)
    }
}

impl From<LightSource> for RawLightSource {
    fn from(source: LightSource) -> Self {
        Self {
            latitude: source.coordinate.latitude(),
            longitude: source.coordinate.longitude(),
            name: source.name,
            weight: source.weight,
        }
    }
}

impl LightSource {
    /// Creates a light source.
    ///
    /// # Errors
    ///
    /// [`ValidationError::WeightOutOfRange`] unless `weight` is finite and strictly positive.
    pub fn new(name: impl Into<String>, coordinate: Coordinate, weight: f64) -> Result<Self, ValidationError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(ValidationError::WeightOutOfRange);
        }
        Ok(Self {
            name: name.into(),
            coordinate,
            weight,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Errors raised while loading a catalog from configuration.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The configuration is not a JSON array of valid light sources
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share the same name
    #[error("Duplicate light source {0:?}")]
    DuplicateSource(String),

    /// An entry has an empty or whitespace-only name
    #[error("Light source name is empty")]
    EmptyName,
}

/// An immutable, ordered collection of light sources.
///
/// Iteration follows declaration order, which is also the tie-break order whenever
/// two sources are equally close to a point. An empty catalog is valid and simply
/// yields no light pollution anywhere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightSourceCatalog {
    sources: Vec<LightSource>,
}

/// Name, latitude, longitude and weight of the built-in population centers.
const MAJOR_CITIES: [(&str, f64, f64, f64); 20] = [
    ("New York", 40.7128, -74.0060, 10.0),
    ("Los Angeles", 34.0522, -118.2437, 9.0),
    ("Chicago", 41.8781, -87.6298, 8.0),
    ("London", 51.5074, -0.1278, 9.0),
    ("Paris", 48.8566, 2.3522, 8.0),
    ("Tokyo", 35.6762, 139.6503, 10.0),
    ("Shanghai", 31.2304, 121.4737, 10.0),
    ("Sao Paulo", -23.5558, -46.6396, 9.0),
    ("Mumbai", 19.0760, 72.8777, 9.0),
    ("Beijing", 39.9042, 116.4074, 9.0),
    ("Moscow", 55.7558, 37.6173, 8.0),
    ("Sydney", -33.8688, 151.2093, 7.0),
    ("Berlin", 52.5200, 13.4050, 7.0),
    ("Mexico City", 19.4326, -99.1332, 8.0),
    ("Cairo", 30.0444, 31.2357, 8.0),
    ("Delhi", 28.7041, 77.1025, 9.0),
    ("Toronto", 43.6532, -79.3832, 7.0),
    ("Rome", 41.9028, 12.4964, 6.0),
    ("Seoul", 37.5665, 126.9780, 9.0),
    ("Bangkok", 13.7563, 100.5018, 8.0),
];

static GLOBAL: OnceLock<LightSourceCatalog> = OnceLock::new();

impl LightSourceCatalog {
    /// Builds a catalog from already-validated sources.
    ///
    /// # Errors
    ///
    /// [`CatalogError::EmptyName`] or [`CatalogError::DuplicateSource`] if names are not
    /// non-empty and unique.
    pub fn new(sources: Vec<LightSource>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(sources.len());
        for source in &sources {
            if source.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !seen.insert(source.name.as_str()) {
                return Err(CatalogError::DuplicateSource(source.name.clone()));
            }
        }
        Ok(Self { sources })
    }

    /// The built-in catalog of major population centers, shared for the whole process.
    ///
    /// Initialized on first use and never mutated afterwards.
    pub fn global() -> &'static LightSourceCatalog {
        GLOBAL.get_or_init(Self::builtin)
    }

    /// A fresh copy of the built-in catalog.
    pub fn builtin() -> Self {
        let sources = MAJOR_CITIES
            .iter()
            .map(|&(name, lat, lon, weight)| LightSource {
                name: name.to_string(),
                coordinate: Coordinate::from_trusted(lat, lon),
                weight,
            })
            .collect();
        Self { sources }
    }

    /// Loads a catalog from a JSON array of `{name, latitude, longitude, weight}` objects.
    ///
    /// # Example
    ///
    /// ```
    /// use aurora_advisor::LightSourceCatalog;
    ///
    /// let catalog = LightSourceCatalog::from_json_str(
    ///     r#"[{"name": "Reykjavik", "latitude": 64.1466, "longitude": -21.9426, "weight": 6}]"#,
    /// ).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::from_reader(json.as_bytes())
    }

    /// Same as [`from_json_str`](Self::from_json_str), reading from any byte source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let sources: Vec<LightSource> = serde_json::from_reader(reader)?;
        let catalog = Self::new(sources)?;
        log::info!("loaded light source catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Looks a source up by exact name.
    pub fn get(&self, name: &str) -> Option<&LightSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Sources in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &LightSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<'a> IntoIterator for &'a LightSourceCatalog {
    type Item = &'a LightSource;
    type IntoIter = std::slice::Iter<'a, LightSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}
