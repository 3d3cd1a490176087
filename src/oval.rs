//! Aurora oval geometry for map renderers.
//!
//! For each hemisphere the generator emits a boundary line and an annular fill
//! polygon, both as `(longitude, latitude)` pairs in degrees. The boundary follows
//! the oval base latitude with a fixed sinusoidal wobble of ±4° in longitude;
//! the fill spans from 2° below to 4° above that line. No projection is applied.

use serde::Serialize;
use serde_json::{json, Value};

use crate::aurora::oval_base_latitude;
use crate::types::ActivityIndex;

/// Longitude step between samples (degrees)
pub const LONGITUDE_STEP_DEG: f64 = 5.0;

/// Amplitude of the sinusoidal wobble (degrees)
const WOBBLE_AMPLITUDE: f64 = 4.0;

/// Offsets of the fill edges relative to the boundary line (degrees)
const FILL_OUTER_OFFSET: f64 = 4.0;
const FILL_INNER_OFFSET: f64 = -2.0;

/// Number of longitude samples from -180 to 180 inclusive.
pub const SAMPLES_PER_EDGE: usize = 73;

/// Points in a boundary ring, including the closing point.
pub const BOUNDARY_LEN: usize = SAMPLES_PER_EDGE + 1;

/// Points in a fill ring: outer edge, inner edge, closing point.
pub const FILL_LEN: usize = 2 * SAMPLES_PER_EDGE + 1;

/// A `(longitude, latitude)` pair in degrees.
pub type LonLat = (f64, f64);

/// Oval rings for one hemisphere.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OvalGeometry {
    /// Closed line along the oval boundary
    pub boundary: Vec<LonLat>,
    /// Closed ring around the annular band enclosing the boundary
    pub fill: Vec<LonLat>,
}

/// Oval geometry for both hemispheres.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HemisphereOvals {
    pub north: OvalGeometry,
    pub south: OvalGeometry,
}

/// Builds the northern and southern oval rings for an activity index.
///
/// # Example
///
/// ```
/// use aurora_advisor::{generate_oval_geometry, ActivityIndex};
///
/// let ovals = generate_oval_geometry(ActivityIndex::new(3.0).unwrap());
/// assert_eq!(ovals.north.boundary.first(), ovals.north.boundary.last());
/// assert_eq!(ovals.north.boundary[0], (-180.0, 58.0));
/// assert_eq!(ovals.south.boundary[0], (-180.0, -58.0));
/// ```
pub fn generate_oval_geometry(index: ActivityIndex) -> HemisphereOvals {
    let base = oval_base_latitude(index);
    HemisphereOvals {
        north: OvalGeometry::around(base),
        south: OvalGeometry::around(-base),
    }
}

fn sample_longitudes() -> impl DoubleEndedIterator<Item = f64> {
    let half = (SAMPLES_PER_EDGE / 2) as i32;
    (-half..=half).map(|k| f64::from(k) * LONGITUDE_STEP_DEG)
}

fn wobble(longitude: f64) -> f64 {
    longitude.to_radians().sin() * WOBBLE_AMPLITUDE
}

fn edge(base: f64, offset: f64) -> impl DoubleEndedIterator<Item = LonLat> {
    sample_longitudes().map(move |lon| (lon, base + wobble(lon) + offset))
}

fn close_ring(mut ring: Vec<LonLat>) -> Vec<LonLat> {
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    ring
}

impl OvalGeometry {
    /// Rings around a signed base latitude.
    fn around(base: f64) -> Self {
        let boundary = close_ring(edge(base, 0.0).collect());

        let mut fill = Vec::with_capacity(FILL_LEN);
        fill.extend(edge(base, FILL_OUTER_OFFSET));
        fill.extend(edge(base, FILL_INNER_OFFSET).rev());
        let fill = close_ring(fill);

        Self { boundary, fill }
    }

    /// The boundary as a GeoJSON `LineString` feature.
    pub fn boundary_geojson(&self) -> Value {
        json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "LineString",
                "coordinates": ring_coordinates(&self.boundary),
            }
        })
    }

    /// The fill as a GeoJSON `Polygon` feature.
    pub fn fill_geojson(&self) -> Value {
        json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [ring_coordinates(&self.fill)],
            }
        })
    }
}

impl HemisphereOvals {
    /// All four rings as a GeoJSON `FeatureCollection`, tagged by hemisphere and role.
    pub fn to_feature_collection(&self) -> Value {
        let mut features = Vec::with_capacity(4);
        for (hemisphere, oval) in [("north", &self.north), ("south", &self.south)] {
            for (role, mut feature) in [("boundary", oval.boundary_geojson()), ("fill", oval.fill_geojson())] {
                feature["properties"] = json!({ "hemisphere": hemisphere, "role": role });
                features.push(feature);
            }
        }
        json!({ "type": "FeatureCollection", "features": features })
    }
}

fn ring_coordinates(ring: &[LonLat]) -> Vec<[f64; 2]> {
    ring.iter().map(|&(lon, lat)| [lon, lat]).collect()
}
