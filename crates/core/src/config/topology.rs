use serde::Deserialize;
use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::zone::{LonLat, Polygon, Ring, ZoneGeography};

#[derive(Deserialize)]
struct RawGeometry {
    /// MultiPolygon coordinates.
    coordinates: Vec<Polygon>,
    #[serde(default)]
    center: Option<LonLat>,
}

/// Per-zone geometry, keyed by zone code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologyTable {
    geographies: BTreeMap<String, ZoneGeography>,
}

impl TopologyTable {
    /// Parse the topology source (`{"DK-DK2": {"coordinates": [...], "center": [lon, lat]}}`).
    ///
    /// Zones without an explicit `center` get the area-weighted centroid
    /// of their outer rings.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: BTreeMap<String, RawGeometry> = serde_json::from_str(json)?;
        let mut geographies = BTreeMap::new();
        for (zone_id, geometry) in raw {
            let center = match geometry.center {
                Some(center) => center,
                None => centroid(&geometry.coordinates).ok_or_else(|| {
                    CoreError::InvalidConfig(format!("zone '{zone_id}' has no geometry"))
                })?,
            };
            geographies.insert(
                zone_id,
                ZoneGeography {
                    polygons: geometry.coordinates,
                    center,
                },
            );
        }
        tracing::debug!(count = geographies.len(), "loaded topology");
        Ok(Self { geographies })
    }

    /// Read and parse a topology file (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, zone_id: &str) -> Option<&ZoneGeography> {
        self.geographies.get(zone_id)
    }

    pub fn len(&self) -> usize {
        self.geographies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geographies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ZoneGeography)> {
        self.geographies.iter()
    }
}

/// Area-weighted centroid of the outer rings of a MultiPolygon.
///
/// Falls back to the vertex mean when every ring is degenerate (zero
/// area). Returns `None` when there are no vertices at all.
pub fn centroid(polygons: &[Polygon]) -> Option<LonLat> {
    let outer_rings: Vec<&Ring> = polygons.iter().filter_map(|p| p.first()).collect();

    let mut weighted = [0.0, 0.0];
    let mut total_area = 0.0;
    for ring in &outer_rings {
        if let Some((area, [cx, cy])) = ring_centroid(ring) {
            weighted[0] += cx * area;
            weighted[1] += cy * area;
            total_area += area;
        }
    }
    if total_area > f64::EPSILON {
        return Some([weighted[0] / total_area, weighted[1] / total_area]);
    }

    let vertices: Vec<&LonLat> = outer_rings.iter().flat_map(|r| r.iter()).collect();
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let sum = vertices
        .iter()
        .fold([0.0, 0.0], |acc, v| [acc[0] + v[0], acc[1] + v[1]]);
    Some([sum[0] / n, sum[1] / n])
}

/// Shoelace area (absolute) and centroid of one ring.
fn ring_centroid(ring: &Ring) -> Option<(f64, LonLat)> {
    if ring.len() < 3 {
        return None;
    }
    let mut signed_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        let cross = a[0] * b[1] - b[0] * a[1];
        signed_area += cross;
        cx += (a[0] + b[0]) * cross;
        cy += (a[1] + b[1]) * cross;
    }
    signed_area /= 2.0;
    if signed_area.abs() <= f64::EPSILON {
        return None;
    }
    let factor = 1.0 / (6.0 * signed_area);
    Some((signed_area.abs(), [cx * factor, cy * factor]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Polygon {
        vec![vec![
            [x0, y0],
            [x0 + side, y0],
            [x0 + side, y0 + side],
            [x0, y0 + side],
            [x0, y0],
        ]]
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&[square(0.0, 0.0, 2.0)]).unwrap();
        assert!((c[0] - 1.0).abs() < 1e-9);
        assert!((c[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn larger_polygon_pulls_centroid() {
        // 1x1 square at origin, 3x3 square at x=10: areas 1 and 9.
        let c = centroid(&[square(0.0, 0.0, 1.0), square(10.0, 0.0, 3.0)]).unwrap();
        let expected_x = (0.5 * 1.0 + 11.5 * 9.0) / 10.0;
        assert!((c[0] - expected_x).abs() < 1e-9);
    }

    #[test]
    fn orientation_does_not_matter() {
        let mut clockwise = square(0.0, 0.0, 2.0);
        clockwise[0].reverse();
        let c = centroid(&[clockwise]).unwrap();
        assert!((c[0] - 1.0).abs() < 1e-9);
        assert!((c[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_ring_uses_vertex_mean() {
        let line = vec![vec![[0.0, 0.0], [2.0, 0.0], [4.0, 0.0]]];
        assert_eq!(centroid(&[line]), Some([2.0, 0.0]));
    }

    #[test]
    fn no_vertices() {
        assert_eq!(centroid(&[]), None);
    }
}
