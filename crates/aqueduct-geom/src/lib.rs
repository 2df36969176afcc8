// SPDX-License-Identifier: Apache-2.0
//! aqueduct-geom: 2D spatial primitives for hydraulic network geometry.
//!
//! Coordinates are WGS84 lon/lat degrees; all distances are meters.
//! Projection onto segments uses a local equirectangular approximation
//! (longitude scaled by the cosine of the mean latitude), which is accurate
//! at the scale of a distribution network. All float math goes through
//! `libm` so results do not depend on platform intrinsics.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A longitude/latitude coordinate pair in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LonLat {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl LonLat {
    /// Constructs a coordinate from longitude and latitude degrees.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Result of projecting a point onto a polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestPoint {
    /// The closest point on the polyline.
    pub point: LonLat,
    /// Index of the segment containing `point` (segment `i` spans vertices
    /// `i` and `i + 1`).
    pub segment: usize,
    /// Great-circle distance from the query point to `point`, in meters.
    pub distance: f64,
}

/// Great-circle (haversine) distance between two coordinates, in meters.
#[must_use]
pub fn distance(a: LonLat, b: LonLat) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let s_lat = libm::sin(d_lat / 2.0);
    let s_lon = libm::sin(d_lon / 2.0);
    let h = s_lat * s_lat + libm::cos(lat_a) * libm::cos(lat_b) * s_lon * s_lon;
    2.0 * EARTH_RADIUS_M * libm::asin(libm::sqrt(h.min(1.0)))
}

/// Projects `p` onto the segment `a`–`b`, clamped to the segment's extent.
///
/// Degenerate segments (`a == b`) project to `a`.
#[must_use]
pub fn nearest_point_on_segment(a: LonLat, b: LonLat, p: LonLat) -> LonLat {
    let mean_lat = ((a.lat + b.lat) / 2.0).to_radians();
    let scale = libm::cos(mean_lat);

    let ax = a.lon * scale;
    let bx = b.lon * scale;
    let px = p.lon * scale;

    let dx = bx - ax;
    let dy = b.lat - a.lat;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return a;
    }
    let t = (((px - ax) * dx + (p.lat - a.lat) * dy) / len2).clamp(0.0, 1.0);
    LonLat {
        lon: a.lon + (b.lon - a.lon) * t,
        lat: a.lat + dy * t,
    }
}

/// Projects `p` onto the polyline `verts`, returning the closest point.
///
/// Returns `None` for an empty polyline. A single-vertex polyline projects
/// to that vertex. Ties keep the earliest segment: a later segment replaces
/// the best candidate only when strictly closer.
#[must_use]
pub fn nearest_point_on_polyline(verts: &[LonLat], p: LonLat) -> Option<NearestPoint> {
    let first = *verts.first()?;
    let mut best = NearestPoint {
        point: first,
        segment: 0,
        distance: distance(first, p),
    };
    for (i, pair) in verts.windows(2).enumerate() {
        let candidate = nearest_point_on_segment(pair[0], pair[1], p);
        let d = distance(candidate, p);
        if d < best.distance {
            best = NearestPoint {
                point: candidate,
                segment: i,
                distance: d,
            };
        }
    }
    Some(best)
}

/// Total length of a polyline in meters. Polylines with fewer than two
/// vertices have zero length.
#[must_use]
pub fn polyline_length(verts: &[LonLat]) -> f64 {
    verts.windows(2).map(|pair| distance(pair[0], pair[1])).sum()
}

/// Removes interior vertices closer than `min_spacing` meters to the last
/// kept vertex. The first and last vertex are always kept, even when they
/// sit within `min_spacing` of their neighbor.
#[must_use]
pub fn collapse_near_vertices(verts: &[LonLat], min_spacing: f64) -> Vec<LonLat> {
    if verts.len() <= 2 {
        return verts.to_vec();
    }
    let mut out = Vec::with_capacity(verts.len());
    let mut last_kept = verts[0];
    out.push(last_kept);
    for v in &verts[1..verts.len() - 1] {
        if distance(last_kept, *v) > min_spacing {
            out.push(*v);
            last_kept = *v;
        }
    }
    out.push(verts[verts.len() - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: f64 = 1e-6; // degree tolerance for projection asserts

    #[test]
    fn haversine_matches_equator_arc() {
        // One degree of longitude at the equator is ~111.2 km.
        let a = LonLat::new(0.0, 0.0);
        let b = LonLat::new(1.0, 0.0);
        let d = distance(a, b);
        assert!((d - 111_195.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn segment_projection_clamps_to_endpoints() {
        let a = LonLat::new(0.0, 0.0);
        let b = LonLat::new(1.0, 0.0);
        let before = nearest_point_on_segment(a, b, LonLat::new(-0.5, 0.2));
        let after = nearest_point_on_segment(a, b, LonLat::new(1.5, -0.2));
        assert!((before.lon - a.lon).abs() < M && (before.lat - a.lat).abs() < M);
        assert!((after.lon - b.lon).abs() < M && (after.lat - b.lat).abs() < M);
    }

    #[test]
    fn segment_projection_hits_interior() {
        let a = LonLat::new(0.0, 0.0);
        let b = LonLat::new(2.0, 0.0);
        let p = nearest_point_on_segment(a, b, LonLat::new(0.5, 1.0));
        assert!((p.lon - 0.5).abs() < M);
        assert!(p.lat.abs() < M);
    }

    #[test]
    fn polyline_nearest_keeps_earliest_segment_on_tie() {
        // The polyline doubles back over itself, so both segments are
        // geometrically identical and equidistant from the query point; the
        // earlier one must win.
        let verts = [
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(0.0, 0.0),
        ];
        let hit = nearest_point_on_polyline(&verts, LonLat::new(0.5, 0.2));
        assert!(hit.is_some());
        if let Some(hit) = hit {
            assert_eq!(hit.segment, 0);
        }
    }

    #[test]
    fn polyline_nearest_empty_is_none() {
        assert!(nearest_point_on_polyline(&[], LonLat::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn polyline_length_sums_segments() {
        let verts = [
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(2.0, 0.0),
        ];
        let l = polyline_length(&verts);
        let d = distance(verts[0], verts[1]) + distance(verts[1], verts[2]);
        assert!((l - d).abs() < 1e-9);
    }

    #[test]
    fn collapse_keeps_endpoints_and_drops_dense_interior() {
        // Interior vertices ~0.11 m apart collapse under a 1 m threshold.
        let verts = [
            LonLat::new(0.0, 0.0),
            LonLat::new(0.000_001, 0.0),
            LonLat::new(0.000_002, 0.0),
            LonLat::new(1.0, 0.0),
        ];
        let out = collapse_near_vertices(&verts, 1.0);
        assert_eq!(out, vec![verts[0], verts[3]]);
    }

    #[test]
    fn collapse_keeps_distant_interior_vertices() {
        let verts = [
            LonLat::new(0.0, 0.0),
            LonLat::new(0.5, 0.0),
            LonLat::new(1.0, 0.0),
        ];
        let out = collapse_near_vertices(&verts, 1.0);
        assert_eq!(out, verts.to_vec());
    }
}
