//! Curved connection arcs between every pair of destinations.

use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use smallvec::SmallVec;

use crate::constants::{ARC_BASE_RADIUS, ARC_BULGE, ARC_ELEVATION, ARC_SEGMENTS, GLOBE_RADIUS};
use crate::curve::CatmullRom3;
use crate::geo::lat_lon_to_vec3_in;
use crate::locations::Location;

/// One curved arc between two distinct destinations.
#[derive(Clone, Debug)]
pub struct ConnectionPath {
    pub start: &'static str,
    pub end: &'static str,
    pub curve: CatmullRom3,
    pub highlighted: bool,
}

impl ConnectionPath {
    #[inline]
    pub fn touches(&self, name: &str) -> bool {
        self.start == name || self.end == name
    }
}

/// Sample the arc between two surface points: lerp the chord, push samples
/// outward with a t(1-t) bulge, then renormalize each sample onto a sphere
/// whose radius bulges by the same factor so the arc stays proud of the globe.
pub fn arc_points(start: Vec3, end: Vec3) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(ARC_SEGMENTS + 1);
    for k in 0..=ARC_SEGMENTS {
        let t = k as f32 / ARC_SEGMENTS as f32;
        let bulge = t * (1.0 - t);

        let mut p = start.lerp(end, t);
        p.y += bulge * ARC_ELEVATION;

        let radius = ARC_BASE_RADIUS + bulge * ARC_BULGE;
        // Degenerate pairs collapse near the origin; keep the sample finite.
        if p.length_squared() > 1e-12 {
            p = p.normalize() * radius;
        }
        points.push(p);
    }
    points
}

/// Build one connection per unordered pair of locations (n*(n-1)/2 total).
/// Endpoints are projected through the globe's world transform at build time.
pub fn build_connections(locations: &[Location], world: &Mat4) -> Vec<ConnectionPath> {
    let mut paths = Vec::with_capacity(locations.len() * locations.len().saturating_sub(1) / 2);
    for i in 0..locations.len() {
        for j in (i + 1)..locations.len() {
            let a = &locations[i];
            let b = &locations[j];
            let start = lat_lon_to_vec3_in(world, a.lat, a.lon, GLOBE_RADIUS);
            let end = lat_lon_to_vec3_in(world, b.lat, b.lon, GLOBE_RADIUS);

            // arc_points always yields ARC_SEGMENTS + 1 >= 2 samples.
            let curve = CatmullRom3::new(arc_points(start, end))
                .expect("arc sampling produced too few points");
            paths.push(ConnectionPath {
                start: a.name,
                end: b.name,
                curve,
                highlighted: false,
            });
        }
    }
    paths
}

/// Lookup from a location name to the indices of every path touching it.
#[derive(Clone, Debug, Default)]
pub struct PathIndex {
    by_name: FnvHashMap<&'static str, SmallVec<[usize; 8]>>,
}

impl PathIndex {
    pub fn build(paths: &[ConnectionPath]) -> Self {
        let mut by_name: FnvHashMap<&'static str, SmallVec<[usize; 8]>> = FnvHashMap::default();
        for (i, p) in paths.iter().enumerate() {
            by_name.entry(p.start).or_default().push(i);
            by_name.entry(p.end).or_default().push(i);
        }
        Self { by_name }
    }

    pub fn touching(&self, name: &str) -> &[usize] {
        self.by_name.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }
}
