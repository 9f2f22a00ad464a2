//! Pointer ray construction and hit testing against markers and connection
//! tubes.

use glam::{Mat4, Vec3};

use crate::constants::{MARKER_PICK_RADIUS, PATH_PICK_RADIUS};
use crate::paths::ConnectionPath;

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Map a pointer position in pixels to normalized device coordinates.
#[inline]
pub fn pointer_ndc(px: f32, py: f32, width: f32, height: f32) -> (f32, f32) {
    ((px / width) * 2.0 - 1.0, -((py / height) * 2.0 - 1.0))
}

impl Ray {
    /// Unproject an NDC point on the near and far planes and shoot between
    /// them.
    pub fn from_ndc(ndc_x: f32, ndc_y: f32, view_proj: &Mat4) -> Self {
        let inv = view_proj.inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Self {
            origin: near,
            dir: (far - near).normalize_or_zero(),
        }
    }

    /// Nearest forward intersection with a sphere, or `None`.
    pub fn hit_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        (t > 0.0).then_some(t)
    }

    /// Shortest distance from the ray to a segment, ignoring hits behind the
    /// ray origin.
    pub fn segment_distance(&self, a: Vec3, b: Vec3) -> f32 {
        let u = self.dir;
        let v = b - a;
        let w = self.origin - a;
        let uu = u.dot(u);
        let uv = u.dot(v);
        let vv = v.dot(v);
        let uw = u.dot(w);
        let vw = v.dot(w);
        let denom = uu * vv - uv * uv;
        let (s, t) = if denom.abs() < 1e-9 {
            // parallel; clamp to the segment start
            ((-uw / uu.max(1e-9)).max(0.0), 0.0)
        } else {
            let t = ((uu * vw - uv * uw) / denom).clamp(0.0, 1.0);
            // ray parameter must stay non-negative
            let s = ((uv * t - uw) / uu.max(1e-9)).max(0.0);
            (s, t)
        };
        let p_ray = self.origin + u * s;
        let p_seg = a + v * t;
        p_ray.distance(p_seg)
    }
}

/// Markers win picking priority; return the nearest marker whose pick sphere
/// the ray enters.
pub fn pick_marker(ray: &Ray, positions: &[Vec3]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in positions.iter().enumerate() {
        if let Some(t) = ray.hit_sphere(p, MARKER_PICK_RADIUS) {
            if best.map_or(true, |(_, bt)| t < bt) {
                best = Some((i, t));
            }
        }
    }
    best.map(|(i, _)| i)
}

/// Test connection tubes by walking each path's control polyline.
pub fn pick_path(ray: &Ray, paths: &[ConnectionPath]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, path) in paths.iter().enumerate() {
        let pts = path.curve.control_points();
        for pair in pts.windows(2) {
            let d = ray.segment_distance(pair[0], pair[1]);
            if d < PATH_PICK_RADIUS && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
    }
    best.map(|(i, _)| i)
}
