//! Catmull-Rom sampling over open 3D point chains.

use glam::Vec3;

#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    #[error("curve needs at least 2 control points, got {0}")]
    TooFewPoints(usize),
}

/// Uniform Catmull-Rom spline through a chain of control points.
///
/// Endpoints are handled by clamping the neighbor indices, so the curve
/// passes through every control point including the first and last.
#[derive(Clone, Debug)]
pub struct CatmullRom3 {
    points: Vec<Vec3>,
}

impl CatmullRom3 {
    pub fn new(points: Vec<Vec3>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints(points.len()));
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Map global `t` in [0,1] to a segment index and local parameter.
    #[inline]
    fn segment(&self, t: f32) -> (usize, f32) {
        let segments = self.points.len() - 1;
        let t = t.clamp(0.0, 1.0) * segments as f32;
        let i = (t.floor() as usize).min(segments - 1);
        (i, t - i as f32)
    }

    #[inline]
    fn basis(&self, i: usize) -> (Vec3, Vec3, Vec3, Vec3) {
        let last = self.points.len() - 1;
        let p0 = self.points[i.saturating_sub(1)];
        let p1 = self.points[i];
        let p2 = self.points[(i + 1).min(last)];
        let p3 = self.points[(i + 2).min(last)];
        (p0, p1, p2, p3)
    }

    /// Position on the curve at `t` in [0,1].
    pub fn point_at(&self, t: f32) -> Vec3 {
        let (i, u) = self.segment(t);
        let (p0, p1, p2, p3) = self.basis(i);
        let u2 = u * u;
        let u3 = u2 * u;
        0.5 * ((2.0 * p1)
            + (p2 - p0) * u
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
    }

    /// Normalized tangent at `t`. Falls back to +X when the local segment
    /// collapses (duplicate control points), so callers never see NaN.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (i, u) = self.segment(t);
        let (p0, p1, p2, p3) = self.basis(i);
        let u2 = u * u;
        let d = 0.5
            * ((p2 - p0)
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * (2.0 * u)
                + (3.0 * p1 - p0 - 3.0 * p2 + p3) * (3.0 * u2));
        if d.length_squared() > 1e-12 {
            d.normalize()
        } else {
            Vec3::X
        }
    }
}
