//! CPU-side mesh generation for everything the renderer draws: the globe
//! shells, marker parts, airplane model and connection tubes.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::constants::{TUBE_RADIAL_SEGMENTS, TUBE_RADIUS};
use crate::curve::CatmullRom3;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        idx
    }

    fn tri(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.tri(a, b, c);
        self.tri(a, c, d);
    }

    /// Append `other` with every vertex run through `transform`.
    pub fn merge(&mut self, other: &Mesh, transform: Mat4) {
        let base = self.vertices.len() as u32;
        let normal_m = Mat4::from_mat3(glam::Mat3::from_mat4(transform).inverse().transpose());
        for v in &other.vertices {
            let p = transform.transform_point3(Vec3::from(v.position));
            let n = normal_m
                .transform_vector3(Vec3::from(v.normal))
                .normalize_or_zero();
            self.vertices.push(Vertex { position: p.to_array(), normal: n.to_array() });
        }
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Latitude/longitude sphere centered at the origin.
pub fn uv_sphere(radius: f32, rows: u32, cols: u32) -> Mesh {
    let mut mesh = Mesh::default();
    for row in 0..=rows {
        let phi = std::f32::consts::PI * row as f32 / rows as f32;
        for col in 0..=cols {
            let theta = TAU * col as f32 / cols as f32;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.push(n * radius, n);
        }
    }
    let stride = cols + 1;
    for row in 0..rows {
        for col in 0..cols {
            let a = row * stride + col;
            let b = a + stride;
            mesh.quad(a, b, b + 1, a + 1);
        }
    }
    mesh
}

/// Flat annulus in the XY plane, facing +Z.
pub fn ring(inner: f32, outer: f32, segments: u32) -> Mesh {
    let mut mesh = Mesh::default();
    for seg in 0..=segments {
        let theta = TAU * seg as f32 / segments as f32;
        let dir = Vec3::new(theta.cos(), theta.sin(), 0.0);
        mesh.push(dir * inner, Vec3::Z);
        mesh.push(dir * outer, Vec3::Z);
    }
    for seg in 0..segments {
        let a = seg * 2;
        mesh.quad(a, a + 1, a + 3, a + 2);
    }
    mesh
}

/// Open-ended cylinder along +Y, centered at the origin.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> Mesh {
    let mut mesh = Mesh::default();
    let half = height / 2.0;
    for seg in 0..=segments {
        let theta = TAU * seg as f32 / segments as f32;
        let n = Vec3::new(theta.cos(), 0.0, theta.sin());
        mesh.push(n * radius + Vec3::Y * half, n);
        mesh.push(n * radius - Vec3::Y * half, n);
    }
    for seg in 0..segments {
        let a = seg * 2;
        mesh.quad(a, a + 2, a + 3, a + 1);
    }
    mesh
}

/// Cone along +Y with its apex at +height/2.
pub fn cone(radius: f32, height: f32, segments: u32) -> Mesh {
    let mut mesh = Mesh::default();
    let half = height / 2.0;
    let apex = Vec3::Y * half;
    let slope = radius / height;
    for seg in 0..segments {
        let t0 = TAU * seg as f32 / segments as f32;
        let t1 = TAU * (seg + 1) as f32 / segments as f32;
        let p0 = Vec3::new(t0.cos() * radius, -half, t0.sin() * radius);
        let p1 = Vec3::new(t1.cos() * radius, -half, t1.sin() * radius);
        let mid = (t0 + t1) / 2.0;
        let n = Vec3::new(mid.cos(), slope, mid.sin()).normalize();
        let a = mesh.push(apex, n);
        let b = mesh.push(p0, Vec3::new(t0.cos(), slope, t0.sin()).normalize());
        let c = mesh.push(p1, Vec3::new(t1.cos(), slope, t1.sin()).normalize());
        mesh.tri(a, c, b);
        // base cap
        let center = mesh.push(Vec3::Y * -half, -Vec3::Y);
        let b2 = mesh.push(p0, -Vec3::Y);
        let c2 = mesh.push(p1, -Vec3::Y);
        mesh.tri(center, b2, c2);
    }
    mesh
}

/// Axis-aligned box centered at the origin.
pub fn cuboid(w: f32, h: f32, d: f32) -> Mesh {
    let mut mesh = Mesh::default();
    let (x, y, z) = (w / 2.0, h / 2.0, d / 2.0);
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (-Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, Vec3::Y, Vec3::X),
    ];
    let ext = Vec3::new(x, y, z);
    for (n, u, v) in faces {
        let nu = u * u.dot(ext).abs();
        let nv = v * v.dot(ext).abs();
        let nn = n * n.dot(ext).abs();
        let a = mesh.push(nn - nu - nv, n);
        let b = mesh.push(nn + nu - nv, n);
        let c = mesh.push(nn + nu + nv, n);
        let d = mesh.push(nn - nu + nv, n);
        mesh.quad(a, b, c, d);
    }
    mesh
}

/// The little airplane: cone fuselage pointing down +Z, box wings and tail.
pub fn airplane() -> Mesh {
    let mut mesh = cone(0.05, 0.2, 8);
    let mut out = Mesh::default();
    // fuselage nose toward +Z
    out.merge(&mesh, Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2));
    mesh = cuboid(0.2, 0.05, 0.01);
    out.merge(&mesh, Mat4::from_translation(Vec3::new(0.0, -0.02, 0.0)));
    mesh = cuboid(0.08, 0.08, 0.01);
    out.merge(&mesh, Mat4::from_translation(Vec3::new(0.0, 0.03, -0.1)));
    out
}

/// Thicken a curve into a tube. Frames are propagated along the curve from an
/// arbitrary initial normal to avoid twisting.
pub fn tube(curve: &CatmullRom3, segments: usize) -> Mesh {
    let mut mesh = Mesh::default();
    let radial = TUBE_RADIAL_SEGMENTS as u32;

    let mut prev_normal: Option<Vec3> = None;
    for seg in 0..=segments {
        let t = seg as f32 / segments as f32;
        let center = curve.point_at(t);
        let tangent = curve.tangent_at(t);
        let mut normal = match prev_normal {
            Some(n) => (n - tangent * n.dot(tangent)).normalize_or_zero(),
            None => {
                let pick = if tangent.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
                tangent.cross(pick).normalize_or_zero()
            }
        };
        if normal.length_squared() < 1e-8 {
            normal = tangent.any_orthonormal_vector();
        }
        prev_normal = Some(normal);
        let binormal = tangent.cross(normal);
        for r in 0..=radial {
            let theta = TAU * r as f32 / radial as f32;
            let n = normal * theta.cos() + binormal * theta.sin();
            mesh.push(center + n * TUBE_RADIUS, n);
        }
    }
    let stride = radial + 1;
    for seg in 0..segments as u32 {
        for r in 0..radial {
            let a = seg * stride + r;
            let b = a + stride;
            mesh.quad(a, b, b + 1, a + 1);
        }
    }
    mesh
}
