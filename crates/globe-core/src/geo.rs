//! Geographic-to-Cartesian projection.

use glam::{Mat4, Vec3};

/// Convert latitude/longitude (degrees) to a point on a sphere of `radius`
/// centered at the origin.
///
/// Polar angle comes from latitude, azimuth from longitude with a fixed 180
/// degree offset so the texture seam sits at the back of the sphere.
#[inline]
pub fn lat_lon_to_vec3(lat: f32, lon: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();

    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Same as [`lat_lon_to_vec3`] but transformed by the globe's live world
/// matrix, so the result tracks the globe's current rotation and scale.
#[inline]
pub fn lat_lon_to_vec3_in(world: &Mat4, lat: f32, lon: f32, radius: f32) -> Vec3 {
    world.transform_point3(lat_lon_to_vec3(lat, lon, radius))
}

/// Globe yaw that centers the given longitude toward the initial camera.
#[inline]
pub fn centering_yaw(lon: f32) -> f32 {
    -lon.to_radians() - std::f32::consts::FRAC_PI_2
}
