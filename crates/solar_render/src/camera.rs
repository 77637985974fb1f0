//! Fixed viewpoint camera
//!
//! The camera never moves. It backs away from the origin along +Z and tilts
//! the orbital plane towards the viewer so the orbits read as ellipses.

use solar_math::{mat4, Mat4, Vec3};

/// Camera with a fixed viewpoint and a perspective projection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewCamera {
    /// Distance from the origin
    pub distance: f32,
    /// Tilt of the orbital plane about +X, in degrees
    pub tilt: f32,
    /// Vertical field of view, in degrees
    pub fov: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            distance: 8.0,
            tilt: 15.0,
            fov: 60.0,
            near: 1.0,
            far: 30.0,
        }
    }
}

impl ViewCamera {
    /// Create a camera
    pub fn new(distance: f32, tilt: f32, fov: f32, near: f32, far: f32) -> Self {
        Self {
            distance,
            tilt,
            fov,
            near,
            far,
        }
    }

    /// World to view transform: tilt, then back away
    pub fn view_matrix(&self) -> Mat4 {
        mat4::mul(
            mat4::translation(Vec3::new(0.0, 0.0, -self.distance)),
            mat4::rotation_x(self.tilt),
        )
    }

    /// Perspective projection for a viewport aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), aspect, self.near, self.far)
    }

    /// Position of the eye in world space
    pub fn eye_position(&self) -> Vec3 {
        mat4::transform_point(mat4::rotation_x(-self.tilt), Vec3::new(0.0, 0.0, self.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_origin_is_in_front_of_camera() {
        let camera = ViewCamera::default();
        let origin = mat4::transform_point(camera.view_matrix(), Vec3::ZERO);
        assert!(approx_eq(origin.x, 0.0));
        assert!(approx_eq(origin.y, 0.0));
        assert!(approx_eq(origin.z, -8.0));
    }

    #[test]
    fn test_eye_is_above_plane() {
        let camera = ViewCamera::default();
        let eye = camera.eye_position();
        assert!(eye.y > 0.0, "eye at {:?}", eye);
        assert!(approx_eq(eye.length(), 8.0));
    }

    #[test]
    fn test_eye_maps_to_view_origin() {
        let camera = ViewCamera::default();
        let eye = mat4::transform_point(camera.view_matrix(), camera.eye_position());
        assert!(eye.length() < 0.001, "eye maps to {:?}", eye);
    }

    #[test]
    fn test_far_side_of_orbit_appears_higher() {
        let camera = ViewCamera::default();
        let near_side = mat4::transform_point(camera.view_matrix(), Vec3::new(0.0, 0.0, 2.0));
        let far_side = mat4::transform_point(camera.view_matrix(), Vec3::new(0.0, 0.0, -2.0));
        assert!(far_side.y > near_side.y);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = ViewCamera::default();
        let proj = camera.projection_matrix(600.0 / 360.0);

        let depth = |z: f32| {
            let clip_z = proj[2][2] * z + proj[3][2];
            let clip_w = proj[2][3] * z;
            clip_z / clip_w
        };
        assert!(approx_eq(depth(-camera.near), 0.0));
        assert!(approx_eq(depth(-camera.far), 1.0));
    }
}
