//! Rotation-only camera for looking around the sky dome.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use skydome_model::VertexUniforms;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Radians of rotation per unit of look input (e.g. one pixel of mouse motion).
pub const LOOK_SPEED: f32 = 0.0015;

/// Pitch stays this far away from straight up or down so the view basis
/// never degenerates.
pub const PITCH_MARGIN: f32 = 1e-3;

/// A camera that sits at the dome center and only rotates.
///
/// At yaw and pitch zero it looks down -Z with +Y up. Positive yaw turns
/// towards -X, positive pitch looks up.
#[derive(Debug, Clone)]
pub struct SkyCamera {
    /// Rotation about +Y in radians, kept in `[0, 2π)`.
    pub yaw: f32,
    /// Elevation of the view direction in radians.
    pub pitch: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl SkyCamera {
    /// Create a camera with the given orientation and vertical field of view.
    pub fn new(yaw: f32, pitch: f32, fov_y: f32, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            fov_y,
            aspect_ratio,
            ..Default::default()
        };
        camera.set_orientation(yaw, pitch);
        camera
    }

    /// Set yaw and pitch, wrapping yaw and clamping pitch.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw.rem_euclid(TAU);
        self.pitch = pitch.clamp(-FRAC_PI_2 + PITCH_MARGIN, FRAC_PI_2 - PITCH_MARGIN);
    }

    /// Apply look input, scaled by [`LOOK_SPEED`].
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.set_orientation(self.yaw + dx * LOOK_SPEED, self.pitch + dy * LOOK_SPEED);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Update aspect ratio (call on resize).
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Standard perspective projection with a `[0, 1]` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    /// View matrix without translation: the dome stays centered on the viewer.
    pub fn orientation_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation().conjugate())
    }

    /// Vertex-stage uniforms for the current view.
    pub fn vertex_uniforms(&self) -> VertexUniforms {
        VertexUniforms {
            projection: self.projection_matrix(),
            orientation: self.orientation_matrix(),
        }
    }

    /// World-space unit direction through a point in normalized device
    /// coordinates (`[-1, 1]` on both axes, +Y up).
    pub fn ray_direction(&self, ndc: Vec2) -> Vec3 {
        let inverse = (self.projection_matrix() * self.orientation_matrix()).inverse();
        let far = inverse * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        (far.truncate() / far.w).normalize()
    }
}

impl Default for SkyCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 70f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn assert_vec3_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_camera_looks_down_neg_z() {
        let camera = SkyCamera::default();
        assert_vec3_near(camera.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn test_positive_pitch_looks_up() {
        let camera = SkyCamera::new(0.0, 0.5, 1.0, 1.0);
        assert!(camera.forward().y > 0.0);
    }

    #[test]
    fn test_positive_yaw_turns_towards_neg_x() {
        let camera = SkyCamera::new(FRAC_PI_2, 0.0, 1.0, 1.0);
        assert_vec3_near(camera.forward(), Vec3::NEG_X);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = SkyCamera::default();
        camera.look(0.0, 1.0e6);
        assert!(camera.pitch < FRAC_PI_2);
        assert!(camera.forward().y < 1.0);
        camera.look(0.0, -2.0e6);
        assert!(camera.pitch > -FRAC_PI_2);
    }

    #[test]
    fn test_yaw_wraps() {
        let camera = SkyCamera::new(-PI, 0.0, 1.0, 1.0);
        assert!((camera.yaw - PI).abs() < 1e-5);
        let camera = SkyCamera::new(3.0 * TAU + 0.25, 0.0, 1.0, 1.0);
        assert!((camera.yaw - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_look_scales_by_speed() {
        let mut camera = SkyCamera::default();
        camera.look(100.0, 0.0);
        assert!((camera.yaw - 100.0 * LOOK_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_orientation_has_no_translation() {
        let camera = SkyCamera::new(1.2, -0.3, 1.0, 1.5);
        assert_eq!(camera.orientation_matrix().col(3), Vec4::W);
    }

    #[test]
    fn test_orientation_maps_forward_to_neg_z() {
        let camera = SkyCamera::new(0.7, 0.4, 1.0, 1.0);
        let view_space = camera.orientation_matrix().transform_vector3(camera.forward());
        assert_vec3_near(view_space, Vec3::NEG_Z);
    }

    #[test]
    fn test_center_ray_is_forward() {
        let camera = SkyCamera::new(2.0, 0.3, 1.2, 2.0);
        assert_vec3_near(camera.ray_direction(Vec2::ZERO), camera.forward());
    }

    #[test]
    fn test_top_edge_ray_is_half_fov_above_forward() {
        let camera = SkyCamera::new(0.0, 0.0, 1.0, 1.0);
        let top = camera.ray_direction(Vec2::new(0.0, 1.0));
        let angle = top.dot(camera.forward()).clamp(-1.0, 1.0).acos();
        assert!((angle - 0.5).abs() < 1e-4);
        assert!(top.y > 0.0);
    }

    #[test]
    fn test_set_aspect_ratio_ignores_zero_height() {
        let mut camera = SkyCamera::default();
        camera.set_aspect_ratio(800.0, 400.0);
        assert_eq!(camera.aspect_ratio, 2.0);
        camera.set_aspect_ratio(800.0, 0.0);
        assert_eq!(camera.aspect_ratio, 2.0);
    }

    #[test]
    fn test_vertex_uniforms_match_matrices() {
        let camera = SkyCamera::new(0.4, 0.1, 1.0, 1.5);
        let uniforms = camera.vertex_uniforms();
        assert_eq!(uniforms.projection, camera.projection_matrix());
        assert_eq!(uniforms.orientation, camera.orientation_matrix());
    }
}
