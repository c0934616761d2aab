//! Sun-disk highlight and sun direction helpers.

use glam::{Quat, Vec3};

/// Exponent of the sun-disk falloff `cos_gamma^256`.
pub const SUN_DISK_EXPONENT: i32 = 256;

/// Intensity of the sun-disk highlight, added equally to every channel.
pub const SUN_DISK_INTENSITY: f32 = 0.5;

/// Sun-disk contribution for a view direction at `cos_gamma` from the sun.
///
/// Zero unless the view lies within 90° of the sun, so no antipodal highlight
/// appears.
pub fn sun_disk(cos_gamma: f32) -> f32 {
    if cos_gamma > 0.0 {
        cos_gamma.powi(SUN_DISK_EXPONENT) * SUN_DISK_INTENSITY
    } else {
        0.0
    }
}

/// Unit sun direction for an elevation above the horizon and an azimuth about
/// the up axis, both in radians.
///
/// Elevation 0 and azimuth 0 point along +Z; positive elevation raises the sun
/// towards +Y.
pub fn sun_direction(elevation: f32, azimuth: f32) -> Vec3 {
    let pitch = Quat::from_axis_angle(Vec3::NEG_X, elevation);
    let yaw = Quat::from_axis_angle(Vec3::Y, azimuth);
    (yaw * (pitch * Vec3::Z)).normalize()
}

/// Zenith angle of the sun, with the sun clamped to the horizon when below it.
pub fn sun_zenith_angle(sun_direction: Vec3) -> f32 {
    sun_direction.y.clamp(0.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_disk_is_zero_behind_the_viewer() {
        assert_eq!(sun_disk(0.0), 0.0);
        assert_eq!(sun_disk(-1.0), 0.0);
        assert_eq!(sun_disk(-0.999), 0.0);
    }

    #[test]
    fn test_disk_peaks_when_looking_at_the_sun() {
        assert_eq!(sun_disk(1.0), 0.5);
    }

    #[test]
    fn test_disk_is_narrow() {
        // 20° off the sun the highlight is already negligible.
        let off_axis = 20f32.to_radians().cos();
        assert!(sun_disk(off_axis) < 1e-3);
    }

    #[test]
    fn test_zero_angles_point_along_z() {
        let dir = sun_direction(0.0, 0.0);
        assert!((dir - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_elevation_raises_the_sun() {
        let dir = sun_direction(FRAC_PI_2, 0.0);
        assert!((dir - Vec3::Y).length() < 1e-6, "got {dir:?}");

        let dir = sun_direction(FRAC_PI_4, 0.0);
        assert!((dir.y - FRAC_PI_4.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_azimuth_rotates_about_up() {
        let dir = sun_direction(0.3, FRAC_PI_2);
        assert!((dir.y - 0.3f32.sin()).abs() < 1e-6);
        assert!(dir.z.abs() < 1e-6);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zenith_angle_clamps_below_horizon() {
        assert!((sun_zenith_angle(Vec3::Y)).abs() < 1e-6);
        assert!((sun_zenith_angle(Vec3::NEG_Y) - FRAC_PI_2).abs() < 1e-6);
    }
}
