//! Transform utilities for bounding volumes
//!
//! Helpers for building the world transform of model-space geometry (hull
//! triangles) from a position, rotation and scale, and for converting
//! rotations given in the host's formats into the `Mat3` frames the
//! collision code works with.

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// Build a model-to-world matrix: scale first, then rotate, then translate.
#[must_use]
pub fn to_transform_matrix(position: Vec3, rotation: Mat3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_mat3(rotation) * Mat4::from_scale(scale)
}

/// Rotation frame from yaw (Y), pitch (X) and roll (Z) angles in degrees.
#[must_use]
pub fn rotation_from_degrees(yaw: f32, pitch: f32, roll: f32) -> Mat3 {
    Mat3::from_euler(
        EulerRot::YXZ,
        yaw.to_radians(),
        pitch.to_radians(),
        roll.to_radians(),
    )
}

/// Rotation frame from an `[x, y, z, w]` quaternion.
#[must_use]
pub fn rotation_from_quat(orientation: [f32; 4]) -> Mat3 {
    let quat = Quat::from_xyzw(orientation[0], orientation[1], orientation[2], orientation[3]);
    Mat3::from_quat(quat.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let transform = to_transform_matrix(Vec3::ZERO, Mat3::IDENTITY, Vec3::ONE);
        assert_eq!(transform, Mat4::IDENTITY);
    }

    #[test]
    fn test_translation_only() {
        let transform = to_transform_matrix(Vec3::new(1.0, 2.0, 3.0), Mat3::IDENTITY, Vec3::ONE);
        assert_eq!(transform.w_axis.to_array(), [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_scale_applied_before_rotation() {
        let rot = rotation_from_degrees(90.0, 0.0, 0.0);
        let transform = to_transform_matrix(Vec3::ZERO, rot, Vec3::new(2.0, 1.0, 1.0));
        // Local +X is doubled, then yawed onto -Z.
        let p = transform.transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_identity_quaternion() {
        let rot = rotation_from_quat([0.0, 0.0, 0.0, 1.0]);
        assert!(rot.abs_diff_eq(Mat3::IDENTITY, 1e-6));
    }
}
