use glam::{Mat3, Vec3};

use super::Sphere;

/// Oriented box. `axes` holds the box's local X/Y/Z directions as columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Obb {
    center: Vec3,
    half_extents: Vec3,
    axes: Mat3,
    sphere: Sphere,
}

impl Obb {
    #[must_use]
    pub fn new(center: Vec3, half_extents: Vec3, axes: Mat3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            center,
            half_extents,
            axes,
            sphere: Sphere::new(half_extents.length(), center),
        }
    }

    #[must_use]
    pub fn axis_aligned(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center, half_extents, Mat3::IDENTITY)
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    #[must_use]
    pub fn axes(&self) -> [Vec3; 3] {
        [self.axes.x_axis, self.axes.y_axis, self.axes.z_axis]
    }

    #[must_use]
    pub fn rotation(&self) -> Mat3 {
        self.axes
    }

    #[must_use]
    pub fn surrounding_sphere(&self) -> Sphere {
        self.sphere
    }

    pub fn update_position(&mut self, delta: Vec3) {
        self.center += delta;
        self.sphere.center = self.center;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.center = position;
        self.sphere.center = position;
    }

    pub fn set_rotation(&mut self, rotation: Mat3) {
        self.axes = rotation;
    }

    pub fn scale(&mut self, scale: Vec3) {
        self.half_extents *= scale.abs();
        self.sphere.radius = self.half_extents.length();
    }

    /// Closest point inside or on the box to `point`.
    #[must_use]
    pub fn find_closest_pt(&self, point: Vec3) -> Vec3 {
        let d = point - self.center;
        let half = self.half_extents.to_array();
        self.axes()
            .iter()
            .zip(half)
            .fold(self.center, |q, (axis, extent)| {
                q + *axis * d.dot(*axis).clamp(-extent, extent)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_point_clamps_to_faces() {
        let obb = Obb::axis_aligned(Vec3::ZERO, Vec3::ONE);
        assert_eq!(obb.find_closest_pt(Vec3::new(5.0, 0.5, -3.0)), Vec3::new(1.0, 0.5, -1.0));
        assert_eq!(obb.find_closest_pt(Vec3::new(0.2, 0.1, 0.0)), Vec3::new(0.2, 0.1, 0.0));
    }

    #[test]
    fn closest_point_respects_orientation() {
        let rot = Mat3::from_rotation_z(std::f32::consts::FRAC_PI_4);
        let obb = Obb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), rot);
        // Along the rotated local X the face sits at distance 1.
        let far = rot.x_axis * 10.0;
        let q = obb.find_closest_pt(far);
        assert!((q - rot.x_axis).length() < 1e-5);
    }
}
