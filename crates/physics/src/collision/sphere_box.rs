//! Sphere-box collision detection

use glam::Vec3;

use super::{surrounding_sphere_vs_sphere, CollisionType, HitData, DIRECTION_EPSILON};
use crate::shapes::{Aabb, Obb, Sphere};

/// Detect collision between an axis-aligned box and a sphere.
///
/// The normal points from the box toward the sphere center. When the center
/// lies inside the box the closest point is the center itself and the normal
/// is left as zero; callers must tolerate that.
#[must_use]
pub fn aabb_vs_sphere(aabb: &Aabb, sphere: &Sphere) -> HitData {
    let closest = sphere.center.clamp(aabb.min(), aabb.max());
    let delta = sphere.center - closest;
    let distance_squared = delta.length_squared();

    if distance_squared >= sphere.radius * sphere.radius {
        return HitData::miss();
    }

    let distance = distance_squared.sqrt();
    HitData::hit(
        CollisionType::AabbVsSphere,
        delta.normalize_or_zero(),
        closest,
        sphere.radius - distance,
    )
}

/// Detect collision between an oriented box and a sphere.
///
/// Same test as [`aabb_vs_sphere`] using the box's closest point, but a
/// center inside the box falls back to the box-center-to-sphere-center
/// direction instead of a zero normal.
#[must_use]
pub fn obb_vs_sphere(obb: &Obb, sphere: &Sphere) -> HitData {
    if !surrounding_sphere_vs_sphere(&obb.surrounding_sphere(), sphere) {
        return HitData::miss();
    }

    let closest = obb.find_closest_pt(sphere.center);
    let delta = sphere.center - closest;
    let distance_squared = delta.length_squared();

    if distance_squared >= sphere.radius * sphere.radius {
        return HitData::miss();
    }

    let distance = distance_squared.sqrt();
    let normal = if distance > DIRECTION_EPSILON {
        delta / distance
    } else {
        fallback_normal(obb.center(), sphere.center)
    };

    HitData::hit(CollisionType::ObbVsSphere, normal, closest, sphere.radius - distance)
}

/// Direction from a volume's center to a sphere center, or up when they
/// coincide.
pub(crate) fn fallback_normal(from: Vec3, to: Vec3) -> Vec3 {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec3::ZERO {
        Vec3::Y
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat3;

    #[test]
    fn sphere_centered_in_box_has_degenerate_normal() {
        let sphere = Sphere::new(1.0, Vec3::ZERO);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);

        let hit = aabb_vs_sphere(&aabb, &sphere);

        assert!(hit.intersect);
        assert_eq!(hit.col_norm, Vec3::ZERO);
        assert!((hit.col_length - 1.0).abs() < 1e-6);
        assert_eq!(hit.col_pos, Vec3::ZERO);
    }

    #[test]
    fn sphere_touching_box_face() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let sphere = Sphere::new(0.5, Vec3::new(0.0, 1.25, 0.0));

        let hit = aabb_vs_sphere(&aabb, &sphere);

        assert!(hit.intersect);
        assert!((hit.col_norm - Vec3::Y).length() < 1e-6);
        assert!((hit.col_length - 0.25).abs() < 1e-6);
        assert!((hit.col_pos - Vec3::new(0.0, 100.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn sphere_off_the_corner_misses() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let sphere = Sphere::new(0.5, Vec3::new(1.4, 1.4, 1.4));
        assert!(!aabb_vs_sphere(&aabb, &sphere).intersect);
    }

    #[test]
    fn rotated_box_pushes_along_face_normal() {
        let rot = Mat3::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let obb = Obb::new(Vec3::ZERO, Vec3::ONE, rot);
        let sphere = Sphere::new(0.5, rot.x_axis * 1.3);

        let hit = obb_vs_sphere(&obb, &sphere);

        assert!(hit.intersect);
        assert!((hit.col_norm - rot.x_axis).length() < 1e-5);
        assert!((hit.col_length - 0.2).abs() < 1e-5);
    }

    #[test]
    fn sphere_inside_obb_falls_back_to_center_direction() {
        let obb = Obb::axis_aligned(Vec3::ZERO, Vec3::splat(2.0));
        let sphere = Sphere::new(0.5, Vec3::new(0.0, 0.0, 0.5));

        let hit = obb_vs_sphere(&obb, &sphere);

        assert!(hit.intersect);
        assert!((hit.col_norm - Vec3::Z).length() < 1e-6);
    }
}
