//! Triangle-mesh-sphere collision detection

use super::sphere_box::fallback_normal;
use super::{surrounding_sphere_vs_sphere, CollisionType, HitData, DIRECTION_EPSILON};
use crate::shapes::{Hull, Sphere};

/// Detect collision between a hull and a sphere.
///
/// Every world-space triangle is searched for the point closest to the
/// sphere center; the nearest one inside the radius decides the hit. The
/// normal points from the hull toward the sphere.
#[must_use]
pub fn hull_vs_sphere(hull: &Hull, sphere: &Sphere) -> HitData {
    if !surrounding_sphere_vs_sphere(&hull.surrounding_sphere(), sphere) {
        return HitData::miss();
    }

    let radius_squared = sphere.radius * sphere.radius;
    let closest = hull
        .world_triangles()
        .map(|triangle| {
            let point = triangle.closest_point(sphere.center);
            (point, point.distance_squared(sphere.center))
        })
        .filter(|&(_, distance_squared)| distance_squared < radius_squared)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let Some((point, distance_squared)) = closest else {
        return HitData::miss();
    };

    let distance = distance_squared.sqrt();
    let normal = if distance > DIRECTION_EPSILON {
        (sphere.center - point) / distance
    } else {
        fallback_normal(hull.position(), sphere.center)
    };

    HitData::hit(CollisionType::HullVsSphere, normal, point, sphere.radius - distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Triangle;
    use glam::Vec3;

    fn ramp() -> Hull {
        // Two triangles forming a 1x1 quad in the XZ plane at y = 0.
        Hull::new(
            vec![
                Triangle::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 1.0)),
                Triangle::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
            ],
            Vec3::ZERO,
        )
    }

    #[test]
    fn sphere_resting_on_face() {
        let sphere = Sphere::new(0.5, Vec3::new(0.5, 0.4, 0.25));
        let hit = hull_vs_sphere(&ramp(), &sphere);

        assert!(hit.intersect);
        assert_eq!(hit.col_type, CollisionType::HullVsSphere);
        assert!((hit.col_norm - Vec3::Y).length() < 1e-6);
        assert!((hit.col_length - 0.1).abs() < 1e-6);
        assert!((hit.col_pos - Vec3::new(50.0, 0.0, 25.0)).length() < 1e-3);
    }

    #[test]
    fn sphere_against_edge_pushes_diagonally() {
        let sphere = Sphere::new(0.5, Vec3::new(1.3, 0.3, 0.5));
        let hit = hull_vs_sphere(&ramp(), &sphere);

        assert!(hit.intersect);
        let expected = Vec3::new(0.3, 0.3, 0.0).normalize();
        assert!((hit.col_norm - expected).length() < 1e-5);
    }

    #[test]
    fn sphere_off_the_mesh_misses() {
        let sphere = Sphere::new(0.5, Vec3::new(2.0, 0.0, 0.5));
        assert!(!hull_vs_sphere(&ramp(), &sphere).intersect);
    }

    #[test]
    fn center_on_surface_uses_fallback() {
        let hull = Hull::new(ramp().world_triangles().collect(), Vec3::new(0.5, -1.0, 0.5));
        let sphere = Sphere::new(0.5, Vec3::new(1.0, -1.0, 1.0));
        let hit = hull_vs_sphere(&hull, &sphere);

        assert!(hit.intersect);
        let expected = Vec3::new(0.5, 0.0, 0.5).normalize();
        assert!((hit.col_norm - expected).length() < 1e-5);
        assert!((hit.col_length - 0.5).abs() < 1e-6);
    }
}
