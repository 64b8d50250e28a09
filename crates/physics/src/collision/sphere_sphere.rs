//! Sphere-sphere collision detection

use glam::Vec3;

use super::{CollisionType, HitData, DIRECTION_EPSILON};
use crate::shapes::Sphere;

/// Detect collision between two spheres.
///
/// The normal runs from `sphere2` toward `sphere1` and the contact point is
/// on the surface of `sphere2`.
#[must_use]
pub fn sphere_vs_sphere(sphere1: &Sphere, sphere2: &Sphere) -> HitData {
    let delta = sphere1.center - sphere2.center;
    let distance_squared = delta.length_squared();
    let radius_sum = sphere1.radius + sphere2.radius;

    if distance_squared >= radius_sum * radius_sum {
        return HitData::miss();
    }

    let distance = distance_squared.sqrt();
    // Concentric spheres have no preferred direction
    let normal = if distance > DIRECTION_EPSILON {
        delta / distance
    } else {
        Vec3::Y
    };
    let contact = sphere2.center + normal * sphere2.radius;

    HitData::hit(CollisionType::SphereVsSphere, normal, contact, radius_sum - distance)
}
