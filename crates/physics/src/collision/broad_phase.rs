//! Broad-phase rejection using surrounding spheres

use crate::shapes::Sphere;

/// Conservative overlap test between two bounding spheres. Touching counts
/// as overlapping so no true contact is ever rejected.
#[must_use]
pub fn surrounding_sphere_vs_sphere(a: &Sphere, b: &Sphere) -> bool {
    let reach = a.radius + b.radius;
    a.center.distance_squared(b.center) <= reach * reach
}
