//! Collision dispatcher that routes a volume pair to the matching routine
//!
//! Dispatch is two-level: [`bounding_volume_vs_bounding_volume`] switches on
//! the kind of `b`, the second-level dispatcher switches on the kind of `a`.
//! Concrete routines each have one canonical argument order; when the pair
//! arrives the other way round the result is flipped so the normal still
//! points from `b` toward `a`.

use super::{
    aabb_vs_aabb, aabb_vs_sphere, hull_vs_sphere, obb_vs_aabb, obb_vs_hull, obb_vs_obb,
    obb_vs_sphere, sphere_vs_sphere, HitData,
};
use crate::error::{PhysicsError, PhysicsResult};
use crate::shapes::{BoundingVolume, Shape};

/// Volumes owned by the same body never collide with each other.
fn same_body(a: &BoundingVolume, b: &BoundingVolume) -> bool {
    matches!((a.body, b.body), (Some(x), Some(y)) if x == y)
}

fn unsupported(a: &BoundingVolume, b: &BoundingVolume) -> PhysicsError {
    PhysicsError::unsupported(a.kind(), b.kind())
}

/// Test any supported pair of volumes.
///
/// # Errors
///
/// Returns [`PhysicsError::UnsupportedCollision`] when no routine exists for
/// the pair, including any pair with a `None` volume.
pub fn bounding_volume_vs_bounding_volume(
    a: &BoundingVolume,
    b: &BoundingVolume,
) -> PhysicsResult<HitData> {
    if same_body(a, b) {
        return Ok(HitData::miss());
    }

    match b.shape {
        Shape::Sphere(_) => bounding_volume_vs_sphere(a, b),
        Shape::Aabb(_) => bounding_volume_vs_aabb(a, b),
        Shape::Obb(_) => bounding_volume_vs_obb(a, b),
        Shape::Hull(_) => bounding_volume_vs_hull(a, b),
        Shape::None(_) => Err(unsupported(a, b)),
    }
}

/// Test any volume against a sphere.
///
/// # Errors
///
/// Returns [`PhysicsError::UnsupportedCollision`] when `b` is not a sphere
/// or `a` is a `None` volume.
pub fn bounding_volume_vs_sphere(a: &BoundingVolume, b: &BoundingVolume) -> PhysicsResult<HitData> {
    let Shape::Sphere(sphere) = &b.shape else {
        return Err(unsupported(a, b));
    };
    if same_body(a, b) {
        return Ok(HitData::miss());
    }

    let hit = match &a.shape {
        Shape::Sphere(other) => sphere_vs_sphere(other, sphere),
        Shape::Aabb(aabb) => aabb_vs_sphere(aabb, sphere).flipped(),
        Shape::Obb(obb) => obb_vs_sphere(obb, sphere).flipped(),
        Shape::Hull(hull) => hull_vs_sphere(hull, sphere).flipped(),
        Shape::None(_) => return Err(unsupported(a, b)),
    };
    Ok(hit.between(a.body, b.body))
}

/// Test any volume against an axis-aligned box.
///
/// # Errors
///
/// Returns [`PhysicsError::UnsupportedCollision`] when `b` is not an AABB,
/// or `a` is a hull or a `None` volume.
pub fn bounding_volume_vs_aabb(a: &BoundingVolume, b: &BoundingVolume) -> PhysicsResult<HitData> {
    let Shape::Aabb(aabb) = &b.shape else {
        return Err(unsupported(a, b));
    };
    if same_body(a, b) {
        return Ok(HitData::miss());
    }

    let hit = match &a.shape {
        Shape::Sphere(sphere) => aabb_vs_sphere(aabb, sphere),
        Shape::Aabb(other) => aabb_vs_aabb(other, aabb),
        Shape::Obb(obb) => obb_vs_aabb(obb, aabb),
        Shape::Hull(_) | Shape::None(_) => return Err(unsupported(a, b)),
    };
    Ok(hit.between(a.body, b.body))
}

/// Test any volume against an oriented box.
///
/// # Errors
///
/// Returns [`PhysicsError::UnsupportedCollision`] when `b` is not an OBB or
/// `a` is a `None` volume.
pub fn bounding_volume_vs_obb(a: &BoundingVolume, b: &BoundingVolume) -> PhysicsResult<HitData> {
    let Shape::Obb(obb) = &b.shape else {
        return Err(unsupported(a, b));
    };
    if same_body(a, b) {
        return Ok(HitData::miss());
    }

    let hit = match &a.shape {
        Shape::Sphere(sphere) => obb_vs_sphere(obb, sphere),
        Shape::Aabb(aabb) => obb_vs_aabb(obb, aabb).flipped(),
        Shape::Obb(other) => obb_vs_obb(other, obb),
        Shape::Hull(hull) => obb_vs_hull(obb, hull).flipped(),
        Shape::None(_) => return Err(unsupported(a, b)),
    };
    Ok(hit.between(a.body, b.body))
}

/// Test any volume against a triangle hull.
///
/// # Errors
///
/// Returns [`PhysicsError::UnsupportedCollision`] when `b` is not a hull,
/// or `a` is an AABB, another hull or a `None` volume.
pub fn bounding_volume_vs_hull(a: &BoundingVolume, b: &BoundingVolume) -> PhysicsResult<HitData> {
    let Shape::Hull(hull) = &b.shape else {
        return Err(unsupported(a, b));
    };
    if same_body(a, b) {
        return Ok(HitData::miss());
    }

    let hit = match &a.shape {
        Shape::Sphere(sphere) => hull_vs_sphere(hull, sphere),
        Shape::Obb(obb) => obb_vs_hull(obb, hull),
        Shape::Aabb(_) | Shape::Hull(_) | Shape::None(_) => return Err(unsupported(a, b)),
    };
    Ok(hit.between(a.body, b.body))
}
