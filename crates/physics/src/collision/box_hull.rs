//! Box-triangle-mesh collision detection
//!
//! Each hull triangle gets its own 13-axis separating axis test against the
//! box. A box resting across several triangles of a concave mesh collects one
//! MTV per penetrated triangle; those are merged by direction and summed.

use glam::Vec3;

use super::box_box::{AxisSearch, BoxFrame, Mtv};
use super::{surrounding_sphere_vs_sphere, CollisionType, HitData, DIRECTION_EPSILON};
use crate::shapes::{Hull, Obb, Triangle};

/// Two per-triangle MTVs whose directions have a dot product above
/// `1 - MTV_MERGE_EPSILON` push the same way and are merged, not summed.
pub const MTV_MERGE_EPSILON: f32 = 1.0e-3;

/// SAT test of one world-space triangle against a box.
///
/// The returned normal points from the triangle toward the box. Triangles
/// that only touch the box (zero overlap) return `None`.
#[must_use]
pub fn sat_box_vs_triangle(frame: &BoxFrame, triangle: &Triangle) -> Option<Mtv> {
    // Work in the box's local frame, where its axes are X/Y/Z.
    let local = triangle.corners.map(|p| {
        let d = p - frame.center;
        Vec3::new(d.dot(frame.axes[0]), d.dot(frame.axes[1]), d.dot(frame.axes[2]))
    });
    let half = Vec3::from_array(frame.half);
    let edges = [local[1] - local[0], local[2] - local[1], local[0] - local[2]];

    let mut axes = Vec::with_capacity(13);
    axes.push(edges[0].cross(edges[1]));
    axes.extend([Vec3::X, Vec3::Y, Vec3::Z]);
    for unit in [Vec3::X, Vec3::Y, Vec3::Z] {
        for edge in edges {
            axes.push(unit.cross(edge));
        }
    }

    let mut best = AxisSearch::new();
    for axis in axes {
        let len = axis.length();
        if len <= DIRECTION_EPSILON {
            continue;
        }
        let axis = axis / len;

        let r = half.dot(axis.abs());
        let p = local.map(|v| v.dot(axis));
        let p_min = p[0].min(p[1]).min(p[2]);
        let p_max = p[0].max(p[1]).max(p[2]);
        if p_min > r || p_max < -r {
            return None;
        }

        // Push the box down the axis past p_min, or up it past p_max.
        let down = r - p_min;
        let up = p_max + r;
        if down < up {
            best.consider(-axis, down);
        } else {
            best.consider(axis, up);
        }
    }

    if best.overlap <= 0.0 || best.overlap >= f32::MAX {
        return None;
    }

    let [ax, ay, az] = frame.axes;
    let normal = (ax * best.axis.x + ay * best.axis.y + az * best.axis.z).normalize_or_zero();
    Some(Mtv {
        normal,
        depth: best.overlap,
    })
}

/// Merge per-triangle MTVs that share a direction, keeping the deeper one.
fn merge_by_direction(contributions: &mut Vec<Mtv>, mtv: Mtv) {
    let duplicate = contributions
        .iter_mut()
        .find(|c| c.normal.dot(mtv.normal) > 1.0 - MTV_MERGE_EPSILON);
    match duplicate {
        Some(existing) => existing.depth = existing.depth.max(mtv.depth),
        None => contributions.push(mtv),
    }
}

/// Box against every triangle of a hull.
///
/// The combined MTV is the sum of the direction-deduplicated per-triangle
/// MTVs; its direction is the hit normal (hull toward box) and its length
/// the penetration.
#[must_use]
pub fn sat_box_vs_hull(frame: &BoxFrame, hull: &Hull, box_radius: f32) -> HitData {
    let box_sphere = crate::shapes::Sphere::new(box_radius, frame.center);
    if !surrounding_sphere_vs_sphere(&box_sphere, &hull.surrounding_sphere()) {
        return HitData::miss();
    }

    let mut contributions: Vec<Mtv> = Vec::new();
    for triangle in hull.world_triangles() {
        if let Some(mtv) = sat_box_vs_triangle(frame, &triangle) {
            merge_by_direction(&mut contributions, mtv);
        }
    }

    if contributions.is_empty() {
        return HitData::miss();
    }

    let combined: Vec3 = contributions.iter().map(|c| c.normal * c.depth).sum();
    let (normal, depth) = if combined.length() > DIRECTION_EPSILON {
        (combined.normalize(), combined.length())
    } else {
        // Opposing contributions cancelled out; fall back to the deepest.
        let deepest = contributions
            .iter()
            .copied()
            .fold(contributions[0], |a, b| if b.depth > a.depth { b } else { a });
        (deepest.normal, deepest.depth)
    };

    HitData::hit(CollisionType::ObbVsHull, normal, frame.support_against(normal), depth)
}

/// Oriented box against a hull. Normal points from the hull toward the box.
#[must_use]
pub fn obb_vs_hull(obb: &Obb, hull: &Hull) -> HitData {
    sat_box_vs_hull(&BoxFrame::from_obb(obb), hull, obb.surrounding_sphere().radius)
}
