//! Box-box collision detection
//!
//! AABB pairs get a plain per-axis interval test. Any pair involving an OBB
//! goes through the 15-axis separating axis test in [`sat_box_vs_box`]; an
//! AABB joins that test as a box with identity axes.

use glam::Vec3;

use super::{surrounding_sphere_vs_sphere, CollisionType, HitData, DIRECTION_EPSILON};
use crate::shapes::{Aabb, Obb};

/// Added to every |R| entry so that near-parallel edge pairs, whose cross
/// product degenerates to zero, cannot produce a false separating axis.
pub const SAT_EPSILON: f32 = 1.0e-6;

/// A box as the SAT routines see it: center, unit axes and half-extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxFrame {
    pub center: Vec3,
    pub axes: [Vec3; 3],
    pub half: [f32; 3],
}

impl BoxFrame {
    #[must_use]
    pub fn from_obb(obb: &Obb) -> Self {
        Self {
            center: obb.center(),
            axes: obb.axes(),
            half: obb.half_extents().to_array(),
        }
    }

    #[must_use]
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            center: aabb.center(),
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
            half: aabb.half_extents().to_array(),
        }
    }

    /// Half-length of the box's shadow on a unit `axis`.
    #[must_use]
    pub fn projected_radius(&self, axis: Vec3) -> f32 {
        self.axes
            .iter()
            .zip(self.half)
            .map(|(a, h)| h * a.dot(axis).abs())
            .sum()
    }

    /// Point on the box surface facing away from `normal`.
    #[must_use]
    pub fn support_against(&self, normal: Vec3) -> Vec3 {
        self.center - normal * self.projected_radius(normal)
    }
}

/// Minimum translation vector: unit direction and overlap length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mtv {
    pub normal: Vec3,
    pub depth: f32,
}

/// Running minimum over candidate axes. Ties keep the first axis seen.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AxisSearch {
    pub axis: Vec3,
    pub overlap: f32,
}

impl AxisSearch {
    pub fn new() -> Self {
        Self {
            axis: Vec3::ZERO,
            overlap: f32::MAX,
        }
    }

    pub fn consider(&mut self, axis: Vec3, overlap: f32) {
        if overlap < self.overlap {
            self.axis = axis;
            self.overlap = overlap;
        }
    }
}

/// Plain interval test per world axis.
///
/// A hit carries only its type: this routine does not compute a normal, a
/// contact point or a depth, and those fields stay zero.
#[must_use]
pub fn aabb_vs_aabb(a: &Aabb, b: &Aabb) -> HitData {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());

    let separated = a_max.cmplt(b_min).any() || a_min.cmpgt(b_max).any();
    if separated {
        return HitData::miss();
    }

    HitData {
        intersect: true,
        col_type: CollisionType::AabbVsAabb,
        ..HitData::default()
    }
}

/// Separating axis test between two boxes.
///
/// Returns `None` as soon as one of the 15 axes separates the boxes.
/// Otherwise returns the axis of least overlap, oriented to point from `b`
/// toward `a`.
#[must_use]
pub fn sat_box_vs_box(a: &BoxFrame, b: &BoxFrame) -> Option<Mtv> {
    let mut r = [[0.0_f32; 3]; 3];
    let mut abs_r = [[0.0_f32; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            r[i][j] = a.axes[i].dot(b.axes[j]);
            abs_r[i][j] = r[i][j].abs() + SAT_EPSILON;
        }
    }

    // Center offset expressed in a's frame
    let d = b.center - a.center;
    let t = [d.dot(a.axes[0]), d.dot(a.axes[1]), d.dot(a.axes[2])];

    let mut best = AxisSearch::new();

    // a's face normals
    for i in 0..3 {
        let ra = a.half[i];
        let rb = b.half[0] * abs_r[i][0] + b.half[1] * abs_r[i][1] + b.half[2] * abs_r[i][2];
        let dist = t[i].abs();
        if dist > ra + rb {
            return None;
        }
        best.consider(a.axes[i], ra + rb - dist);
    }

    // b's face normals
    for j in 0..3 {
        let ra = a.half[0] * abs_r[0][j] + a.half[1] * abs_r[1][j] + a.half[2] * abs_r[2][j];
        let rb = b.half[j];
        let dist = (t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j]).abs();
        if dist > ra + rb {
            return None;
        }
        best.consider(b.axes[j], ra + rb - dist);
    }

    // Edge-edge axes a[i] x b[j]
    for i in 0..3 {
        let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
        for j in 0..3 {
            let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
            let ra = a.half[i1] * abs_r[i2][j] + a.half[i2] * abs_r[i1][j];
            let rb = b.half[j1] * abs_r[i][j2] + b.half[j2] * abs_r[i][j1];
            let dist = (t[i2] * r[i1][j] - t[i1] * r[i2][j]).abs();
            if dist > ra + rb {
                return None;
            }

            // Parallel edges give no usable direction; they can still
            // separate above, but never define the MTV.
            let axis = a.axes[i].cross(b.axes[j]);
            let len = axis.length();
            if len > DIRECTION_EPSILON {
                best.consider(axis / len, (ra + rb - dist) / len);
            }
        }
    }

    // The winning axis may point either way; orient it from b toward a.
    let mut normal = best.axis;
    if normal.dot(a.center - b.center) < 0.0 {
        normal = -normal;
    }

    Some(Mtv {
        normal: normal.normalize_or_zero(),
        depth: best.overlap,
    })
}

fn box_hit(col_type: CollisionType, a: &BoxFrame, b: &BoxFrame) -> HitData {
    match sat_box_vs_box(a, b) {
        Some(mtv) => HitData::hit(col_type, mtv.normal, a.support_against(mtv.normal), mtv.depth),
        None => HitData::miss(),
    }
}

/// Oriented box against oriented box. Normal points from `b` toward `a`.
#[must_use]
pub fn obb_vs_obb(a: &Obb, b: &Obb) -> HitData {
    if !surrounding_sphere_vs_sphere(&a.surrounding_sphere(), &b.surrounding_sphere()) {
        return HitData::miss();
    }
    box_hit(CollisionType::ObbVsObb, &BoxFrame::from_obb(a), &BoxFrame::from_obb(b))
}

/// Oriented box against axis-aligned box. Normal points from the AABB
/// toward the OBB.
#[must_use]
pub fn obb_vs_aabb(obb: &Obb, aabb: &Aabb) -> HitData {
    if !surrounding_sphere_vs_sphere(&obb.surrounding_sphere(), &aabb.surrounding_sphere()) {
        return HitData::miss();
    }
    box_hit(CollisionType::ObbVsAabb, &BoxFrame::from_obb(obb), &BoxFrame::from_aabb(aabb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat3;

    #[test]
    fn overlapping_aabbs_hit_without_contact_geometry() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE);

        let hit = aabb_vs_aabb(&a, &b);

        assert!(hit.intersect);
        assert_eq!(hit.col_type, CollisionType::AabbVsAabb);
        assert_eq!(hit.col_norm, Vec3::ZERO);
        assert_eq!(hit.col_pos, Vec3::ZERO);
    }

    #[test]
    fn aabbs_separated_on_one_axis_miss() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(0.5, 0.5, 2.5), Vec3::ONE);
        assert!(!aabb_vs_aabb(&a, &b).intersect);
    }

    #[test]
    fn stacked_boxes_resolve_upward() {
        let top = Obb::axis_aligned(Vec3::new(0.2, 1.9, 0.0), Vec3::ONE);
        let bottom = Obb::axis_aligned(Vec3::ZERO, Vec3::ONE);

        let hit = obb_vs_obb(&top, &bottom);

        assert!(hit.intersect);
        assert!((hit.col_norm - Vec3::Y).length() < 1e-5);
        assert!((hit.col_length - 0.1).abs() < 1e-4);
    }

    #[test]
    fn mtv_points_from_b_to_a_regardless_of_axis_sign() {
        let a = Obb::axis_aligned(Vec3::new(-1.8, 0.0, 0.0), Vec3::ONE);
        let b = Obb::axis_aligned(Vec3::ZERO, Vec3::ONE);
        let hit = obb_vs_obb(&a, &b);
        assert!((hit.col_norm - Vec3::NEG_X).length() < 1e-5);

        let back = obb_vs_obb(&b, &a);
        assert!((back.col_norm - Vec3::X).length() < 1e-5);
        assert!((back.col_length - hit.col_length).abs() < 1e-5);
    }

    #[test]
    fn rotated_box_separated_by_its_own_face() {
        // A diamond-oriented box whose corner reach (sqrt 2) would overlap an
        // axis-aligned test but whose true faces do not.
        let rot = Mat3::from_rotation_z(std::f32::consts::FRAC_PI_4);
        let a = Obb::new(Vec3::new(2.5, 0.0, 0.0), Vec3::ONE, rot);
        let b = Obb::axis_aligned(Vec3::ZERO, Vec3::ONE);
        assert!(!obb_vs_obb(&a, &b).intersect);

        let closer = Obb::new(Vec3::new(2.3, 0.0, 0.0), Vec3::ONE, rot);
        let hit = obb_vs_obb(&closer, &b);
        assert!(hit.intersect);
        assert!(hit.col_norm.x > 0.0);
    }

    #[test]
    fn obb_against_aabb_uses_identity_axes() {
        let obb = Obb::new(Vec3::new(0.0, 1.5, 0.0), Vec3::ONE, Mat3::from_rotation_y(0.4));
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);

        let hit = obb_vs_aabb(&obb, &aabb);

        assert!(hit.intersect);
        assert_eq!(hit.col_type, CollisionType::ObbVsAabb);
        assert!((hit.col_norm - Vec3::Y).length() < 1e-4);
        assert!((hit.col_length - 0.5).abs() < 1e-4);
    }

    #[test]
    fn parallel_edges_do_not_poison_the_mtv() {
        let a = Obb::axis_aligned(Vec3::new(0.0, 0.0, 1.5), Vec3::ONE);
        let b = Obb::axis_aligned(Vec3::ZERO, Vec3::ONE);
        let hit = obb_vs_obb(&a, &b);
        assert!(hit.col_norm.is_finite());
        assert!((hit.col_norm - Vec3::Z).length() < 1e-5);
    }
}
