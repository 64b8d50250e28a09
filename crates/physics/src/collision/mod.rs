//! # Collision Detection and Response
//!
//! Stateless pairwise tests between bounding volumes, selected by type tag in
//! [`dispatcher`], plus the response rules the world applies to a positive
//! hit.
//!
//! Normal convention: for a test of `a` against `b`, `col_norm` points from
//! `b` (the victim) toward `a` (the collider), so moving `a` along the normal
//! by `col_length` separates the pair.

mod box_box;
mod box_hull;
mod broad_phase;
mod dispatcher;
mod hull_sphere;
pub mod response;
mod sphere_box;
mod sphere_sphere;

pub use box_box::*;
pub use box_hull::*;
pub use broad_phase::*;
pub use dispatcher::*;
pub use hull_sphere::*;
pub use sphere_box::*;
pub use sphere_sphere::*;

use glam::Vec3;

use crate::types::{m_to_cm, BodyHandle};

/// Below this length a vector is treated as having no direction.
pub(crate) const DIRECTION_EPSILON: f32 = 1.0e-6;

/// Which pairwise routine produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionType {
    #[default]
    None,
    SphereVsSphere,
    AabbVsSphere,
    AabbVsAabb,
    ObbVsSphere,
    ObbVsAabb,
    ObbVsObb,
    ObbVsHull,
    HullVsSphere,
}

/// Result of one pairwise test.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitData {
    pub intersect: bool,
    /// Unit normal from victim toward collider.
    pub col_norm: Vec3,
    /// Contact point in centimeters.
    pub col_pos: Vec3,
    /// Penetration depth in meters, never negative on a hit.
    pub col_length: f32,
    pub col_type: CollisionType,
    pub collider: Option<BodyHandle>,
    pub collision_victim: Option<BodyHandle>,
    pub is_edge: bool,
}

impl HitData {
    #[must_use]
    pub fn miss() -> Self {
        Self::default()
    }

    /// A positive hit. `contact` is in meters and converted here.
    #[must_use]
    pub fn hit(col_type: CollisionType, normal: Vec3, contact: Vec3, depth: f32) -> Self {
        Self {
            intersect: true,
            col_norm: normal,
            col_pos: m_to_cm(contact),
            col_length: depth.max(0.0),
            col_type,
            ..Self::default()
        }
    }

    /// Same hit seen from the other side.
    #[must_use]
    pub fn flipped(mut self) -> Self {
        if self.intersect {
            self.col_norm = -self.col_norm;
        }
        self
    }

    #[must_use]
    pub fn between(mut self, collider: Option<BodyHandle>, victim: Option<BodyHandle>) -> Self {
        self.collider = collider;
        self.collision_victim = victim;
        self
    }
}
