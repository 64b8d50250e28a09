//! # Bounding Volumes
//!
//! Value types for the shapes a body can be made of. Each shape keeps its
//! world-space state and can produce a conservative bounding sphere used by
//! the broad phase. Pairwise tests between shapes live in
//! [`crate::collision`], not here.

mod aabb;
mod hull;
mod obb;
mod sphere;

pub use aabb::Aabb;
pub use hull::{Hull, Triangle};
pub use obb::Obb;
pub use sphere::Sphere;

use glam::{Mat3, Vec3};

use crate::types::BodyHandle;

/// Type tag used by the collision dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeKind {
    None,
    Sphere,
    Aabb,
    Obb,
    Hull,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Position-only placeholder. No collision routine accepts it.
    None(Vec3),
    Sphere(Sphere),
    Aabb(Aabb),
    Obb(Obb),
    Hull(Hull),
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> VolumeKind {
        match self {
            Shape::None(_) => VolumeKind::None,
            Shape::Sphere(_) => VolumeKind::Sphere,
            Shape::Aabb(_) => VolumeKind::Aabb,
            Shape::Obb(_) => VolumeKind::Obb,
            Shape::Hull(_) => VolumeKind::Hull,
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        match self {
            Shape::None(p) => *p,
            Shape::Sphere(s) => s.center,
            Shape::Aabb(b) => b.center(),
            Shape::Obb(b) => b.center(),
            Shape::Hull(h) => h.position(),
        }
    }

    #[must_use]
    pub fn surrounding_sphere(&self) -> Sphere {
        match self {
            Shape::None(p) => Sphere::new(0.0, *p),
            Shape::Sphere(s) => *s,
            Shape::Aabb(b) => b.surrounding_sphere(),
            Shape::Obb(b) => b.surrounding_sphere(),
            Shape::Hull(h) => h.surrounding_sphere(),
        }
    }

    pub fn update_position(&mut self, delta: Vec3) {
        match self {
            Shape::None(p) => *p += delta,
            Shape::Sphere(s) => s.update_position(delta),
            Shape::Aabb(b) => b.update_position(delta),
            Shape::Obb(b) => b.update_position(delta),
            Shape::Hull(h) => h.update_position(delta),
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        match self {
            Shape::None(p) => *p = position,
            Shape::Sphere(s) => s.set_position(position),
            Shape::Aabb(b) => b.set_position(position),
            Shape::Obb(b) => b.set_position(position),
            Shape::Hull(h) => h.set_position(position),
        }
    }

    pub fn set_rotation(&mut self, rotation: Mat3) {
        match self {
            Shape::None(_) | Shape::Sphere(_) => {}
            Shape::Aabb(b) => b.set_rotation(rotation),
            Shape::Obb(b) => b.set_rotation(rotation),
            Shape::Hull(h) => h.set_rotation(rotation),
        }
    }

    pub fn scale(&mut self, scale: Vec3) {
        match self {
            Shape::None(_) => {}
            Shape::Sphere(s) => s.scale(scale),
            Shape::Aabb(b) => b.scale(scale),
            Shape::Obb(b) => b.scale(scale),
            Shape::Hull(h) => h.scale(scale),
        }
    }
}

/// A shape plus the bookkeeping the world needs: which body owns it and
/// whether contacts on it push the owner around.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingVolume {
    pub body: Option<BodyHandle>,
    pub collision_response: bool,
    pub shape: Shape,
}

impl BoundingVolume {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            body: None,
            collision_response: true,
            shape,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: BodyHandle) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn sphere(radius: f32, center: Vec3) -> Self {
        Self::new(Shape::Sphere(Sphere::new(radius, center)))
    }

    #[must_use]
    pub fn aabb(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(Shape::Aabb(Aabb::new(center, half_extents)))
    }

    #[must_use]
    pub fn obb(center: Vec3, half_extents: Vec3, axes: Mat3) -> Self {
        Self::new(Shape::Obb(Obb::new(center, half_extents, axes)))
    }

    #[must_use]
    pub fn hull(triangles: Vec<Triangle>, position: Vec3) -> Self {
        Self::new(Shape::Hull(Hull::new(triangles, position)))
    }

    #[must_use]
    pub fn placeholder(position: Vec3) -> Self {
        Self::new(Shape::None(position))
    }

    #[must_use]
    pub fn kind(&self) -> VolumeKind {
        self.shape.kind()
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.shape.position()
    }

    #[must_use]
    pub fn surrounding_sphere(&self) -> Sphere {
        self.shape.surrounding_sphere()
    }

    pub fn update_position(&mut self, delta: Vec3) {
        self.shape.update_position(delta);
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.shape.set_position(position);
    }

    pub fn set_rotation(&mut self, rotation: Mat3) {
        self.shape.set_rotation(rotation);
    }

    pub fn scale(&mut self, scale: Vec3) {
        self.shape.scale(scale);
    }

    #[must_use]
    pub fn as_hull(&self) -> Option<&Hull> {
        match &self.shape {
            Shape::Hull(h) => Some(h),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_conservative_sphere() {
        let volumes = [
            BoundingVolume::sphere(1.0, Vec3::ZERO),
            BoundingVolume::aabb(Vec3::ZERO, Vec3::ONE),
            BoundingVolume::obb(Vec3::ZERO, Vec3::ONE, Mat3::from_rotation_x(0.3)),
            BoundingVolume::hull(
                vec![Triangle::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, -1.0), Vec3::new(1.0, -1.0, 1.0))],
                Vec3::ZERO,
            ),
        ];
        let corner = Vec3::ONE;
        for v in &volumes[1..] {
            let s = v.surrounding_sphere();
            assert!(s.radius + 1e-5 >= s.center.distance(corner), "{:?}", v.kind());
        }
        assert!(volumes[0].surrounding_sphere().radius >= 1.0);
    }

    #[test]
    fn translation_moves_every_kind() {
        let delta = Vec3::new(1.0, 2.0, 3.0);
        let mut volumes = [
            BoundingVolume::placeholder(Vec3::ZERO),
            BoundingVolume::sphere(1.0, Vec3::ZERO),
            BoundingVolume::aabb(Vec3::ZERO, Vec3::ONE),
            BoundingVolume::obb(Vec3::ZERO, Vec3::ONE, Mat3::IDENTITY),
            BoundingVolume::hull(Vec::new(), Vec3::ZERO),
        ];
        for v in &mut volumes {
            v.update_position(delta);
            assert_eq!(v.position(), delta);
        }
    }
}
