use glam::{Mat3, Vec3};

use super::Sphere;

/// Axis-aligned box. Corners and the bounding sphere are cached and must be
/// refreshed on every size or position change; every AABB routine in
/// `collision` reads the cache.
#[derive(Clone, Debug, PartialEq)]
pub struct Aabb {
    center: Vec3,
    model_half_extents: Vec3,
    rotation: Mat3,
    half_extents: Vec3,
    corners: [Vec3; 8],
    sphere: Sphere,
}

impl Aabb {
    #[must_use]
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        let mut aabb = Self {
            center,
            model_half_extents: half_extents.abs(),
            rotation: Mat3::IDENTITY,
            half_extents: half_extents.abs(),
            corners: [Vec3::ZERO; 8],
            sphere: Sphere::new(0.0, center),
        };
        aabb.refresh();
        aabb
    }

    #[must_use]
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    fn refresh(&mut self) {
        let c = self.center;
        let h = self.half_extents;
        for (i, corner) in self.corners.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
            *corner = c + Vec3::new(sx * h.x, sy * h.y, sz * h.z);
        }
        self.sphere = Sphere::new(h.length(), c);
    }

    fn rederive_extents(&mut self) {
        let r = self.rotation;
        let abs = Mat3::from_cols(r.x_axis.abs(), r.y_axis.abs(), r.z_axis.abs());
        self.half_extents = abs * self.model_half_extents;
        self.refresh();
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
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    #[must_use]
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    #[must_use]
    pub fn surrounding_sphere(&self) -> Sphere {
        self.sphere
    }

    pub fn update_position(&mut self, delta: Vec3) {
        self.center += delta;
        self.refresh();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.center = position;
        self.refresh();
    }

    /// The box stays axis aligned: the new extents are those of the
    /// smallest AABB around the rotated model box.
    pub fn set_rotation(&mut self, rotation: Mat3) {
        self.rotation = rotation;
        self.rederive_extents();
    }

    pub fn set_half_extents(&mut self, half_extents: Vec3) {
        self.model_half_extents = half_extents.abs();
        self.rederive_extents();
    }

    pub fn scale(&mut self, scale: Vec3) {
        self.model_half_extents *= scale.abs();
        self.rederive_extents();
    }

    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        point.cmpge(min).all() && point.cmple(max).all()
    }
}
