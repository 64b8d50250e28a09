use glam::Vec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    #[must_use]
    pub const fn new(radius: f32, center: Vec3) -> Self {
        Self { center, radius }
    }

    pub fn update_position(&mut self, delta: Vec3) {
        self.center += delta;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.center = position;
    }

    /// Non-uniform scales grow the radius by the largest component so the
    /// sphere still contains the scaled shape.
    pub fn scale(&mut self, scale: Vec3) {
        self.radius *= scale.abs().max_element();
    }

    /// Grow the radius so `other` is fully contained. Never shrinks.
    pub fn enclose(&mut self, other: &Sphere) {
        let reach = self.center.distance(other.center) + other.radius;
        self.radius = self.radius.max(reach);
    }

    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}
