//! Rigid bodies: kinematic state plus the ordered list of volumes they own.

use glam::{Mat3, Vec3};

use crate::integrator::{acceleration, integrate_velocity, position_delta};
use crate::shapes::{BoundingVolume, Sphere};
use crate::types::BodyHandle;

/// A simulated body. All lengths are meters.
///
/// The first volume is the primary one and defines the body's position;
/// every volume moves with the body.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    handle: BodyHandle,
    volumes: Vec<BoundingVolume>,
    mass: f32,
    position: Vec3,
    velocity: Vec3,
    net_force: Vec3,
    last_acceleration: Vec3,
    avg_acceleration: Vec3,
    gravity: f32,
    is_immovable: bool,
    is_edge: bool,
    surrounding_sphere: Sphere,
    orientation: Mat3,
    scale: Vec3,
    pub in_air: bool,
    pub on_something: bool,
    pub landed: bool,
}

impl Body {
    /// Create a body around its primary volume. The volume is re-tagged with
    /// the body's handle.
    #[must_use]
    pub fn new(handle: BodyHandle, volume: BoundingVolume, mass: f32, is_immovable: bool, gravity: f32) -> Self {
        let position = volume.position();
        let mut body = Self {
            handle,
            volumes: Vec::new(),
            mass,
            position,
            velocity: Vec3::ZERO,
            net_force: Vec3::ZERO,
            last_acceleration: Vec3::ZERO,
            avg_acceleration: Vec3::ZERO,
            gravity,
            is_immovable,
            is_edge: false,
            surrounding_sphere: Sphere::new(0.0, position),
            orientation: Mat3::IDENTITY,
            scale: Vec3::ONE,
            in_air: false,
            on_something: false,
            landed: false,
        };
        body.add_volume(volume);
        body
    }

    #[must_use]
    pub fn with_edge(mut self, is_edge: bool) -> Self {
        self.is_edge = is_edge;
        self
    }

    /// Advance the body by `dt` seconds. Immovable bodies do not move.
    ///
    /// The net force is left as is; callers clear it with
    /// [`Body::reset_force`] when a force should only last one step.
    pub fn update(&mut self, dt: f32) {
        if self.is_immovable {
            return;
        }

        let delta = position_delta(self.velocity, self.last_acceleration, dt);
        self.position += delta;

        let new_acceleration = acceleration(self.net_force, self.mass, self.gravity);
        let (velocity, average) = integrate_velocity(self.velocity, self.last_acceleration, new_acceleration, dt);
        self.velocity = velocity;
        self.avg_acceleration = average;
        self.last_acceleration = new_acceleration;

        self.translate_volumes(delta);
    }

    pub fn add_force(&mut self, force: Vec3) {
        self.net_force += force;
    }

    pub fn reset_force(&mut self) {
        self.net_force = Vec3::ZERO;
    }

    /// Instant velocity change of `impulse / mass`. Massless bodies ignore it.
    pub fn add_impulse(&mut self, impulse: Vec3) {
        if self.mass != 0.0 {
            self.velocity += impulse / self.mass;
        }
    }

    /// Move the body and all its volumes so the body sits at `position`.
    pub fn set_position(&mut self, position: Vec3) {
        let delta = position - self.position;
        self.position = position;
        self.translate_volumes(delta);
    }

    /// Shift the body and its volumes by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.translate_volumes(delta);
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn set_rotation(&mut self, rotation: Mat3) {
        self.orientation = rotation;
        for volume in &mut self.volumes {
            volume.set_rotation(rotation);
        }
        // Rotated AABBs re-derive wider extents.
        self.enclose_volumes();
    }

    pub fn scale(&mut self, scale: Vec3) {
        self.scale *= scale;
        for volume in &mut self.volumes {
            volume.scale(scale);
        }
        self.enclose_volumes();
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    /// Attach another volume. The body's surrounding sphere grows to cover it.
    pub fn add_volume(&mut self, mut volume: BoundingVolume) {
        volume.body = Some(self.handle);
        self.enclose(&volume.surrounding_sphere());
        self.volumes.push(volume);
    }

    pub fn set_collision_response(&mut self, enabled: bool) {
        for volume in &mut self.volumes {
            volume.collision_response = enabled;
        }
    }

    /// Grow the surrounding sphere over every volume's current reach.
    fn enclose_volumes(&mut self) {
        let spheres: Vec<Sphere> = self.volumes.iter().map(BoundingVolume::surrounding_sphere).collect();
        for sphere in &spheres {
            self.enclose(sphere);
        }
    }

    fn translate_volumes(&mut self, delta: Vec3) {
        for volume in &mut self.volumes {
            volume.update_position(delta);
        }
        self.surrounding_sphere.update_position(delta);
    }

    /// Grow the surrounding sphere radius to reach around `sphere`; never
    /// shrinks.
    fn enclose(&mut self, sphere: &Sphere) {
        self.surrounding_sphere.center = self.position;
        self.surrounding_sphere.enclose(sphere);
    }

    #[must_use]
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    #[must_use]
    pub fn volumes(&self) -> &[BoundingVolume] {
        &self.volumes
    }

    #[must_use]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[must_use]
    pub fn net_force(&self) -> Vec3 {
        self.net_force
    }

    #[must_use]
    pub fn last_acceleration(&self) -> Vec3 {
        self.last_acceleration
    }

    #[must_use]
    pub fn avg_acceleration(&self) -> Vec3 {
        self.avg_acceleration
    }

    #[must_use]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    #[must_use]
    pub fn is_immovable(&self) -> bool {
        self.is_immovable
    }

    #[must_use]
    pub fn is_edge(&self) -> bool {
        self.is_edge
    }

    #[must_use]
    pub fn orientation(&self) -> Mat3 {
        self.orientation
    }

    #[must_use]
    pub fn scale_factor(&self) -> Vec3 {
        self.scale
    }

    #[must_use]
    pub fn surrounding_sphere(&self) -> Sphere {
        self.surrounding_sphere
    }
}
