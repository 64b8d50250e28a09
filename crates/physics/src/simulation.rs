//! # Physics Simulation Core
//!
//! [`PhysicsSim`] owns every body, the per-frame hit list, the handle
//! allocator and the hull templates. The public API takes and returns
//! centimeters; everything stored inside is meters.
//!
//! A frame is driven by [`PhysicsSim::update`]: integrate each movable body,
//! test it against every other body, record hits and push the body out of
//! whatever it penetrates. Hits stay readable until the next `update`.

use glam::{Mat3, Vec3};
use tracing::{debug, trace, warn};

use crate::body::Body;
use crate::collision::response::{apply_collision_response, is_camera_player_collision, step_up_correction};
use crate::collision::{bounding_volume_vs_bounding_volume, surrounding_sphere_vs_sphere, HitData};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, PhysicsResult};
use crate::shapes::{BoundingVolume, Triangle};
use crate::types::{cm_to_m, m_to_cm, BodyHandle, HandleAllocator, CM_TO_M, M_TO_CM};

/// Index of a triangle template registered with [`PhysicsSim::create_bv`].
pub type TemplateId = usize;

/// The physics world.
#[derive(Debug, Clone, Default)]
pub struct PhysicsSim {
    config: PhysicsConfig,
    bodies: Vec<Body>,
    hit_data: Vec<HitData>,
    handles: HandleAllocator,
    templates: Vec<Vec<Triangle>>,
}

impl PhysicsSim {
    /// Create an empty world.
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    fn spawn(&mut self, volume: BoundingVolume, mass: f32, is_immovable: bool, is_edge: bool) -> BodyHandle {
        let handle = self.handles.allocate();
        let kind = volume.kind();
        let body = Body::new(handle, volume, mass, is_immovable, self.config.gravity).with_edge(is_edge);
        debug!(%handle, ?kind, mass, is_immovable, "created body");
        self.bodies.push(body);
        handle
    }

    /// Create a sphere body. Position and radius are centimeters.
    pub fn create_sphere(&mut self, mass: f32, is_immovable: bool, position: Vec3, radius: f32) -> BodyHandle {
        let volume = BoundingVolume::sphere(radius * CM_TO_M, cm_to_m(position));
        self.spawn(volume, mass, is_immovable, false)
    }

    /// Create an axis-aligned box body. Center and half-extents are
    /// centimeters.
    pub fn create_aabb(
        &mut self,
        mass: f32,
        is_immovable: bool,
        center: Vec3,
        half_extents: Vec3,
        is_edge: bool,
    ) -> BodyHandle {
        let volume = BoundingVolume::aabb(cm_to_m(center), cm_to_m(half_extents));
        self.spawn(volume, mass, is_immovable, is_edge)
    }

    /// Create an oriented box body. Center and half-extents are
    /// centimeters; `axes` holds the box's unit axes as columns.
    pub fn create_obb(
        &mut self,
        mass: f32,
        is_immovable: bool,
        center: Vec3,
        half_extents: Vec3,
        axes: Mat3,
        is_edge: bool,
    ) -> BodyHandle {
        let volume = BoundingVolume::obb(cm_to_m(center), cm_to_m(half_extents), axes);
        self.spawn(volume, mass, is_immovable, is_edge)
    }

    /// Create a hull body from model-space triangles in centimeters.
    pub fn create_hull(&mut self, mass: f32, is_immovable: bool, position: Vec3, triangles: &[Triangle]) -> BodyHandle {
        let triangles = triangles.iter().map(|t| t.scaled(CM_TO_M)).collect();
        let volume = BoundingVolume::hull(triangles, cm_to_m(position));
        self.spawn(volume, mass, is_immovable, false)
    }

    /// Register a triangle template (model space, centimeters) that hull
    /// bodies can later be instanced from.
    pub fn create_bv(&mut self, triangles: &[Triangle]) -> TemplateId {
        let id = self.templates.len();
        self.templates.push(triangles.iter().map(|t| t.scaled(CM_TO_M)).collect());
        debug!(id, triangles = triangles.len(), "registered hull template");
        id
    }

    /// Register a template from a raw little-endian `f32` triangle buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::MalformedTriangleData`] when the buffer does
    /// not hold a whole number of triangles.
    pub fn create_bv_from_bytes(&mut self, bytes: &[u8]) -> PhysicsResult<TemplateId> {
        let triangles = Triangle::from_bytes(bytes)?;
        Ok(self.create_bv(&triangles))
    }

    /// Create a hull body from a registered template.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::TemplateNotFound`] for an unknown template.
    pub fn create_bv_instance(
        &mut self,
        template: TemplateId,
        mass: f32,
        is_immovable: bool,
        position: Vec3,
    ) -> PhysicsResult<BodyHandle> {
        let triangles = self
            .templates
            .get(template)
            .cloned()
            .ok_or(PhysicsError::TemplateNotFound(template))?;
        let volume = BoundingVolume::hull(triangles, cm_to_m(position));
        Ok(self.spawn(volume, mass, is_immovable, false))
    }

    /// Attach an extra sphere to an existing body. Position and radius are
    /// centimeters.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn add_sphere_to_body(&mut self, handle: BodyHandle, position: Vec3, radius: f32) -> PhysicsResult<()> {
        let volume = BoundingVolume::sphere(radius * CM_TO_M, cm_to_m(position));
        self.body_mut(handle)?.add_volume(volume);
        Ok(())
    }

    /// Attach an extra oriented box to an existing body.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn add_obb_to_body(&mut self, handle: BodyHandle, center: Vec3, half_extents: Vec3, axes: Mat3) -> PhysicsResult<()> {
        let volume = BoundingVolume::obb(cm_to_m(center), cm_to_m(half_extents), axes);
        self.body_mut(handle)?.add_volume(volume);
        Ok(())
    }

    /// Remove a body. Its handle is never handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn release_body(&mut self, handle: BodyHandle) -> PhysicsResult<()> {
        let index = self.index_of(handle)?;
        self.bodies.swap_remove(index);
        debug!(%handle, "released body");
        Ok(())
    }

    /// Drop every body and hit and restart handle numbering. Templates are
    /// kept.
    pub fn reset_all(&mut self) {
        debug!(bodies = self.bodies.len(), "reset physics world");
        self.bodies.clear();
        self.hit_data.clear();
        self.handles.reset();
    }

    /// Advance the world by `dt` seconds.
    ///
    /// Frames longer than two sub-steps at `sub_step_fps_limit` are split
    /// into at most `max_sub_steps` equal steps. The previous frame's hits
    /// are cleared first.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnsupportedCollision`] when two bodies own a
    /// volume pair with no collision routine. The update stops at that pair:
    /// bodies earlier in the body list have finished the current sub-step,
    /// the failing body has been integrated but not resolved against the
    /// rest of the list, and later bodies have not moved. [`Self::hit_data`]
    /// holds every hit found before the failing pair.
    pub fn update(&mut self, dt: f32, sub_step_fps_limit: f32) -> PhysicsResult<()> {
        let (steps, step_dt) = self.sub_steps(dt, sub_step_fps_limit);
        self.hit_data.clear();
        for _ in 0..steps {
            self.step(step_dt)?;
        }
        Ok(())
    }

    /// [`PhysicsSim::update`] with the configured sub-step rate.
    ///
    /// # Errors
    ///
    /// See [`PhysicsSim::update`].
    pub fn update_default(&mut self, dt: f32) -> PhysicsResult<()> {
        self.update(dt, self.config.sub_step_fps_limit)
    }

    /// Number of sub-steps and their length for a frame of `dt` seconds.
    #[must_use]
    pub fn sub_steps(&self, dt: f32, sub_step_fps_limit: f32) -> (u32, f32) {
        if sub_step_fps_limit <= 0.0 {
            return (1, dt);
        }
        let fixed = 1.0 / sub_step_fps_limit;
        if dt <= 2.0 * fixed {
            return (1, dt);
        }

        let cap = self.config.max_sub_steps.max(1);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let wanted = (dt / fixed).ceil() as u32;
        if wanted > cap {
            warn!(dt, wanted, cap, "frame compressed into sub-step cap");
        }
        let steps = wanted.min(cap);
        #[allow(clippy::cast_precision_loss)]
        let step_dt = dt / steps as f32;
        (steps, step_dt)
    }

    fn step(&mut self, dt: f32) -> PhysicsResult<()> {
        for i in 0..self.bodies.len() {
            if self.bodies[i].is_immovable() {
                continue;
            }
            self.bodies[i].update(dt);
            self.bodies[i].landed = false;

            let mut on_ground = false;
            for j in 0..self.bodies.len() {
                if i == j {
                    continue;
                }
                let (body, other) = pair_mut(&mut self.bodies, i, j);
                on_ground |= collide_pair(body, other, &self.config, &mut self.hit_data)?;
            }

            if !self.config.is_server {
                let body = &mut self.bodies[i];
                body.on_something = on_ground;
                body.in_air = !on_ground;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn hit_data_size(&self) -> usize {
        self.hit_data.len()
    }

    #[must_use]
    pub fn hit_data_at(&self, index: usize) -> Option<&HitData> {
        self.hit_data.get(index)
    }

    #[must_use]
    pub fn hit_data(&self) -> &[HitData] {
        &self.hit_data
    }

    fn index_of(&self, handle: BodyHandle) -> PhysicsResult<usize> {
        self.bodies
            .iter()
            .position(|b| b.handle() == handle)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Read-only access to a body.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn body(&self, handle: BodyHandle) -> PhysicsResult<&Body> {
        let index = self.index_of(handle)?;
        Ok(&self.bodies[index])
    }

    fn body_mut(&mut self, handle: BodyHandle) -> PhysicsResult<&mut Body> {
        let index = self.index_of(handle)?;
        Ok(&mut self.bodies[index])
    }

    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn contains_body(&self, handle: BodyHandle) -> bool {
        self.index_of(handle).is_ok()
    }

    /// Add a force in newtons. It keeps acting until reset.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec3) -> PhysicsResult<()> {
        self.body_mut(handle)?.add_force(force);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> PhysicsResult<()> {
        self.body_mut(handle)?.add_impulse(impulse);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn reset_force_on_body(&mut self, handle: BodyHandle) -> PhysicsResult<()> {
        self.body_mut(handle)?.reset_force();
        Ok(())
    }

    /// Teleport a body, in centimeters.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn set_body_position(&mut self, handle: BodyHandle, position: Vec3) -> PhysicsResult<()> {
        self.body_mut(handle)?.set_position(cm_to_m(position));
        Ok(())
    }

    /// Velocity in centimeters per second.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn set_body_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> PhysicsResult<()> {
        self.body_mut(handle)?.set_velocity(cm_to_m(velocity));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn set_body_rotation(&mut self, handle: BodyHandle, rotation: Mat3) -> PhysicsResult<()> {
        self.body_mut(handle)?.set_rotation(rotation);
        Ok(())
    }

    /// Multiply the body's scale.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn set_body_scale(&mut self, handle: BodyHandle, scale: Vec3) -> PhysicsResult<()> {
        self.body_mut(handle)?.scale(scale);
        Ok(())
    }

    /// Gravity magnitude in m/s², acting along -Y. Zero gravity on a
    /// movable body makes it an observer that never gets pushed.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn set_body_gravity(&mut self, handle: BodyHandle, gravity: f32) -> PhysicsResult<()> {
        self.body_mut(handle)?.set_gravity(gravity);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn set_body_collision_response(&mut self, handle: BodyHandle, enabled: bool) -> PhysicsResult<()> {
        self.body_mut(handle)?.set_collision_response(enabled);
        Ok(())
    }

    /// Position in centimeters.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn body_position(&self, handle: BodyHandle) -> PhysicsResult<Vec3> {
        Ok(m_to_cm(self.body(handle)?.position()))
    }

    /// Velocity in centimeters per second.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn body_velocity(&self, handle: BodyHandle) -> PhysicsResult<Vec3> {
        Ok(m_to_cm(self.body(handle)?.velocity()))
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn body_orientation(&self, handle: BodyHandle) -> PhysicsResult<Mat3> {
        Ok(self.body(handle)?.orientation())
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn body_in_air(&self, handle: BodyHandle) -> PhysicsResult<bool> {
        Ok(self.body(handle)?.in_air)
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn body_on_something(&self, handle: BodyHandle) -> PhysicsResult<bool> {
        Ok(self.body(handle)?.on_something)
    }

    /// Whether the body touched ground during the last step.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn body_landed(&self, handle: BodyHandle) -> PhysicsResult<bool> {
        Ok(self.body(handle)?.landed)
    }

    /// World-space triangle of a hull volume, in centimeters. `None` when
    /// the volume is not a hull or either index is out of range.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn triangle_from_body(
        &self,
        handle: BodyHandle,
        triangle_index: usize,
        volume_index: usize,
    ) -> PhysicsResult<Option<Triangle>> {
        let body = self.body(handle)?;
        Ok(body
            .volumes()
            .get(volume_index)
            .and_then(BoundingVolume::as_hull)
            .and_then(|hull| hull.triangle_in_world_coord(triangle_index))
            .map(|t| t.scaled(M_TO_CM)))
    }

    /// Triangle count of a hull volume; zero for other kinds.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::BodyNotFound`] for an unknown handle.
    pub fn nr_of_triangles_from_body(&self, handle: BodyHandle, volume_index: usize) -> PhysicsResult<usize> {
        let body = self.body(handle)?;
        Ok(body
            .volumes()
            .get(volume_index)
            .and_then(BoundingVolume::as_hull)
            .map_or(0, |hull| hull.triangle_count()))
    }
}

/// Mutable access to `bodies[i]` alongside shared access to `bodies[j]`.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &Body) {
    if i < j {
        let (low, high) = bodies.split_at_mut(j);
        (&mut low[i], &high[0])
    } else {
        let (low, high) = bodies.split_at_mut(i);
        (&mut high[0], &low[j])
    }
}

/// Test every volume of `body` against every volume of `other`, record the
/// hits and push `body` out. Returns whether any contact was ground.
fn collide_pair(
    body: &mut Body,
    other: &Body,
    config: &PhysicsConfig,
    hits: &mut Vec<HitData>,
) -> PhysicsResult<bool> {
    if !surrounding_sphere_vs_sphere(&body.surrounding_sphere(), &other.surrounding_sphere()) {
        return Ok(false);
    }

    let exempt = is_camera_player_collision(body, other);
    let mut on_ground = false;

    for vi in 0..body.volumes().len() {
        for victim in other.volumes() {
            let collider = &body.volumes()[vi];
            let mut hit = bounding_volume_vs_bounding_volume(collider, victim)?;
            if !hit.intersect {
                continue;
            }
            hit.is_edge = other.is_edge();
            trace!(
                collider = %body.handle(),
                victim = %other.handle(),
                kind = ?hit.col_type,
                depth = hit.col_length,
                "hit"
            );
            hits.push(hit);

            if exempt || !collider.collision_response || !victim.collision_response {
                continue;
            }
            let (normal, depth) =
                step_up_correction(&hit, collider, config).unwrap_or((hit.col_norm, hit.col_length));
            on_ground |= apply_collision_response(body, normal, depth, config.floor_normal_threshold);
        }
    }
    Ok(on_ground)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_frames_are_a_single_step() {
        let sim = PhysicsSim::default();
        assert_eq!(sim.sub_steps(1.0 / 60.0, 60.0), (1, 1.0 / 60.0));
        assert_eq!(sim.sub_steps(2.0 / 60.0, 60.0).0, 1);
    }

    #[test]
    fn long_frames_are_capped_without_dropping_time() {
        let sim = PhysicsSim::default();
        let (steps, step_dt) = sim.sub_steps(0.5, 60.0);
        assert_eq!(steps, 2);
        assert!((step_dt * 2.0 - 0.5).abs() < 1e-6);
    }

    #[test]
    fn higher_cap_uses_fixed_rate() {
        let sim = PhysicsSim::new(PhysicsConfig {
            max_sub_steps: 8,
            ..PhysicsConfig::default()
        });
        let (steps, step_dt) = sim.sub_steps(0.045, 60.0);
        assert_eq!(steps, 3);
        assert!((step_dt - 0.015).abs() < 1e-6);
    }

    #[test]
    fn pair_mut_handles_both_orders() {
        let mut sim = PhysicsSim::default();
        let a = sim.create_sphere(1.0, false, Vec3::ZERO, 10.0);
        let b = sim.create_sphere(1.0, false, Vec3::X, 10.0);

        let (first, second) = pair_mut(&mut sim.bodies, 0, 1);
        assert_eq!((first.handle(), second.handle()), (a, b));
        let (first, second) = pair_mut(&mut sim.bodies, 1, 0);
        assert_eq!((first.handle(), second.handle()), (b, a));
    }
}
