//! Collision response rules applied by the world to a positive hit.
//!
//! Detection never depends on these: a hit is recorded for the caller even
//! when the response is skipped.

use glam::Vec3;

use super::{CollisionType, HitData};
use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::shapes::{BoundingVolume, Shape};
use crate::types::cm_to_m;

/// Zero-gravity movable bodies are observers (free cameras, spectators).
/// Contacts involving one are reported but never pushed apart.
#[must_use]
pub fn is_camera_player_collision(a: &Body, b: &Body) -> bool {
    let is_observer = |body: &Body| body.gravity() == 0.0 && !body.is_immovable();
    is_observer(a) || is_observer(b)
}

/// Turn a sphere-against-hull contact near the sphere's lowest point into a
/// vertical push, so small colliders walk up steps instead of stopping at
/// them.
///
/// `collider` is the sphere volume the hit was computed for. Returns the
/// replacement normal and depth, or `None` when the contact is not a step.
#[must_use]
pub fn step_up_correction(hit: &HitData, collider: &BoundingVolume, config: &PhysicsConfig) -> Option<(Vec3, f32)> {
    if hit.col_type != CollisionType::HullVsSphere {
        return None;
    }
    let Shape::Sphere(sphere) = &collider.shape else {
        return None;
    };
    if sphere.radius > config.step_up_max_radius || hit.col_norm.y > config.floor_normal_threshold {
        return None;
    }

    let contact = cm_to_m(hit.col_pos);
    let feet = sphere.center.y - sphere.radius;
    let rise = contact.y - feet;
    let is_step = rise > 0.0 && rise < sphere.radius && rise <= config.step_up_height;
    is_step.then_some((Vec3::Y, rise))
}

/// Push `body` out of a contact and adjust its velocity.
///
/// Normals steeper than `floor_threshold` are ground: vertical velocity is
/// removed and the body is marked as landed. Anything else is a wall and
/// only velocity into the wall is removed. Returns whether the contact was
/// ground.
pub fn apply_collision_response(body: &mut Body, normal: Vec3, depth: f32, floor_threshold: f32) -> bool {
    let velocity = body.velocity();
    let is_ground = normal.y > floor_threshold;

    if is_ground {
        body.set_velocity(Vec3::new(velocity.x, 0.0, velocity.z));
        body.landed = true;
    } else {
        let into = velocity.dot(normal);
        if into < 0.0 {
            body.set_velocity(velocity - normal * into);
        }
    }

    body.translate(normal * depth);
    is_ground
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HandleAllocator;

    fn body_at(position: Vec3, gravity: f32, immovable: bool) -> Body {
        let handle = HandleAllocator::new().allocate();
        Body::new(handle, BoundingVolume::sphere(0.3, position), 1.0, immovable, gravity)
    }

    fn hull_hit(normal: Vec3, contact: Vec3) -> HitData {
        HitData::hit(CollisionType::HullVsSphere, normal, contact, 0.05)
    }

    #[test]
    fn zero_gravity_movers_are_observers() {
        let player = body_at(Vec3::ZERO, 9.82, false);
        let camera = body_at(Vec3::ZERO, 0.0, false);
        let wall = body_at(Vec3::ZERO, 0.0, true);

        assert!(is_camera_player_collision(&player, &camera));
        assert!(is_camera_player_collision(&camera, &wall));
        assert!(!is_camera_player_collision(&player, &wall));
    }

    #[test]
    fn low_contact_becomes_a_step() {
        let config = PhysicsConfig::default();
        let sphere = BoundingVolume::sphere(0.3, Vec3::new(0.0, 0.3, 0.0));
        // Ledge edge 0.1 above the feet, hit from the side.
        let hit = hull_hit(Vec3::X, Vec3::new(-0.28, 0.1, 0.0));

        let (normal, depth) = step_up_correction(&hit, &sphere, &config).unwrap();
        assert_eq!(normal, Vec3::Y);
        assert!((depth - 0.1).abs() < 1e-5);
    }

    #[test]
    fn contact_above_step_height_stays_a_wall() {
        let config = PhysicsConfig::default();
        let sphere = BoundingVolume::sphere(0.5, Vec3::new(0.0, 0.5, 0.0));
        let hit = hull_hit(Vec3::X, Vec3::new(-0.49, 0.4, 0.0));
        assert!(step_up_correction(&hit, &sphere, &config).is_none());
    }

    #[test]
    fn large_spheres_do_not_step() {
        let config = PhysicsConfig::default();
        let sphere = BoundingVolume::sphere(2.0, Vec3::new(0.0, 2.0, 0.0));
        let hit = hull_hit(Vec3::X, Vec3::new(-1.9, 0.1, 0.0));
        assert!(step_up_correction(&hit, &sphere, &config).is_none());
    }

    #[test]
    fn ground_contact_stops_falling() {
        let mut body = body_at(Vec3::ZERO, 9.82, false);
        body.set_velocity(Vec3::new(1.0, -3.0, 0.5));

        assert!(apply_collision_response(&mut body, Vec3::Y, 0.2, 0.7));

        assert_eq!(body.velocity(), Vec3::new(1.0, 0.0, 0.5));
        assert!((body.position() - Vec3::new(0.0, 0.2, 0.0)).length() < 1e-6);
        assert!(body.landed);
    }

    #[test]
    fn wall_contact_slides() {
        let mut body = body_at(Vec3::ZERO, 9.82, false);
        body.set_velocity(Vec3::new(-2.0, -1.0, 0.0));

        assert!(!apply_collision_response(&mut body, Vec3::X, 0.1, 0.7));

        assert_eq!(body.velocity(), Vec3::new(0.0, -1.0, 0.0));
        assert!(!body.landed);
    }

    #[test]
    fn moving_away_from_wall_keeps_velocity() {
        let mut body = body_at(Vec3::ZERO, 9.82, false);
        body.set_velocity(Vec3::new(2.0, 0.0, 0.0));
        apply_collision_response(&mut body, Vec3::X, 0.1, 0.7);
        assert_eq!(body.velocity(), Vec3::new(2.0, 0.0, 0.0));
    }
}
