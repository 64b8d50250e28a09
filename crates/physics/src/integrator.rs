//! # Physics Integration
//!
//! Velocity-Verlet style integration. The position step uses the
//! acceleration from the previous step; the velocity step uses the average
//! of the previous and the freshly computed acceleration.

use glam::Vec3;

/// Position change over `dt` given the current velocity and the previous
/// step's acceleration.
#[must_use]
pub fn position_delta(velocity: Vec3, last_acceleration: Vec3, dt: f32) -> Vec3 {
    velocity * dt + 0.5 * last_acceleration * dt * dt
}

/// Acceleration from the net force and a gravity magnitude acting along -Y.
///
/// Massless bodies get no acceleration at all, gravity included.
#[must_use]
pub fn acceleration(net_force: Vec3, mass: f32, gravity: f32) -> Vec3 {
    if mass == 0.0 {
        return Vec3::ZERO;
    }
    net_force / mass - Vec3::new(0.0, gravity, 0.0)
}

/// Integrate velocity with the average of the previous and new acceleration.
/// Returns the new velocity and that average.
#[must_use]
pub fn integrate_velocity(velocity: Vec3, last_acceleration: Vec3, new_acceleration: Vec3, dt: f32) -> (Vec3, Vec3) {
    let average = (last_acceleration + new_acceleration) * 0.5;
    (velocity + average * dt, average)
}
