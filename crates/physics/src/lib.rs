#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::float_cmp, clippy::many_single_char_names)]
//! # Trackphys Physics Engine
//!
//! Narrow-phase collision detection and rigid-body integration for a game
//! world made of spheres, boxes and triangle meshes.
//!
//! ## Key Components
//!
//! -   **Bounding volumes:** [`Sphere`], [`Aabb`], [`Obb`] and [`Hull`],
//!     wrapped in a [`BoundingVolume`] that records its owning body. Defined
//!     in the [`shapes`] module.
//! -   **Collision:** stateless pairwise tests in [`collision`], chosen by
//!     type tag through [`bounding_volume_vs_bounding_volume`]. Box pairs use
//!     the separating axis test; sphere pairs are solved analytically.
//! -   **Bodies:** [`Body`] integrates velocity-Verlet style and carries its
//!     ordered list of volumes.
//! -   **Simulation:** [`PhysicsSim`] owns the bodies, steps them, records a
//!     [`HitData`] per contact and pushes bodies out of each other.
//!
//! ## Units
//!
//! The [`PhysicsSim`] API takes and returns centimeters. Everything below it
//! works in meters.
//!
//! ## Usage
//!
//! ```rust
//! use trackphys::{PhysicsConfig, PhysicsSim};
//! use glam::Vec3;
//!
//! let mut sim = PhysicsSim::new(PhysicsConfig::default());
//! let floor = sim.create_aabb(0.0, true, Vec3::ZERO, Vec3::new(500.0, 10.0, 500.0), false);
//! let ball = sim.create_sphere(1.0, false, Vec3::new(0.0, 200.0, 0.0), 25.0);
//!
//! for _ in 0..120 {
//!     sim.update_default(1.0 / 60.0)?;
//! }
//!
//! assert!(sim.body_landed(ball)?);
//! assert!(sim.contains_body(floor));
//! # Ok::<(), trackphys::PhysicsError>(())
//! ```

pub mod body;
pub mod collision;
pub mod config;
pub mod error;
pub mod integrator;
pub mod shapes;
pub mod simulation;
pub mod transform;
pub mod types;

pub use body::Body;
pub use collision::{
    bounding_volume_vs_aabb, bounding_volume_vs_bounding_volume, bounding_volume_vs_hull,
    bounding_volume_vs_obb, bounding_volume_vs_sphere, CollisionType, HitData,
};
pub use config::PhysicsConfig;
pub use error::{PhysicsError, PhysicsResult};
pub use shapes::{Aabb, BoundingVolume, Hull, Obb, Shape, Sphere, Triangle, VolumeKind};
pub use simulation::{PhysicsSim, TemplateId};
pub use types::{BodyHandle, CM_TO_M, M_TO_CM};
