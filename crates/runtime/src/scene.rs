//! JSON scene descriptions.
//!
//! A scene is a [`PhysicsConfig`] plus a list of bodies, each tagged by its
//! `shape`. Lengths are centimeters, like the [`PhysicsSim`] API.

use anyhow::Result;
use glam::Vec3;
use serde::Deserialize;
use trackphys::transform::rotation_from_degrees;
use trackphys::{BodyHandle, PhysicsConfig, PhysicsSim, Triangle};

#[derive(Debug, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub config: PhysicsConfig,
    pub bodies: Vec<BodyDef>,
}

#[derive(Debug, Deserialize)]
pub struct BodyDef {
    pub name: String,
    #[serde(default)]
    pub mass: f32,
    #[serde(default)]
    pub immovable: bool,
    pub pos: [f32; 3],
    #[serde(default)]
    pub vel: [f32; 3],
    /// Overrides the world default.
    pub gravity: Option<f32>,
    #[serde(flatten)]
    pub shape: ShapeDef,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeDef {
    Sphere {
        radius: f32,
    },
    Aabb {
        half_extents: [f32; 3],
        #[serde(default)]
        is_edge: bool,
    },
    Obb {
        half_extents: [f32; 3],
        /// Yaw, pitch and roll in degrees.
        #[serde(default)]
        rotation: [f32; 3],
        #[serde(default)]
        is_edge: bool,
    },
    Hull {
        triangles: Vec<[[f32; 3]; 3]>,
    },
}

impl Scene {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a world from the scene. Returns the body handles by name, in
    /// scene order.
    pub fn into_sim(self) -> Result<(PhysicsSim, Vec<(String, BodyHandle)>)> {
        let mut sim = PhysicsSim::new(self.config);
        let mut names = Vec::with_capacity(self.bodies.len());

        for body in self.bodies {
            let pos = Vec3::from_array(body.pos);
            let handle = match body.shape {
                ShapeDef::Sphere { radius } => sim.create_sphere(body.mass, body.immovable, pos, radius),
                ShapeDef::Aabb { half_extents, is_edge } => {
                    sim.create_aabb(body.mass, body.immovable, pos, Vec3::from_array(half_extents), is_edge)
                }
                ShapeDef::Obb {
                    half_extents,
                    rotation: [yaw, pitch, roll],
                    is_edge,
                } => sim.create_obb(
                    body.mass,
                    body.immovable,
                    pos,
                    Vec3::from_array(half_extents),
                    rotation_from_degrees(yaw, pitch, roll),
                    is_edge,
                ),
                ShapeDef::Hull { triangles } => {
                    let triangles: Vec<Triangle> = triangles
                        .iter()
                        .map(|[a, b, c]| Triangle::new(Vec3::from_array(*a), Vec3::from_array(*b), Vec3::from_array(*c)))
                        .collect();
                    sim.create_hull(body.mass, body.immovable, pos, &triangles)
                }
            };

            sim.set_body_velocity(handle, Vec3::from_array(body.vel))?;
            if let Some(gravity) = body.gravity {
                sim.set_body_gravity(handle, gravity)?;
            }
            names.push((body.name, handle));
        }

        Ok((sim, names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "config": { "gravity": 9.82, "max_sub_steps": 4 },
        "bodies": [
            { "name": "floor", "shape": "aabb", "immovable": true,
              "pos": [0, -50, 0], "half_extents": [1000, 50, 1000] },
            { "name": "ball", "shape": "sphere", "mass": 1.0,
              "pos": [0, 200, 0], "radius": 25, "vel": [10, 0, 0] },
            { "name": "crate", "shape": "obb", "mass": 5.0,
              "pos": [300, 100, 0], "half_extents": [40, 40, 40], "rotation": [30, 0, 0] },
            { "name": "ramp", "shape": "hull", "immovable": true, "pos": [-300, 0, 0],
              "triangles": [[[0, 0, 0], [100, 50, 0], [0, 0, 100]]] },
            { "name": "camera", "shape": "sphere", "mass": 1.0, "gravity": 0.0,
              "pos": [0, 500, 0], "radius": 10 }
        ]
    }"#;

    #[test]
    fn parses_every_shape() {
        let scene = Scene::parse(SCENE).unwrap();
        assert_eq!(scene.config.max_sub_steps, 4);
        assert_eq!(scene.bodies.len(), 5);
        assert!(matches!(scene.bodies[2].shape, ShapeDef::Obb { rotation, .. } if rotation[0] == 30.0));
        assert!(matches!(&scene.bodies[3].shape, ShapeDef::Hull { triangles } if triangles.len() == 1));
        assert_eq!(scene.bodies[4].gravity, Some(0.0));
    }

    #[test]
    fn builds_a_world_with_named_handles() {
        let (sim, names) = Scene::parse(SCENE).unwrap().into_sim().unwrap();
        assert_eq!(sim.body_count(), 5);
        assert_eq!(names[1].0, "ball");

        let ball = names[1].1;
        assert!((sim.body_velocity(ball).unwrap() - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-3);
        let camera = names[4].1;
        assert_eq!(sim.body(camera).unwrap().gravity(), 0.0);
        assert_eq!(sim.nr_of_triangles_from_body(names[3].1, 0).unwrap(), 1);
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let json = r#"{ "bodies": [ { "name": "x", "shape": "cone", "pos": [0, 0, 0] } ] }"#;
        assert!(Scene::parse(json).is_err());
    }
}
