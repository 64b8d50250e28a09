//! World configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::PhysicsSim`]. Lengths are meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Default per-body gravity, applied along -Y.
    pub gravity: f32,
    /// Used by [`crate::PhysicsSim::update_default`].
    pub sub_step_fps_limit: f32,
    /// Hard cap on sub-steps per frame.
    pub max_sub_steps: u32,
    /// Contact normals with a larger Y component count as ground.
    pub floor_normal_threshold: f32,
    /// Server worlds do not track `in_air`/`on_something`.
    pub is_server: bool,
    pub step_up_max_radius: f32,
    /// Highest contact above a sphere's lowest point still treated as a step.
    pub step_up_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.82,
            sub_step_fps_limit: 60.0,
            max_sub_steps: 2,
            floor_normal_threshold: 0.7,
            is_server: false,
            step_up_max_radius: 0.5,
            step_up_height: 0.35,
        }
    }
}

impl PhysicsConfig {
    #[must_use]
    pub fn server() -> Self {
        Self {
            is_server: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: PhysicsConfig = serde_json::from_str(r#"{ "gravity": 0.0, "is_server": true }"#).unwrap();
        assert_eq!(cfg.gravity, 0.0);
        assert!(cfg.is_server);
        assert_eq!(cfg.max_sub_steps, 2);
        assert!((cfg.floor_normal_threshold - 0.7).abs() < f32::EPSILON);
    }
}
