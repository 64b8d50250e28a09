use thiserror::Error;

use crate::shapes::VolumeKind;
use crate::types::BodyHandle;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    /// A mutator or query was given a handle with no live body behind it.
    #[error("body not found: {0}")]
    BodyNotFound(BodyHandle),
    /// No pairwise routine exists for this combination of volume kinds.
    #[error("unsupported collision type: {first:?} vs {second:?}")]
    UnsupportedCollision {
        first: VolumeKind,
        second: VolumeKind,
    },
    /// A hull instance was requested from a template that was never created.
    #[error("bounding volume template not found: {0}")]
    TemplateNotFound(usize),
    #[error("triangle data of {len} bytes is not a whole number of triangles")]
    MalformedTriangleData { len: usize },
}

impl PhysicsError {
    pub(crate) fn unsupported(first: VolumeKind, second: VolumeKind) -> Self {
        Self::UnsupportedCollision { first, second }
    }
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
