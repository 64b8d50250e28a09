use std::fmt;

use glam::Vec3;
use tracing::error;

/// Public API lengths are centimeters, the engine works in meters.
pub const CM_TO_M: f32 = 0.01;
pub const M_TO_CM: f32 = 100.0;

#[must_use]
pub fn cm_to_m(v: Vec3) -> Vec3 {
    v * CM_TO_M
}

#[must_use]
pub fn m_to_cm(v: Vec3) -> Vec3 {
    v * M_TO_CM
}

/// Identity of a body inside one [`crate::PhysicsSim`]. Never zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(u32);

impl BodyHandle {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyHandle({})", self.0)
    }
}

/// Monotonic handle source owned by a world, so independent worlds never
/// share a counter.
#[derive(Debug, Clone)]
pub struct HandleAllocator {
    next: u32,
}

impl HandleAllocator {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next handle.
    ///
    /// Handles are unique for `u32::MAX` allocations between resets. Past
    /// that the counter saturates and keeps returning `u32::MAX`.
    pub fn allocate(&mut self) -> BodyHandle {
        let handle = BodyHandle(self.next);
        match self.next.checked_add(1) {
            Some(next) => self.next = next,
            None => error!("body handle space exhausted, reset the world"),
        }
        handle
    }

    /// Restart numbering at 1. Only valid once every handle handed out so
    /// far is dead.
    pub fn reset(&mut self) {
        self.next = 1;
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_start_at_one_and_increase() {
        let mut alloc = HandleAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        alloc.reset();
        assert_eq!(alloc.allocate().get(), 1);
    }

    #[test]
    fn unit_conversion_round_trips() {
        let v = Vec3::new(150.0, -20.0, 3.0);
        let back = m_to_cm(cm_to_m(v));
        assert!((back - v).length() < 1e-4);
    }

    #[test]
    fn allocation_saturates_instead_of_overflowing() {
        let mut alloc = HandleAllocator { next: u32::MAX - 1 };
        assert_eq!(alloc.allocate().get(), u32::MAX - 1);
        assert_eq!(alloc.allocate().get(), u32::MAX);
        assert_eq!(alloc.allocate().get(), u32::MAX);
    }
}
