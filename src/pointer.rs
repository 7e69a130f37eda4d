//! Pointer input port.
//!
//! The host writes pointer positions whenever its input layer reports them;
//! the simulation reads the latest one exactly once per frame. Writes are
//! last-writer-wins with no interpolation.
//!
//! Coordinates are normalized: `-1..1` on both axes, origin at the center of
//! the viewport, y pointing up.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::Vec2;

/// Read-only accessor for the current pointer position.
pub trait PointerSource {
    fn current_pointer(&self) -> Vec2;
}

/// A pointer that never moves.
impl PointerSource for Vec2 {
    fn current_pointer(&self) -> Vec2 {
        *self
    }
}

impl<T: PointerSource + ?Sized> PointerSource for &T {
    fn current_pointer(&self) -> Vec2 {
        (**self).current_pointer()
    }
}

/// Shared slot holding the most recent pointer position.
///
/// Cloning gives another handle to the same slot. Both coordinates are packed
/// into one atomic word so a reader never sees x from one write and y from
/// another.
#[derive(Debug, Clone, Default)]
pub struct PointerSlot {
    packed: Arc<AtomicU64>,
}

impl PointerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pointer: Vec2) {
        let packed = (u64::from(pointer.x.to_bits()) << 32) | u64::from(pointer.y.to_bits());
        self.packed.store(packed, Ordering::Relaxed);
    }

    pub fn get(&self) -> Vec2 {
        let packed = self.packed.load(Ordering::Relaxed);
        Vec2::new(
            f32::from_bits((packed >> 32) as u32),
            f32::from_bits(packed as u32),
        )
    }
}

impl PointerSource for PointerSlot {
    fn current_pointer(&self) -> Vec2 {
        self.get()
    }
}

/// Map a pixel position inside a `width` x `height` viewport to normalized
/// pointer coordinates. Returns `None` for an empty viewport.
pub fn normalize_pointer(x: f32, y: f32, width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(Vec2::new(
        (x / width as f32) * 2.0 - 1.0,
        -(y / height as f32) * 2.0 + 1.0,
    ))
}
