//! # Concrete payload channels.
//!
//! The channel protocol is payload-type-agnostic; the payload set an
//! application actually wires up is just a handful of instantiations.
//! These aliases cover the common ones: flags, scalars, 2D vectors and
//! opaque shared objects.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::channels::Channel;

/// Boolean-carrying channel (toggles, flags).
pub type BoolChannel = Channel<bool>;

/// `f32`-carrying channel (damage, volume, progress).
pub type FloatChannel = Channel<f32>;

/// `i64`-carrying channel (scores, counters).
pub type IntChannel = Channel<i64>;

/// [`Vec2`]-carrying channel (positions, directions).
pub type Vec2Channel = Channel<Vec2>;

/// [`ObjectRef`]-carrying channel (opaque shared objects).
pub type ObjectChannel = Channel<ObjectRef>;

/// Opaque reference payload: a shared object listeners downcast themselves.
pub type ObjectRef = Arc<dyn Any + Send + Sync>;

/// Minimal 2D vector payload.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
