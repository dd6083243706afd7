use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of an [`crate::InteractiveElement`] within its
/// state's screenshot, in non-negative integer device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge offset.
    pub x: u32,
    /// Top edge offset.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl BoundingBox {
    /// Construct a new bounding box.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Return `(x, y, width, height)`.
    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }
}
