use serde::{Deserialize, Serialize};

/// A surface-relative coordinate in CSS pixels.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rejects non-finite coordinates at the input boundary. Out-of-range
    /// values pass through; the drawing surface clips them implicitly.
    pub fn normalized(self) -> Option<Self> {
        if self.x.is_finite() && self.y.is_finite() {
            Some(self)
        } else {
            None
        }
    }
}
