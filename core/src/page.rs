#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A freehand pen path, rasterized as connected round-capped segments.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
    pub points: Vec<Point>,
}

/// One undoable unit of page mutation.
///
/// A page's raster is reproduced by replaying its ops oldest-first, so undo
/// and redo are exact.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum PageOp {
    #[serde(rename = "stroke")]
    Stroke(Stroke),
    /// Eraser gesture: an axis-aligned square of side `size` is cleared at
    /// each sampled point.
    #[serde(rename = "erase")]
    Erase { size: f32, points: Vec<Point> },
    /// Text annotation rasterized at a fixed point in the pen color.
    #[serde(rename = "text")]
    Text {
        at: Point,
        content: String,
        color: String,
    },
    /// Imported image (data URL), drawn scaled to the full surface after
    /// clearing it.
    #[serde(rename = "image")]
    Image { source: String },
}

/// One page: its operation log plus its redo stack.
///
/// History is per page; switching pages never discards either stack.
#[derive(Clone, Debug, Default)]
pub struct Page {
    ops: Vec<PageOp>,
    redo: Vec<PageOp>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ops(ops: Vec<PageOp>) -> Self {
        Self {
            ops,
            redo: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[PageOp] {
        &self.ops
    }

    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.ops.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub(crate) fn push(&mut self, op: PageOp) {
        self.ops.push(op);
    }

    // Redo history is invalidated when a new gesture starts, not when it
    // commits.
    pub(crate) fn clear_redo(&mut self) {
        self.redo.clear();
    }

    pub fn undo(&mut self) -> bool {
        match self.ops.pop() {
            Some(op) => {
                self.redo.push(op);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(op) => {
                self.ops.push(op);
                true
            }
            None => false,
        }
    }
}
