use glam::Vec2;
use serde::Serialize;

use crate::api::types::ItemId;
use crate::core::layout::Bounds;

/// Scale applied to the floating copy so the picked-up item reads as "lifted".
pub const PROXY_SCALE: f32 = 1.2;

/// Floating visual copy of the dragged item.
///
/// Center-anchored: the host renders it at `top_left()` with `size()`, which is
/// the pointer position offset by half the scaled source size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragProxy {
    pub item: ItemId,
    /// Snapshot of the source element's bounds at pick-up.
    pub source: Bounds,
    pub pointer: Vec2,
    pub scale: f32,
}

impl DragProxy {
    pub fn new(item: ItemId, source: Bounds, pointer: Vec2) -> Self {
        Self {
            item,
            source,
            pointer,
            scale: PROXY_SCALE,
        }
    }

    pub fn follow(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn size(&self) -> Vec2 {
        self.source.size() * self.scale
    }

    pub fn top_left(&self) -> Vec2 {
        self.pointer - self.size() * 0.5
    }
}
