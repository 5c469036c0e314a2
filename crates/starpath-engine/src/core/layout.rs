use glam::Vec2;
use serde::Serialize;

use crate::api::types::{ItemId, TargetId};

/// Axis-aligned rectangle in host viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Build from a DOMRect-style origin + size.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    /// Inclusive containment: a pointer exactly on an edge counts as inside.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Capability used at release time to find what the pointer is over.
pub trait HitTester {
    /// Targets whose bounds contain `point`, topmost first.
    fn targets_under(&self, point: Vec2) -> Vec<TargetId>;
}

/// Rendered geometry registered by the host after each layout pass.
///
/// Flat Vec storage (a level has a handful of items, not thousands).
/// Later registrations are treated as drawn on top of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    items: Vec<(ItemId, Bounds)>,
    targets: Vec<(TargetId, Bounds)>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the bounds of an item's rendered element.
    pub fn set_item(&mut self, id: ItemId, bounds: Bounds) {
        match self.items.iter_mut().find(|(i, _)| *i == id) {
            Some(entry) => entry.1 = bounds,
            None => self.items.push((id, bounds)),
        }
    }

    /// Register or replace the bounds of a drop target's rendered element.
    pub fn set_target(&mut self, id: TargetId, bounds: Bounds) {
        match self.targets.iter_mut().find(|(t, _)| *t == id) {
            Some(entry) => entry.1 = bounds,
            None => self.targets.push((id, bounds)),
        }
    }

    pub fn item_bounds(&self, id: ItemId) -> Option<Bounds> {
        self.items.iter().find(|(i, _)| *i == id).map(|(_, b)| *b)
    }

    /// Items whose bounds contain `point`, topmost first.
    pub fn items_under(&self, point: Vec2) -> Vec<ItemId> {
        self.items
            .iter()
            .rev()
            .filter(|(_, b)| b.contains(point))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Forget all geometry (items/targets were regenerated).
    pub fn clear(&mut self) {
        self.items.clear();
        self.targets.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.targets.is_empty()
    }
}

impl HitTester for Layout {
    fn targets_under(&self, point: Vec2) -> Vec<TargetId> {
        self.targets
            .iter()
            .rev()
            .filter(|(_, b)| b.contains(point))
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_inclusive() {
        let b = Bounds::from_rect(10.0, 10.0, 20.0, 20.0);
        assert!(b.contains(Vec2::new(10.0, 10.0)));
        assert!(b.contains(Vec2::new(30.0, 30.0)));
        assert!(!b.contains(Vec2::new(30.1, 20.0)));
        assert_eq!(b.size(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn overlapping_targets_topmost_first() {
        let mut layout = Layout::new();
        layout.set_target(TargetId(1), Bounds::from_rect(0.0, 0.0, 100.0, 100.0));
        layout.set_target(TargetId(2), Bounds::from_rect(50.0, 50.0, 100.0, 100.0));
        assert_eq!(
            layout.targets_under(Vec2::new(75.0, 75.0)),
            vec![TargetId(2), TargetId(1)]
        );
        assert!(layout.targets_under(Vec2::new(500.0, 500.0)).is_empty());
    }

    #[test]
    fn re_registering_replaces_bounds() {
        let mut layout = Layout::new();
        layout.set_item(ItemId(3), Bounds::from_rect(0.0, 0.0, 10.0, 10.0));
        layout.set_item(ItemId(3), Bounds::from_rect(100.0, 0.0, 10.0, 10.0));
        assert!(layout.items_under(Vec2::new(5.0, 5.0)).is_empty());
        assert_eq!(layout.items_under(Vec2::new(105.0, 5.0)), vec![ItemId(3)]);
        layout.clear();
        assert!(layout.is_empty());
    }
}
