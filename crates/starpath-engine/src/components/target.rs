use serde::Serialize;

use crate::api::types::{ItemId, TargetId};
use crate::components::item::{Kind, Visual};

/// A region that accepts items of one expected kind.
///
/// Slot targets (`capacity == 1`) accept exactly one item and reject further
/// drops once filled. Sorting bins carry a capacity equal to the number of items
/// of their kind, so they can never be over-filled either.
#[derive(Debug, Clone, Serialize)]
pub struct DropTarget<K> {
    pub id: TargetId,
    /// Kind an item must have to be accepted (for ordinal slots: the value that belongs here).
    pub expected: K,
    /// Position of an ordinal slot, counted from 0.
    pub slot: Option<usize>,
    pub visual: Visual,
    capacity: usize,
    occupants: Vec<ItemId>,
}

impl<K: Kind> DropTarget<K> {
    /// A single-occupancy target.
    pub fn new(id: TargetId, expected: K, visual: Visual) -> Self {
        Self {
            id,
            expected,
            slot: None,
            visual,
            capacity: 1,
            occupants: Vec::with_capacity(1),
        }
    }

    /// A single-occupancy target at a fixed sequence position.
    pub fn slot(id: TargetId, index: usize, expected: K, visual: Visual) -> Self {
        Self {
            slot: Some(index),
            ..Self::new(id, expected, visual)
        }
    }

    /// A bin accepting `capacity` items of the expected kind.
    pub fn bin(id: TargetId, expected: K, capacity: usize, visual: Visual) -> Self {
        Self {
            capacity: capacity.max(1),
            occupants: Vec::with_capacity(capacity),
            ..Self::new(id, expected, visual)
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn occupants(&self) -> &[ItemId] {
        &self.occupants
    }

    /// First occupant (the only one for slots).
    pub fn occupant(&self) -> Option<ItemId> {
        self.occupants.first().copied()
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() >= self.capacity
    }

    pub(crate) fn fill(&mut self, item: ItemId) {
        debug_assert!(!self.is_full());
        self.occupants.push(item);
    }
}
