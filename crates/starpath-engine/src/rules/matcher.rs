//! Decides whether a dropped item belongs on the target it landed on.

use crate::api::types::{ItemId, TargetId};
use crate::components::item::{DraggableItem, Kind};
use crate::components::target::DropTarget;

/// Result of one drop attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Item placed: it is now matched and occupies the target.
    Accepted,
    /// Wrong target. Nothing mutated; the caller counts a mistake.
    Rejected,
    /// Not a real attempt (unknown ids, item already placed, target full).
    /// Nothing mutated and no mistake.
    Ignored,
}

/// Resolve `item_id` dropped on `target_id`.
///
/// The predicate is kind equality with the target's expectation; ordinal slots
/// store the value that belongs at their position, so the same check covers them.
pub fn attempt_match<K: Kind>(
    items: &mut [DraggableItem<K>],
    targets: &mut [DropTarget<K>],
    item_id: ItemId,
    target_id: TargetId,
) -> MatchOutcome {
    let Some(item) = items.iter_mut().find(|i| i.id == item_id) else {
        return MatchOutcome::Ignored;
    };
    let Some(target) = targets.iter_mut().find(|t| t.id == target_id) else {
        return MatchOutcome::Ignored;
    };
    if item.is_matched() || target.is_full() {
        return MatchOutcome::Ignored;
    }
    if item.kind != target.expected {
        return MatchOutcome::Rejected;
    }

    item.mark_matched();
    target.fill(item.id);
    MatchOutcome::Accepted
}
