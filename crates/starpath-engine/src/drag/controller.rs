//! Pointer-driven drag-and-drop for one level instance.
//!
//! Tracks the logical item being dragged (never a rendered element), keeps the
//! floating proxy under the pointer, and resolves the drop target by hit-testing
//! at release time.

use glam::Vec2;

use crate::api::types::{ItemId, TargetId};
use crate::core::layout::{Bounds, HitTester};
use crate::drag::proxy::DragProxy;

/// The one in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub item: ItemId,
    pub proxy: DragProxy,
}

/// A release that landed on a target. Handed to the match resolver exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropAttempt {
    pub item: ItemId,
    pub target: TargetId,
}

/// Owns the drag session. Only this type creates or clears it.
#[derive(Debug, Default)]
pub struct PointerDragController {
    session: Option<DragSession>,
}

impl PointerDragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `item`. Returns false (and changes nothing) if a drag is
    /// already in progress. Callers refuse matched items before getting here.
    pub fn begin_drag(&mut self, item: ItemId, source: Bounds, pointer: Vec2) -> bool {
        if self.session.is_some() {
            log::debug!("drag: ignoring pick-up of {:?}, {:?} already active", item, self.session.map(|s| s.item));
            return false;
        }
        self.session = Some(DragSession {
            item,
            proxy: DragProxy::new(item, source, pointer),
        });
        log::debug!("drag: picked up {:?}", item);
        true
    }

    /// Move the proxy. Returns true when the move belongs to a drag, i.e. the host
    /// must suppress native scrolling/selection for it.
    pub fn on_pointer_move(&mut self, pointer: Vec2) -> bool {
        match &mut self.session {
            Some(session) => {
                session.proxy.follow(pointer);
                true
            }
            None => false,
        }
    }

    /// Finish the drag. The session is cleared whether or not a target was hit;
    /// a miss is simply no match attempt.
    pub fn on_pointer_release(
        &mut self,
        pointer: Vec2,
        hit: &impl HitTester,
    ) -> Option<DropAttempt> {
        let session = self.session.take()?;
        let target = hit.targets_under(pointer).into_iter().next();
        match target {
            Some(target) => {
                log::debug!("drag: dropped {:?} on {:?}", session.item, target);
                Some(DropAttempt {
                    item: session.item,
                    target,
                })
            }
            None => {
                log::debug!("drag: dropped {:?} outside any target", session.item);
                None
            }
        }
    }

    /// Pointer cancelled: same as a release over nothing.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("drag: cancelled {:?}", session.item);
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Item whose source element is hidden while its proxy is in flight.
    pub fn hidden_source(&self) -> Option<ItemId> {
        self.session.map(|s| s.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Layout;

    /// Synthetic geometry: one fixed answer regardless of layout.
    struct Always(Vec<TargetId>);

    impl HitTester for Always {
        fn targets_under(&self, _point: Vec2) -> Vec<TargetId> {
            self.0.clone()
        }
    }

    fn src() -> Bounds {
        Bounds::from_rect(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn move_without_drag_is_noop() {
        let mut c = PointerDragController::new();
        assert!(!c.on_pointer_move(Vec2::new(5.0, 5.0)));
        assert!(c.session().is_none());
    }

    #[test]
    fn only_one_session_at_a_time() {
        let mut c = PointerDragController::new();
        assert!(c.begin_drag(ItemId(1), src(), Vec2::ZERO));
        assert!(!c.begin_drag(ItemId(2), src(), Vec2::ZERO));
        assert_eq!(c.hidden_source(), Some(ItemId(1)));
    }

    #[test]
    fn proxy_follows_pointer() {
        let mut c = PointerDragController::new();
        c.begin_drag(ItemId(1), src(), Vec2::ZERO);
        assert!(c.on_pointer_move(Vec2::new(40.0, 50.0)));
        assert_eq!(c.session().unwrap().proxy.pointer, Vec2::new(40.0, 50.0));
    }

    #[test]
    fn release_on_target_yields_one_attempt() {
        let mut c = PointerDragController::new();
        c.begin_drag(ItemId(4), src(), Vec2::ZERO);
        let attempt = c.on_pointer_release(Vec2::ZERO, &Always(vec![TargetId(9), TargetId(2)]));
        assert_eq!(attempt, Some(DropAttempt { item: ItemId(4), target: TargetId(9) }));
        assert!(!c.is_active());
        // Second release has no session left.
        assert_eq!(c.on_pointer_release(Vec2::ZERO, &Always(vec![TargetId(9)])), None);
    }

    #[test]
    fn release_outside_targets_clears_session() {
        let mut c = PointerDragController::new();
        c.begin_drag(ItemId(4), src(), Vec2::ZERO);
        assert_eq!(c.on_pointer_release(Vec2::new(999.0, 999.0), &Layout::new()), None);
        assert!(!c.is_active());
        assert_eq!(c.hidden_source(), None);
    }

    #[test]
    fn cancel_restores_without_attempt() {
        let mut c = PointerDragController::new();
        c.begin_drag(ItemId(4), src(), Vec2::ZERO);
        c.cancel();
        assert!(!c.is_active());
        assert!(c.begin_drag(ItemId(5), src(), Vec2::ZERO));
    }
}
