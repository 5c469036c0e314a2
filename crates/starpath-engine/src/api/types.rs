use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Identifier of a draggable item, unique within one level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemId(pub u32);

/// Identifier of a drop target, unique within one level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetId(pub u32);

/// A sound cue emitted by level logic.
/// The numeric value maps to an effect in the host's audio layer (see `bridge::protocol::sound`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundCue(pub u32);

/// A level event communicated from Rust to the host.
/// Generic container: `kind` identifies the event (see `bridge::protocol::event`),
/// `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LevelEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl LevelEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32) -> Self {
        Self { kind: kind as f32, ..Self::default() }
    }

    pub fn with_a(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: f32) -> Self {
        self.b = b;
        self
    }

    /// The event kind as an integer.
    pub fn kind_id(&self) -> u32 {
        self.kind as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_is_four_floats() {
        assert_eq!(std::mem::size_of::<LevelEvent>(), LevelEvent::FLOATS * 4);
        let ev = LevelEvent::new(7).with_a(3.0).with_b(1.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&ev));
        assert_eq!(floats, &[7.0, 3.0, 1.0, 0.0]);
        assert_eq!(ev.kind_id(), 7);
    }
}
