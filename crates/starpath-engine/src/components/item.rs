use std::fmt::Debug;

use serde::Serialize;

use crate::api::types::ItemId;

/// Logical category used for matching (shape, color, value, letter, ...).
pub trait Kind: Clone + PartialEq + Debug + Serialize {}

impl<T: Clone + PartialEq + Debug + Serialize> Kind for T {}

/// Rendering hints. Opaque to every rule in the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visual {
    /// Emoji or glyph shown on the item.
    pub icon: String,
    /// CSS color.
    pub color: String,
    /// Relative rendered size.
    pub scale: f32,
    /// Text catalog key for a caption, if any.
    pub label_key: Option<String>,
}

impl Visual {
    pub fn new(icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            color: color.into(),
            scale: 1.0,
            label_key: None,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_label(mut self, key: impl Into<String>) -> Self {
        self.label_key = Some(key.into());
        self
    }
}

/// An item the player drags onto a target.
///
/// Matched items are hidden, never removed, so ids and presentation order stay
/// stable while the host animates.
#[derive(Debug, Clone, Serialize)]
pub struct DraggableItem<K> {
    pub id: ItemId,
    pub kind: K,
    pub visual: Visual,
    matched: bool,
}

impl<K: Kind> DraggableItem<K> {
    pub fn new(id: ItemId, kind: K, visual: Visual) -> Self {
        Self {
            id,
            kind,
            visual,
            matched: false,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// One-way transition; only the match resolver calls this.
    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }
}
