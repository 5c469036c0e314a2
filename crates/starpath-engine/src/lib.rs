pub mod api;
pub mod assets;
pub mod boss;
pub mod bridge;
pub mod components;
pub mod core;
pub mod drag;
pub mod input;
pub mod level;
pub mod rules;

// Re-export key types at crate root for convenience
pub use api::level::{Level, LevelConfig, LevelContext};
pub use api::types::{ItemId, TargetId, SoundCue, LevelEvent};
pub use assets::catalog::{TextCatalog, FALLBACK_LANGUAGE};
pub use assets::session::{SessionConfig, TimingConfig};
pub use boss::{BossEncounter, BossLevel, BossStage};
pub use bridge::protocol::{ProtocolLayout, PROTOCOL_VERSION};
pub use components::item::{DraggableItem, Kind, Visual};
pub use components::target::DropTarget;
pub use core::layout::{Bounds, HitTester, Layout};
pub use core::rng::Rng;
pub use core::time::{FixedTimestep, Timers};
pub use drag::{DragProxy, DropAttempt, PointerDragController};
pub use input::queue::{InputEvent, InputQueue};
pub use level::{Archetype, DragLevel, LevelStateMachine, Phase};
pub use rules::{attempt_match, MatchOutcome, MistakeCounter, StarPolicy};
