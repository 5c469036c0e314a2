pub mod archetype;
pub mod content;
pub mod drag_level;
pub mod machine;

pub use archetype::{build, Archetype};
pub use drag_level::DragLevel;
pub use machine::{LevelContent, LevelStateMachine, MachineSignal, Phase, RoundContent, TargetSpec};
