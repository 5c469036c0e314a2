pub mod encounter;
pub mod level;
pub mod math;
pub mod memory;

pub use encounter::{BossEncounter, BossSignal, BossStage, Feedback, BOSS_MAX_HP};
pub use level::BossLevel;
