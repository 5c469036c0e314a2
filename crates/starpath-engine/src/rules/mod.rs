pub mod matcher;
pub mod stars;

pub use matcher::{attempt_match, MatchOutcome};
pub use stars::{MistakeCounter, StarPolicy};
