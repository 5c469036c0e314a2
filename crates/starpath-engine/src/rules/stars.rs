//! Mistake counting and star scoring.

use serde::Serialize;

/// Monotonic count of wrong drops within one attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MistakeCounter(u32);

impl MistakeCounter {
    pub fn new() -> Self {
        Self(0)
    }

    /// Count one mistake. Returns the new total.
    pub fn record(&mut self) -> u32 {
        self.0 = self.0.saturating_add(1);
        self.0
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Only initialize and retry call this.
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// How a finished attempt is turned into 0..=3 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum StarPolicy {
    /// Percent thresholds on mistakes / total items, inclusive.
    /// Falling past `one` scores 0 stars, which is a failed attempt.
    ErrorRate { three: u32, two: u32, one: u32 },
    /// 0 mistakes: 3, up to 2: 2, more: 1. Never fails.
    MistakeCount,
    /// Always 3.
    Perfect,
}

impl StarPolicy {
    /// Thresholds used by the shape, color and size levels.
    pub const STANDARD: StarPolicy = StarPolicy::ErrorRate {
        three: 5,
        two: 20,
        one: 40,
    };

    /// Looser thresholds of the number ordering level.
    pub const NUMBER_ORDER: StarPolicy = StarPolicy::ErrorRate {
        three: 5,
        two: 25,
        one: 45,
    };

    pub fn compute_stars(&self, mistakes: u32, total_items: u32) -> u8 {
        match *self {
            StarPolicy::ErrorRate { three, two, one } => {
                // rate <= threshold, kept in integers: mistakes*100 <= threshold*total
                let scaled = u64::from(mistakes) * 100;
                let within = |pct: u32| scaled <= u64::from(pct) * u64::from(total_items);
                if within(three) {
                    3
                } else if within(two) {
                    2
                } else if within(one) {
                    1
                } else {
                    0
                }
            }
            StarPolicy::MistakeCount => match mistakes {
                0 => 3,
                1..=2 => 2,
                _ => 1,
            },
            StarPolicy::Perfect => 3,
        }
    }

    /// Whether `stars` under this policy means the failure overlay.
    pub fn is_failure(&self, stars: u8) -> bool {
        matches!(self, StarPolicy::ErrorRate { .. }) && stars == 0
    }
}
