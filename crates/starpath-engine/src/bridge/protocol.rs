/// Host wire protocol.
/// Must stay in sync with the TypeScript `protocol.ts`.
///
/// Per frame the host reads two flat buffers:
/// ```text
/// [Sounds: up to max_sounds × 1 byte]   (cue ids, see `sound`)
/// [Events: up to max_events × 4 floats] (kind, a, b, c, see `event`)
/// ```
/// Input travels the other way as pointer calls plus `Custom { kind, a, b, c }`
/// events whose kinds live in `custom`.

use crate::api::level::LevelConfig;

/// Protocol version reported to the host.
pub const PROTOCOL_VERSION: u32 = 1;

/// Floats per level event: kind, a, b, c. Fixed by the wire format.
pub const EVENT_FLOATS: usize = 4;

/// Sound cue ids. Opaque tokens; the host owns the mapping to audio files.
pub mod sound {
    /// An item was picked up.
    pub const DRAG: u32 = 1;
    /// Correct match, correct answer or a boss tap.
    pub const CLICK: u32 = 2;
    /// Wrong match or wrong answer.
    pub const ERROR: u32 = 3;
}

/// Level event kinds (`LevelEvent::kind`).
pub mod event {
    /// a = stars (1..=3). At most once per attempt.
    pub const LEVEL_COMPLETE: u32 = 1;
    /// a = mistakes. The host shows the failure overlay.
    pub const LEVEL_FAILED: u32 = 2;
    /// The player backed out.
    pub const NAVIGATE_BACK: u32 = 3;
    /// Items/targets were (re)generated; the host must re-register bounds.
    /// a = round index.
    pub const LAYOUT_CHANGED: u32 = 4;
    /// a = new round index.
    pub const ROUND_ADVANCED: u32 = 5;
    /// a = mistake count after the increment.
    pub const MISTAKE: u32 = 6;
    /// a = item id, b = target id.
    pub const MATCHED: u32 = 7;
    /// a = stage number (1 math, 2 memory, 3 mash, 4 victory).
    pub const BOSS_STAGE: u32 = 8;
    /// a = damage dealt, b = remaining hp.
    pub const BOSS_DAMAGE: u32 = 9;
    /// a = symbol being flashed during sequence playback.
    pub const MEMORY_FLASH: u32 = 10;
    /// Sequence playback finished; taps are accepted.
    pub const MEMORY_INPUT_OPEN: u32 = 11;
}

/// Custom input kinds (`InputEvent::Custom::kind`).
pub mod custom {
    /// Retry the current attempt from scratch.
    pub const RETRY: u32 = 1;
    /// Leave the level.
    pub const BACK: u32 = 2;
    /// a = index of the chosen math option.
    pub const MATH_ANSWER: u32 = 10;
    /// a = memory pad index (0..4).
    pub const MEMORY_PAD: u32 = 11;
    /// A tap on the boss avatar.
    pub const BOSS_TAP: u32 = 12;
}

/// Runtime-computed buffer capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum sound cues per frame.
    pub max_sounds: usize,
    /// Maximum level events per frame.
    pub max_events: usize,
    /// Size of the event section in floats.
    pub event_data_floats: usize,
}

impl ProtocolLayout {
    pub fn from_config(config: &LevelConfig) -> Self {
        Self {
            max_sounds: config.max_sounds,
            max_events: config.max_events,
            event_data_floats: config.max_events * EVENT_FLOATS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_from_default_config() {
        let layout = ProtocolLayout::from_config(&LevelConfig::default());
        assert_eq!(layout.max_events, 32);
        assert_eq!(layout.event_data_floats, 32 * EVENT_FLOATS);
    }

    #[test]
    fn event_kinds_are_distinct() {
        let kinds = [
            event::LEVEL_COMPLETE,
            event::LEVEL_FAILED,
            event::NAVIGATE_BACK,
            event::LAYOUT_CHANGED,
            event::ROUND_ADVANCED,
            event::MISTAKE,
            event::MATCHED,
            event::BOSS_STAGE,
            event::BOSS_DAMAGE,
            event::MEMORY_FLASH,
            event::MEMORY_INPUT_OPEN,
        ];
        let mut sorted = kinds.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), kinds.len());
    }
}
