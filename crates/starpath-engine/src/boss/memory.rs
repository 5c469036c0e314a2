use serde::Serialize;

use crate::core::rng::Rng;

/// Symbols per sequence.
pub const SEQUENCE_LEN: usize = 4;
/// Distinct pads the player can tap.
pub const PAD_COUNT: u32 = 4;

/// Result of one pad tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryInput {
    /// Right symbol, more to go.
    Progress,
    /// Whole sequence replayed.
    Complete,
    /// Wrong symbol; the sequence is dead.
    Wrong,
    /// Input is closed (playback running or round over).
    Ignored,
}

/// A flashed sequence and the player's progress replaying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryRound {
    sequence: Vec<u8>,
    entered: usize,
    input_open: bool,
}

impl MemoryRound {
    pub fn generate(rng: &mut Rng) -> Self {
        let sequence = (0..SEQUENCE_LEN).map(|_| rng.next_int(PAD_COUNT) as u8).collect();
        Self {
            sequence,
            entered: 0,
            input_open: false,
        }
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn entered(&self) -> usize {
        self.entered
    }

    pub fn is_input_open(&self) -> bool {
        self.input_open
    }

    /// Playback finished.
    pub fn open_input(&mut self) {
        self.input_open = true;
    }

    pub fn block(&mut self) {
        self.input_open = false;
    }

    /// Compare `pad` with the symbol at the current position.
    pub fn tap(&mut self, pad: u8) -> MemoryInput {
        if !self.input_open {
            return MemoryInput::Ignored;
        }
        if self.sequence.get(self.entered) != Some(&pad) {
            self.input_open = false;
            return MemoryInput::Wrong;
        }
        self.entered += 1;
        if self.entered == self.sequence.len() {
            self.input_open = false;
            MemoryInput::Complete
        } else {
            MemoryInput::Progress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(sequence: &[u8]) -> MemoryRound {
        MemoryRound {
            sequence: sequence.to_vec(),
            entered: 0,
            input_open: true,
        }
    }

    #[test]
    fn generated_symbols_in_range() {
        let mut rng = Rng::new(77);
        for _ in 0..100 {
            let r = MemoryRound::generate(&mut rng);
            assert_eq!(r.sequence().len(), SEQUENCE_LEN);
            assert!(r.sequence().iter().all(|&s| u32::from(s) < PAD_COUNT));
            assert!(!r.is_input_open());
        }
    }

    #[test]
    fn taps_during_playback_are_ignored() {
        let mut r = round(&[1, 2, 3, 0]);
        r.block();
        assert_eq!(r.tap(1), MemoryInput::Ignored);
        assert_eq!(r.entered(), 0);
    }

    #[test]
    fn full_replay_completes() {
        let mut r = round(&[3, 3, 0, 1]);
        assert_eq!(r.tap(3), MemoryInput::Progress);
        assert_eq!(r.tap(3), MemoryInput::Progress);
        assert_eq!(r.tap(0), MemoryInput::Progress);
        assert_eq!(r.tap(1), MemoryInput::Complete);
        assert_eq!(r.tap(1), MemoryInput::Ignored);
    }

    #[test]
    fn wrong_tap_closes_input() {
        let mut r = round(&[2, 1, 0, 0]);
        assert_eq!(r.tap(2), MemoryInput::Progress);
        assert_eq!(r.tap(3), MemoryInput::Wrong);
        assert!(!r.is_input_open());
        assert_eq!(r.tap(1), MemoryInput::Ignored);
    }
}
