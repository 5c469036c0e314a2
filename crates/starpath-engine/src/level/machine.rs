//! Generic lifecycle of a drag-and-drop level attempt.
//!
//! The machine owns items, targets, the mistake counter and every delayed
//! transition. It knows nothing about pointers or rendering; `DragLevel` feeds it
//! drops and turns its signals into host events.

use serde::Serialize;

use crate::api::types::{ItemId, TargetId};
use crate::assets::session::TimingConfig;
use crate::components::item::{DraggableItem, Kind, Visual};
use crate::components::target::DropTarget;
use crate::core::rng::Rng;
use crate::core::time::Timers;
use crate::rules::matcher::{attempt_match, MatchOutcome};
use crate::rules::stars::{MistakeCounter, StarPolicy};

/// How a target accepts items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetShape {
    /// One item of the expected kind.
    Slot,
    /// One item; the position in the row is fixed.
    Ordinal,
    /// Every item of the expected kind in the round.
    Bin,
}

#[derive(Debug, Clone)]
pub struct TargetSpec<K> {
    pub expected: K,
    pub visual: Visual,
    pub shape: TargetShape,
}

impl<K> TargetSpec<K> {
    pub fn slot(expected: K, visual: Visual) -> Self {
        Self { expected, visual, shape: TargetShape::Slot }
    }

    pub fn ordinal(expected: K, visual: Visual) -> Self {
        Self { expected, visual, shape: TargetShape::Ordinal }
    }

    pub fn bin(expected: K, visual: Visual) -> Self {
        Self { expected, visual, shape: TargetShape::Bin }
    }
}

/// Fixed content of one round.
#[derive(Debug, Clone)]
pub struct RoundContent<K> {
    /// Caption of the round (e.g. the word being spelled), as a catalog key or literal.
    pub prompt: Option<String>,
    pub items: Vec<(K, Visual)>,
    pub targets: Vec<TargetSpec<K>>,
}

impl<K> RoundContent<K> {
    pub fn new(items: Vec<(K, Visual)>, targets: Vec<TargetSpec<K>>) -> Self {
        Self { prompt: None, items, targets }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

/// Everything that defines a level apart from its runtime state.
#[derive(Debug, Clone)]
pub struct LevelContent<K> {
    pub rounds: Vec<RoundContent<K>>,
    pub policy: StarPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    /// Built, nothing dragged yet.
    Ready,
    InProgress,
    /// All items of the round placed; waiting for the next round or the outcome.
    RoundCleared,
    Completed,
    Failed,
}

/// What the level must tell the host after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineSignal {
    RoundAdvanced(usize),
    Completed(u8),
    Failed { mistakes: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    AdvanceRound { epoch: u32 },
    Outcome { epoch: u32, stars: u8 },
}

pub struct LevelStateMachine<K> {
    content: LevelContent<K>,
    timing: TimingConfig,
    rng: Rng,
    phase: Phase,
    round: usize,
    items: Vec<DraggableItem<K>>,
    targets: Vec<DropTarget<K>>,
    mistakes: MistakeCounter,
    timers: Timers<Pending>,
    /// Bumped on every initialize; timers from older attempts are dropped on fire.
    epoch: u32,
    next_item: u32,
    next_target: u32,
    stars: Option<u8>,
    outcome_sent: bool,
}

impl<K: Kind> LevelStateMachine<K> {
    pub fn new(content: LevelContent<K>, timing: TimingConfig, seed: u64) -> Self {
        Self {
            content,
            timing,
            rng: Rng::new(seed),
            phase: Phase::Uninitialized,
            round: 0,
            items: Vec::new(),
            targets: Vec::new(),
            mistakes: MistakeCounter::new(),
            timers: Timers::new(),
            epoch: 0,
            next_item: 1,
            next_target: 1,
            stars: None,
            outcome_sent: false,
        }
    }

    /// Start a fresh attempt at round 0.
    pub fn initialize(&mut self) {
        self.timers.cancel_all();
        self.epoch = self.epoch.wrapping_add(1);
        self.mistakes.reset();
        self.next_item = 1;
        self.next_target = 1;
        self.stars = None;
        self.outcome_sent = false;
        self.build_round(0);
        self.phase = Phase::Ready;
        log::debug!(
            "level: attempt {} ready ({} rounds, {} items)",
            self.epoch,
            self.content.rounds.len(),
            self.items.len()
        );
    }

    /// Full re-initialize; nothing carries over from the previous attempt.
    pub fn retry(&mut self) {
        log::info!("level: retry after {} mistakes", self.mistakes.get());
        self.initialize();
    }

    fn build_round(&mut self, round: usize) {
        self.round = round;
        self.items.clear();
        self.targets.clear();
        let Some(content) = self.content.rounds.get(round) else {
            return;
        };

        for (kind, visual) in &content.items {
            let id = ItemId(self.next_item);
            self.next_item += 1;
            self.items.push(DraggableItem::new(id, kind.clone(), visual.clone()));
        }

        let mut slots = Vec::new();
        let mut ordinals = Vec::new();
        let mut bins = Vec::new();
        for target in &content.targets {
            let id = TargetId(self.next_target);
            self.next_target += 1;
            match target.shape {
                TargetShape::Slot => {
                    slots.push(DropTarget::new(id, target.expected.clone(), target.visual.clone()))
                }
                TargetShape::Ordinal => {
                    let index = ordinals.len();
                    ordinals.push(DropTarget::slot(id, index, target.expected.clone(), target.visual.clone()))
                }
                TargetShape::Bin => {
                    let capacity = content.items.iter().filter(|(k, _)| *k == target.expected).count();
                    bins.push(DropTarget::bin(id, target.expected.clone(), capacity, target.visual.clone()))
                }
            }
        }

        // Items always shuffle; kind slots shuffle independently. Ordinal slots
        // and bins keep their authored order.
        self.rng.shuffle(&mut self.items);
        self.rng.shuffle(&mut slots);
        self.targets.extend(slots);
        self.targets.extend(ordinals);
        self.targets.extend(bins);
    }

    /// The first pick-up of an attempt.
    pub fn on_drag_started(&mut self) {
        if self.phase == Phase::Ready {
            self.phase = Phase::InProgress;
        }
    }

    /// Resolve a drop. Mistakes are counted here; the caller only reports them.
    pub fn on_drop(&mut self, item: ItemId, target: TargetId) -> MatchOutcome {
        if !matches!(self.phase, Phase::Ready | Phase::InProgress) {
            return MatchOutcome::Ignored;
        }
        self.phase = Phase::InProgress;

        let outcome = attempt_match(&mut self.items, &mut self.targets, item, target);
        match outcome {
            MatchOutcome::Rejected => {
                let total = self.mistakes.record();
                log::debug!("level: {:?} rejected by {:?} (mistakes: {})", item, target, total);
            }
            MatchOutcome::Accepted => {
                log::debug!("level: {:?} placed on {:?}", item, target);
                if self.items.iter().all(|i| i.is_matched()) {
                    self.round_cleared();
                }
            }
            MatchOutcome::Ignored => {}
        }
        outcome
    }

    fn round_cleared(&mut self) {
        self.phase = Phase::RoundCleared;
        if self.round + 1 < self.content.rounds.len() {
            self.timers
                .schedule(self.timing.round_delay, Pending::AdvanceRound { epoch: self.epoch });
            return;
        }
        let stars = self
            .content
            .policy
            .compute_stars(self.mistakes.get(), self.total_items());
        self.stars = Some(stars);
        // Multi-round levels pause on the last round as long as on every other.
        let delay = if self.content.rounds.len() > 1 {
            self.timing.round_delay
        } else {
            self.timing.outcome_delay
        };
        self.timers
            .schedule(delay, Pending::Outcome { epoch: self.epoch, stars });
    }

    /// Advance delayed transitions.
    pub fn tick(&mut self, dt: f32) -> Vec<MachineSignal> {
        let mut signals = Vec::new();
        for pending in self.timers.tick(dt) {
            match pending {
                Pending::AdvanceRound { epoch } if epoch == self.epoch => {
                    let next = self.round + 1;
                    self.build_round(next);
                    self.phase = Phase::InProgress;
                    log::debug!("level: round {} of {}", next + 1, self.content.rounds.len());
                    signals.push(MachineSignal::RoundAdvanced(next));
                }
                Pending::Outcome { epoch, stars } if epoch == self.epoch && !self.outcome_sent => {
                    self.outcome_sent = true;
                    if self.content.policy.is_failure(stars) {
                        self.phase = Phase::Failed;
                        log::info!("level: failed with {} mistakes", self.mistakes.get());
                        signals.push(MachineSignal::Failed { mistakes: self.mistakes.get() });
                    } else {
                        self.phase = Phase::Completed;
                        log::info!("level: completed with {} stars", stars);
                        signals.push(MachineSignal::Completed(stars));
                    }
                }
                _ => {}
            }
        }
        signals
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes.get()
    }

    pub fn items(&self) -> &[DraggableItem<K>] {
        &self.items
    }

    pub fn targets(&self) -> &[DropTarget<K>] {
        &self.targets
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn round_count(&self) -> usize {
        self.content.rounds.len()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.content.rounds.get(self.round).and_then(|r| r.prompt.as_deref())
    }

    /// Stars of the finished attempt, once every item is placed.
    pub fn stars(&self) -> Option<u8> {
        self.stars
    }

    pub fn policy(&self) -> StarPolicy {
        self.content.policy
    }

    /// Items across every round of the attempt.
    pub fn total_items(&self) -> u32 {
        self.content.rounds.iter().map(|r| r.items.len() as u32).sum()
    }

    pub fn is_draggable(&self, item: ItemId) -> bool {
        matches!(self.phase, Phase::Ready | Phase::InProgress)
            && self.items.iter().any(|i| i.id == item && !i.is_matched())
    }

    /// (matched, total) for the current round.
    pub fn progress(&self) -> (usize, usize) {
        let matched = self.items.iter().filter(|i| i.is_matched()).count();
        (matched, self.items.len())
    }
}
