//! The final boss: three stages on one shared HP pool.
//!
//! Stage is a function of HP (<= 20 memory, <= 10 mash, 0 victory) and only
//! ever moves forward. Everything delayed (intro, flashes, retries, victory)
//! runs on the encounter's own timers.

use serde::Serialize;

use crate::assets::session::TimingConfig;
use crate::boss::math::MathQuestion;
use crate::boss::memory::{MemoryInput, MemoryRound};
use crate::core::rng::Rng;
use crate::core::time::Timers;

pub const BOSS_MAX_HP: u32 = 30;
pub const MEMORY_THRESHOLD: u32 = 20;
pub const MASH_THRESHOLD: u32 = 10;

pub const MATH_DAMAGE: u32 = 2;
pub const MEMORY_DAMAGE: u32 = 5;
pub const MASH_DAMAGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BossStage {
    Intro,
    Math,
    Memory,
    Mash,
    Victory,
}

impl BossStage {
    /// Wire number: 0 intro, 1 math, 2 memory, 3 mash, 4 victory.
    pub fn number(&self) -> u32 {
        match self {
            BossStage::Intro => 0,
            BossStage::Math => 1,
            BossStage::Memory => 2,
            BossStage::Mash => 3,
            BossStage::Victory => 4,
        }
    }

    /// Lowest stage allowed at `hp`.
    fn for_hp(hp: u32) -> BossStage {
        if hp == 0 {
            BossStage::Victory
        } else if hp <= MASH_THRESHOLD {
            BossStage::Mash
        } else if hp <= MEMORY_THRESHOLD {
            BossStage::Memory
        } else {
            BossStage::Math
        }
    }
}

/// Banner shown over the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Feedback {
    Correct,
    Wrong,
    Damage(u32),
    StageInfo(BossStage),
}

/// What happened during a call, for the level to turn into cues and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossSignal {
    StageChanged(BossStage),
    Damage { amount: u32, hp: u32 },
    /// Playback lit this pad.
    Flash(u8),
    InputOpen,
    /// Player tapped this memory pad.
    Tone(u8),
    Correct,
    Wrong,
    /// A mash tap landed.
    Hit,
    Completed(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BossTimer {
    EndIntro,
    Flash { generation: u32, symbol: u8 },
    OpenInput { generation: u32 },
    NewSequence { generation: u32 },
    ClearFeedback { serial: u32 },
    Victory,
}

pub struct BossEncounter {
    timing: TimingConfig,
    rng: Rng,
    stage: BossStage,
    hp: u32,
    tap_count: u32,
    question: Option<MathQuestion>,
    memory: Option<MemoryRound>,
    feedback: Option<Feedback>,
    timers: Timers<BossTimer>,
    /// Bumped per memory sequence; timers of older sequences are stale.
    generation: u32,
    feedback_serial: u32,
    completed: bool,
}

impl BossEncounter {
    pub fn new(timing: TimingConfig, seed: u64) -> Self {
        Self {
            timing,
            rng: Rng::new(seed),
            stage: BossStage::Intro,
            hp: BOSS_MAX_HP,
            tap_count: 0,
            question: None,
            memory: None,
            feedback: None,
            timers: Timers::new(),
            generation: 0,
            feedback_serial: 0,
            completed: false,
        }
    }

    /// Enter the intro. Math starts once it has played.
    pub fn start(&mut self) {
        self.timers.cancel_all();
        self.stage = BossStage::Intro;
        self.hp = BOSS_MAX_HP;
        self.tap_count = 0;
        self.question = None;
        self.memory = None;
        self.feedback = None;
        self.completed = false;
        self.generation = self.generation.wrapping_add(1);
        self.timers.schedule(self.timing.boss_intro, BossTimer::EndIntro);
        log::info!("boss: intro");
    }

    pub fn tick(&mut self, dt: f32) -> Vec<BossSignal> {
        let mut out = Vec::new();
        for timer in self.timers.tick(dt) {
            match timer {
                BossTimer::EndIntro => {
                    if self.stage == BossStage::Intro {
                        self.enter(BossStage::Math, &mut out);
                    }
                }
                BossTimer::Flash { generation, symbol } if generation == self.generation => {
                    out.push(BossSignal::Flash(symbol));
                }
                BossTimer::OpenInput { generation } if generation == self.generation => {
                    if let Some(memory) = self.memory.as_mut() {
                        memory.open_input();
                        out.push(BossSignal::InputOpen);
                    }
                }
                BossTimer::NewSequence { generation } if generation == self.generation => {
                    if self.stage == BossStage::Memory {
                        self.start_sequence();
                    }
                }
                BossTimer::ClearFeedback { serial } if serial == self.feedback_serial => {
                    self.feedback = None;
                }
                BossTimer::Victory => {
                    if !self.completed {
                        self.completed = true;
                        log::info!("boss: defeated, awarding 3 stars");
                        out.push(BossSignal::Completed(3));
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// The player picked answer button `index`.
    pub fn answer_math(&mut self, index: usize) -> Vec<BossSignal> {
        let mut out = Vec::new();
        if self.stage != BossStage::Math {
            return out;
        }
        let Some(question) = self.question.as_ref() else {
            return out;
        };

        if question.is_correct(index) {
            out.push(BossSignal::Correct);
            self.feedback = Some(Feedback::Correct);
            self.damage(MATH_DAMAGE, &mut out);
        } else {
            out.push(BossSignal::Wrong);
            self.feedback = Some(Feedback::Wrong);
        }
        if self.stage == BossStage::Math {
            self.question = Some(MathQuestion::generate(&mut self.rng));
        }
        out
    }

    /// The player tapped memory pad `pad`.
    pub fn tap_memory(&mut self, pad: u8) -> Vec<BossSignal> {
        let mut out = Vec::new();
        if self.stage != BossStage::Memory {
            return out;
        }
        let Some(memory) = self.memory.as_mut() else {
            return out;
        };
        if !memory.is_input_open() {
            return out;
        }

        out.push(BossSignal::Tone(pad));
        match memory.tap(pad) {
            MemoryInput::Progress | MemoryInput::Ignored => {}
            MemoryInput::Complete => {
                out.push(BossSignal::Correct);
                self.feedback = Some(Feedback::Correct);
                self.damage(MEMORY_DAMAGE, &mut out);
                if self.stage == BossStage::Memory {
                    self.schedule_new_sequence();
                }
            }
            MemoryInput::Wrong => {
                out.push(BossSignal::Wrong);
                self.feedback = Some(Feedback::Wrong);
                self.schedule_new_sequence();
            }
        }
        out
    }

    /// A tap on the boss avatar. Only counts during the mash stage.
    pub fn tap_boss(&mut self) -> Vec<BossSignal> {
        let mut out = Vec::new();
        if self.stage != BossStage::Mash {
            return out;
        }
        self.tap_count += 1;
        out.push(BossSignal::Hit);
        self.damage(MASH_DAMAGE, &mut out);
        out
    }

    fn damage(&mut self, amount: u32, out: &mut Vec<BossSignal>) {
        if self.stage == BossStage::Victory {
            return;
        }
        self.hp = self.hp.saturating_sub(amount);
        log::debug!("boss: -{} hp ({} left)", amount, self.hp);
        out.push(BossSignal::Damage { amount, hp: self.hp });

        if self.feedback.is_none() {
            self.feedback = Some(Feedback::Damage(amount));
        }
        self.feedback_serial = self.feedback_serial.wrapping_add(1);
        self.timers.schedule(
            self.timing.feedback_clear,
            BossTimer::ClearFeedback { serial: self.feedback_serial },
        );

        let floor = BossStage::for_hp(self.hp);
        if floor > self.stage {
            self.enter(floor, out);
        }
    }

    fn enter(&mut self, stage: BossStage, out: &mut Vec<BossSignal>) {
        self.stage = stage;
        log::info!("boss: stage {:?} at {} hp", stage, self.hp);
        out.push(BossSignal::StageChanged(stage));
        // Anything queued for the previous stage's sequence is now stale.
        self.generation = self.generation.wrapping_add(1);

        match stage {
            BossStage::Math => {
                self.question = Some(MathQuestion::generate(&mut self.rng));
            }
            BossStage::Memory => {
                self.question = None;
                self.feedback = Some(Feedback::StageInfo(stage));
                self.start_sequence();
            }
            BossStage::Mash => {
                self.question = None;
                self.memory = None;
                self.feedback = Some(Feedback::StageInfo(stage));
            }
            BossStage::Victory => {
                self.question = None;
                self.memory = None;
                self.hp = 0;
                self.timers.schedule(self.timing.victory_delay, BossTimer::Victory);
            }
            BossStage::Intro => {}
        }
    }

    /// Generate a sequence and queue its playback.
    fn start_sequence(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        let round = MemoryRound::generate(&mut self.rng);
        let interval = self.timing.memory_flash;
        for (i, &symbol) in round.sequence().iter().enumerate() {
            self.timers.schedule(
                interval * (i as f32 + 1.0),
                BossTimer::Flash { generation: self.generation, symbol },
            );
        }
        let last = interval * round.sequence().len() as f32;
        self.timers.schedule(
            last + self.timing.memory_input_delay,
            BossTimer::OpenInput { generation: self.generation },
        );
        self.memory = Some(round);
    }

    fn schedule_new_sequence(&mut self) {
        if let Some(memory) = self.memory.as_mut() {
            memory.block();
        }
        self.timers.schedule(
            self.timing.memory_retry,
            BossTimer::NewSequence { generation: self.generation },
        );
    }

    pub fn stage(&self) -> BossStage {
        self.stage
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub fn question(&self) -> Option<&MathQuestion> {
        self.question.as_ref()
    }

    pub fn memory(&self) -> Option<&MemoryRound> {
        self.memory.as_ref()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
