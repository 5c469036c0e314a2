use serde::Serialize;

use crate::api::level::{Level, LevelContext};
use crate::api::types::{LevelEvent, SoundCue};
use crate::assets::session::TimingConfig;
use crate::boss::encounter::{BossEncounter, BossSignal, BossStage, Feedback, BOSS_MAX_HP};
use crate::boss::math::MathQuestion;
use crate::bridge::protocol::{custom, event, sound};
use crate::input::queue::InputEvent;

/// The boss level: tap input only, no dragging.
pub struct BossLevel {
    level_number: u32,
    encounter: BossEncounter,
}

impl BossLevel {
    pub fn new(level_number: u32, timing: TimingConfig, seed: u64) -> Self {
        Self {
            level_number,
            encounter: BossEncounter::new(timing, seed),
        }
    }

    pub fn encounter(&self) -> &BossEncounter {
        &self.encounter
    }

    fn custom(&mut self, ctx: &mut LevelContext, kind: u32, a: f32) {
        let signals = match kind {
            custom::MATH_ANSWER => self.encounter.answer_math(a.max(0.0) as usize),
            custom::MEMORY_PAD => self.encounter.tap_memory(a.max(0.0) as u8),
            custom::BOSS_TAP => self.encounter.tap_boss(),
            custom::BACK => {
                ctx.emit_event(LevelEvent::new(event::NAVIGATE_BACK));
                Vec::new()
            }
            custom::RETRY => {
                log::debug!("boss: retry ignored, the encounter cannot be failed");
                Vec::new()
            }
            _ => {
                log::debug!("boss: unhandled custom event {}", kind);
                Vec::new()
            }
        };
        emit(ctx, &signals);
    }
}

fn emit(ctx: &mut LevelContext, signals: &[BossSignal]) {
    for signal in signals {
        match *signal {
            BossSignal::StageChanged(stage) => {
                ctx.emit_event(LevelEvent::new(event::BOSS_STAGE).with_a(stage.number() as f32));
            }
            BossSignal::Damage { amount, hp } => {
                ctx.emit_event(
                    LevelEvent::new(event::BOSS_DAMAGE)
                        .with_a(amount as f32)
                        .with_b(hp as f32),
                );
            }
            BossSignal::Flash(symbol) => {
                ctx.emit_sound(SoundCue(sound::CLICK));
                ctx.emit_event(LevelEvent::new(event::MEMORY_FLASH).with_a(symbol as f32));
            }
            BossSignal::InputOpen => ctx.emit_event(LevelEvent::new(event::MEMORY_INPUT_OPEN)),
            BossSignal::Tone(_) | BossSignal::Hit => ctx.emit_sound(SoundCue(sound::CLICK)),
            BossSignal::Correct => ctx.emit_sound(SoundCue(sound::CLICK)),
            BossSignal::Wrong => ctx.emit_sound(SoundCue(sound::ERROR)),
            BossSignal::Completed(stars) => {
                ctx.emit_event(LevelEvent::new(event::LEVEL_COMPLETE).with_a(stars as f32));
            }
        }
    }
}

#[derive(Serialize)]
struct QuestionView<'a> {
    text: String,
    options: &'a [i32],
}

#[derive(Serialize)]
struct MemoryView {
    input_open: bool,
    entered: usize,
    length: usize,
}

#[derive(Serialize)]
struct BossSnapshot<'a> {
    level_number: u32,
    stage: BossStage,
    stage_number: u32,
    hp: u32,
    max_hp: u32,
    tap_count: u32,
    feedback: Option<Feedback>,
    question: Option<QuestionView<'a>>,
    memory: Option<MemoryView>,
    completed: bool,
}

fn question_view(q: &MathQuestion) -> QuestionView<'_> {
    QuestionView {
        text: q.text(),
        options: &q.options,
    }
}

impl Level for BossLevel {
    fn init(&mut self, _ctx: &mut LevelContext) {
        self.encounter.start();
        log::info!("level {}: boss encounter started", self.level_number);
    }

    fn handle_input(&mut self, ctx: &mut LevelContext, event: &InputEvent) {
        if let InputEvent::Custom { kind, a, .. } = *event {
            self.custom(ctx, kind, a);
        }
    }

    fn advance(&mut self, ctx: &mut LevelContext) {
        let signals = self.encounter.tick(ctx.dt);
        emit(ctx, &signals);
    }

    fn snapshot(&self) -> serde_json::Value {
        let enc = &self.encounter;
        let snapshot = BossSnapshot {
            level_number: self.level_number,
            stage: enc.stage(),
            stage_number: enc.stage().number(),
            hp: enc.hp(),
            max_hp: BOSS_MAX_HP,
            tap_count: enc.tap_count(),
            feedback: enc.feedback(),
            question: enc.question().map(question_view),
            memory: enc.memory().map(|m| MemoryView {
                input_open: m.is_input_open(),
                entered: m.entered(),
                length: m.sequence().len(),
            }),
            completed: enc.is_completed(),
        };
        serde_json::to_value(&snapshot).unwrap_or(serde_json::Value::Null)
    }

    fn text_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("hp", self.encounter.hp().to_string()),
            ("max_hp", BOSS_MAX_HP.to_string()),
            ("count", self.encounter.tap_count().to_string()),
        ]
    }
}
