use glam::Vec2;
use serde::Serialize;

use crate::api::level::{Level, LevelContext};
use crate::api::types::{ItemId, LevelEvent, SoundCue};
use crate::assets::session::TimingConfig;
use crate::bridge::protocol::{custom, event, sound};
use crate::components::item::{DraggableItem, Kind};
use crate::components::target::DropTarget;
use crate::drag::controller::PointerDragController;
use crate::input::queue::InputEvent;
use crate::level::machine::{LevelContent, LevelStateMachine, MachineSignal, Phase};
use crate::rules::matcher::MatchOutcome;
use crate::rules::stars::StarPolicy;

/// A drag-and-drop level: pointer input in, cues and outcome events out.
pub struct DragLevel<K> {
    level_number: u32,
    machine: LevelStateMachine<K>,
    drag: PointerDragController,
}

impl<K: Kind> DragLevel<K> {
    pub fn new(level_number: u32, content: LevelContent<K>, timing: TimingConfig, seed: u64) -> Self {
        Self {
            level_number,
            machine: LevelStateMachine::new(content, timing, seed),
            drag: PointerDragController::new(),
        }
    }

    pub fn machine(&self) -> &LevelStateMachine<K> {
        &self.machine
    }

    pub fn drag(&self) -> &PointerDragController {
        &self.drag
    }

    /// Mistakes per placed item across the attempt, as a rounded percentage.
    fn error_rate(&self) -> u32 {
        let total = self.machine.total_items();
        if total == 0 {
            return 0;
        }
        (self.machine.mistakes() as f64 / total as f64 * 100.0).round() as u32
    }

    fn layout_changed(&self, ctx: &mut LevelContext) {
        ctx.layout.clear();
        ctx.emit_event(LevelEvent::new(event::LAYOUT_CHANGED).with_a(self.machine.round() as f32));
    }

    fn pointer_down(&mut self, ctx: &mut LevelContext, pointer: Vec2) {
        if self.drag.is_active() {
            return;
        }
        // Matched items stay registered but hidden; look through them.
        let Some(item) = ctx
            .layout
            .items_under(pointer)
            .into_iter()
            .find(|id| self.machine.is_draggable(*id))
        else {
            return;
        };
        let Some(bounds) = ctx.layout.item_bounds(item) else {
            return;
        };
        if self.drag.begin_drag(item, bounds, pointer) {
            self.machine.on_drag_started();
            ctx.emit_sound(SoundCue(sound::DRAG));
        }
    }

    fn pointer_up(&mut self, ctx: &mut LevelContext, pointer: Vec2) {
        let Some(attempt) = self.drag.on_pointer_release(pointer, &ctx.layout) else {
            return;
        };
        match self.machine.on_drop(attempt.item, attempt.target) {
            MatchOutcome::Accepted => {
                ctx.emit_sound(SoundCue(sound::CLICK));
                ctx.emit_event(
                    LevelEvent::new(event::MATCHED)
                        .with_a(attempt.item.0 as f32)
                        .with_b(attempt.target.0 as f32),
                );
            }
            MatchOutcome::Rejected => {
                ctx.emit_sound(SoundCue(sound::ERROR));
                ctx.emit_event(LevelEvent::new(event::MISTAKE).with_a(self.machine.mistakes() as f32));
            }
            MatchOutcome::Ignored => {}
        }
    }

    fn custom(&mut self, ctx: &mut LevelContext, kind: u32) {
        match kind {
            custom::RETRY => {
                self.drag.cancel();
                self.machine.retry();
                self.layout_changed(ctx);
            }
            custom::BACK => {
                self.drag.cancel();
                ctx.emit_event(LevelEvent::new(event::NAVIGATE_BACK));
            }
            _ => log::debug!("drag level: unhandled custom event {}", kind),
        }
    }
}

#[derive(Serialize)]
struct DragView {
    item: ItemId,
    top_left: Vec2,
    size: Vec2,
    scale: f32,
}

#[derive(Serialize)]
struct DragSnapshot<'a, K> {
    level_number: u32,
    phase: Phase,
    round: usize,
    round_count: usize,
    prompt: Option<&'a str>,
    mistakes: u32,
    stars: Option<u8>,
    policy: StarPolicy,
    matched: usize,
    total: usize,
    items: &'a [DraggableItem<K>],
    targets: &'a [DropTarget<K>],
    /// Source element hidden while its proxy is in flight.
    hidden_item: Option<ItemId>,
    drag: Option<DragView>,
}

impl<K: Kind> Level for DragLevel<K> {
    fn init(&mut self, ctx: &mut LevelContext) {
        self.drag.cancel();
        self.machine.initialize();
        self.layout_changed(ctx);
        log::info!("level {}: started", self.level_number);
    }

    fn handle_input(&mut self, ctx: &mut LevelContext, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(ctx, Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => {
                self.drag.on_pointer_move(Vec2::new(x, y));
            }
            InputEvent::PointerUp { x, y } => self.pointer_up(ctx, Vec2::new(x, y)),
            InputEvent::PointerCancel => self.drag.cancel(),
            InputEvent::Custom { kind, .. } => self.custom(ctx, kind),
        }
    }

    fn advance(&mut self, ctx: &mut LevelContext) {
        for signal in self.machine.tick(ctx.dt) {
            match signal {
                MachineSignal::RoundAdvanced(round) => {
                    ctx.emit_event(LevelEvent::new(event::ROUND_ADVANCED).with_a(round as f32));
                    self.layout_changed(ctx);
                }
                MachineSignal::Completed(stars) => {
                    ctx.emit_event(LevelEvent::new(event::LEVEL_COMPLETE).with_a(stars as f32));
                }
                MachineSignal::Failed { mistakes } => {
                    ctx.emit_event(LevelEvent::new(event::LEVEL_FAILED).with_a(mistakes as f32));
                }
            }
        }
    }

    fn teardown(&mut self, _ctx: &mut LevelContext) {
        self.drag.cancel();
        log::debug!("level {}: teardown", self.level_number);
    }

    fn snapshot(&self) -> serde_json::Value {
        let (matched, total) = self.machine.progress();
        let snapshot = DragSnapshot {
            level_number: self.level_number,
            phase: self.machine.phase(),
            round: self.machine.round(),
            round_count: self.machine.round_count(),
            prompt: self.machine.prompt(),
            mistakes: self.machine.mistakes(),
            stars: self.machine.stars(),
            policy: self.machine.policy(),
            matched,
            total,
            items: self.machine.items(),
            targets: self.machine.targets(),
            hidden_item: self.drag.hidden_source(),
            drag: self.drag.session().map(|s| DragView {
                item: s.item,
                top_left: s.proxy.top_left(),
                size: s.proxy.size(),
                scale: s.proxy.scale,
            }),
        };
        serde_json::to_value(&snapshot).unwrap_or(serde_json::Value::Null)
    }

    fn text_params(&self) -> Vec<(&'static str, String)> {
        let (matched, items) = self.machine.progress();
        vec![
            ("count", self.machine.mistakes().to_string()),
            ("level", self.level_number.to_string()),
            ("current", (self.machine.round() + 1).to_string()),
            ("total", self.machine.round_count().to_string()),
            ("matched", matched.to_string()),
            ("items", items.to_string()),
            ("rate", self.error_rate().to_string()),
        ]
    }

    fn captures_pointer(&self) -> bool {
        self.drag.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::TextCatalog;
    use crate::core::layout::Bounds;
    use crate::input::queue::InputQueue;
    use crate::level::content::{self, Shape};

    /// Lay items out in a row at y=0 and targets in a row at y=200, 100px apart.
    fn register_layout(level: &DragLevel<Shape>, ctx: &mut LevelContext) {
        for (i, item) in level.machine().items().iter().enumerate() {
            ctx.layout.set_item(item.id, Bounds::from_rect(i as f32 * 100.0, 0.0, 80.0, 80.0));
        }
        for (i, target) in level.machine().targets().iter().enumerate() {
            ctx.layout.set_target(target.id, Bounds::from_rect(i as f32 * 100.0, 200.0, 80.0, 80.0));
        }
    }

    fn item_pos(index: usize) -> (f32, f32) {
        (index as f32 * 100.0 + 40.0, 40.0)
    }

    fn target_pos_for(level: &DragLevel<Shape>, kind: Shape, correct: bool) -> (f32, f32) {
        let index = level
            .machine()
            .targets()
            .iter()
            .position(|t| (t.expected == kind) == correct)
            .unwrap();
        (index as f32 * 100.0 + 40.0, 240.0)
    }

    fn drag(level: &mut DragLevel<Shape>, ctx: &mut LevelContext, from: (f32, f32), to: (f32, f32)) {
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: from.0, y: from.1 });
        input.push(InputEvent::PointerMove { x: to.0, y: to.1 });
        input.push(InputEvent::PointerUp { x: to.0, y: to.1 });
        level.update(ctx, &input);
    }

    fn step(level: &mut DragLevel<Shape>, ctx: &mut LevelContext, seconds: f32) {
        let empty = InputQueue::new();
        let steps = (seconds / ctx.dt).ceil() as usize + 1;
        for _ in 0..steps {
            level.update(ctx, &empty);
        }
    }

    fn event_kinds(ctx: &LevelContext) -> Vec<u32> {
        ctx.events.iter().map(|e| e.kind_id()).collect()
    }

    fn started() -> (DragLevel<Shape>, LevelContext) {
        let mut level = DragLevel::new(1, content::shape_match(), TimingConfig::default(), 42);
        let mut ctx = LevelContext::new();
        level.init(&mut ctx);
        assert_eq!(event_kinds(&ctx), vec![event::LAYOUT_CHANGED]);
        ctx.clear_frame_data();
        register_layout(&level, &mut ctx);
        (level, ctx)
    }

    #[test]
    fn correct_drop_emits_click_and_matched() {
        let (mut level, mut ctx) = started();
        let kind = level.machine().items()[0].kind;
        let to = target_pos_for(&level, kind, true);
        drag(&mut level, &mut ctx, item_pos(0), to);
        let cues: Vec<u32> = ctx.sounds.iter().map(|s| s.0).collect();
        assert_eq!(cues, vec![sound::DRAG, sound::CLICK]);
        assert_eq!(event_kinds(&ctx), vec![event::MATCHED]);
        assert!(level.machine().items()[0].is_matched());
        assert!(!level.captures_pointer());
    }

    #[test]
    fn wrong_drop_emits_error_and_mistake() {
        let (mut level, mut ctx) = started();
        let kind = level.machine().items()[0].kind;
        let to = target_pos_for(&level, kind, false);
        drag(&mut level, &mut ctx, item_pos(0), to);
        let cues: Vec<u32> = ctx.sounds.iter().map(|s| s.0).collect();
        assert_eq!(cues, vec![sound::DRAG, sound::ERROR]);
        assert_eq!(ctx.events[0].kind_id(), event::MISTAKE);
        assert_eq!(ctx.events[0].a, 1.0);
        assert!(!level.machine().items()[0].is_matched());
    }

    #[test]
    fn release_outside_targets_is_not_a_mistake() {
        let (mut level, mut ctx) = started();
        drag(&mut level, &mut ctx, item_pos(0), (900.0, 900.0));
        assert_eq!(level.machine().mistakes(), 0);
        assert!(ctx.events.is_empty());
        assert!(!level.drag().is_active());
    }

    #[test]
    fn pointer_capture_follows_drag_session() {
        let (mut level, mut ctx) = started();
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: 40.0, y: 40.0 });
        level.update(&mut ctx, &input);
        assert!(level.captures_pointer());
        assert_eq!(level.drag().hidden_source(), Some(level.machine().items()[0].id));

        let mut input = InputQueue::new();
        input.push(InputEvent::PointerCancel);
        level.update(&mut ctx, &input);
        assert!(!level.captures_pointer());
        assert_eq!(level.machine().mistakes(), 0);
    }

    #[test]
    fn clean_run_completes_once_with_three_stars() {
        let (mut level, mut ctx) = started();
        for i in 0..5 {
            let kind = level.machine().items()[i].kind;
            let to = target_pos_for(&level, kind, true);
            drag(&mut level, &mut ctx, item_pos(i), to);
        }
        ctx.clear_frame_data();
        let mut completions = Vec::new();
        for _ in 0..120 {
            level.update(&mut ctx, &InputQueue::new());
            completions.extend(
                ctx.events.iter().filter(|e| e.kind_id() == event::LEVEL_COMPLETE).map(|e| e.a),
            );
            ctx.clear_frame_data();
        }
        assert_eq!(completions, vec![3.0]);
        assert_eq!(level.machine().phase(), Phase::Completed);
    }

    #[test]
    fn failure_then_retry_starts_clean() {
        let (mut level, mut ctx) = started();
        let first = level.machine().items()[0].kind;
        for _ in 0..3 {
            let to = target_pos_for(&level, first, false);
            drag(&mut level, &mut ctx, item_pos(0), to);
        }
        for i in 0..5 {
            let kind = level.machine().items()[i].kind;
            let to = target_pos_for(&level, kind, true);
            drag(&mut level, &mut ctx, item_pos(i), to);
        }
        ctx.clear_frame_data();
        step(&mut level, &mut ctx, 1.0);
        assert_eq!(level.machine().phase(), Phase::Failed);
        assert!(!event_kinds(&ctx).contains(&event::LEVEL_COMPLETE));

        let mut input = InputQueue::new();
        input.push(InputEvent::custom(custom::RETRY, 0.0));
        ctx.clear_frame_data();
        level.update(&mut ctx, &input);
        assert_eq!(event_kinds(&ctx), vec![event::LAYOUT_CHANGED]);
        assert!(ctx.layout.is_empty());
        assert_eq!(level.machine().mistakes(), 0);
        assert_eq!(level.machine().phase(), Phase::Ready);
    }

    #[test]
    fn failure_event_carries_mistakes() {
        let (mut level, mut ctx) = started();
        let first = level.machine().items()[0].kind;
        for _ in 0..3 {
            let to = target_pos_for(&level, first, false);
            drag(&mut level, &mut ctx, item_pos(0), to);
        }
        for i in 0..5 {
            let kind = level.machine().items()[i].kind;
            let to = target_pos_for(&level, kind, true);
            drag(&mut level, &mut ctx, item_pos(i), to);
        }
        let mut failed = Vec::new();
        for _ in 0..60 {
            ctx.clear_frame_data();
            level.update(&mut ctx, &InputQueue::new());
            failed.extend(ctx.events.iter().filter(|e| e.kind_id() == event::LEVEL_FAILED).map(|e| e.a));
        }
        assert_eq!(failed, vec![3.0]);
    }

    #[test]
    fn back_emits_navigation() {
        let (mut level, mut ctx) = started();
        let mut input = InputQueue::new();
        input.push(InputEvent::custom(custom::BACK, 0.0));
        level.update(&mut ctx, &input);
        assert_eq!(event_kinds(&ctx), vec![event::NAVIGATE_BACK]);
    }

    #[test]
    fn snapshot_reports_items_and_phase() {
        let (level, _ctx) = started();
        let snap = level.snapshot();
        assert_eq!(snap["phase"], "ready");
        assert_eq!(snap["items"].as_array().unwrap().len(), 5);
        assert_eq!(snap["total"], 5);
        assert!(snap["drag"].is_null());
    }

    #[test]
    fn pick_up_looks_through_matched_items() {
        let (mut level, mut ctx) = started();
        let kind = level.machine().items()[0].kind;
        let to = target_pos_for(&level, kind, true);
        drag(&mut level, &mut ctx, item_pos(0), to);
        assert!(level.machine().items()[0].is_matched());

        // The hidden matched element now sits on top of a live one.
        let live = level.machine().items()[1].id;
        let matched = level.machine().items()[0].id;
        ctx.layout.clear();
        ctx.layout.set_item(live, Bounds::from_rect(0.0, 0.0, 80.0, 80.0));
        ctx.layout.set_item(matched, Bounds::from_rect(0.0, 0.0, 80.0, 80.0));

        level.handle_input(&mut ctx, &InputEvent::PointerDown { x: 40.0, y: 40.0 });
        assert!(level.captures_pointer());
        assert_eq!(level.drag().hidden_source(), Some(live));
    }

    #[test]
    fn pointer_down_captures_without_a_step() {
        let (mut level, mut ctx) = started();
        level.handle_input(&mut ctx, &InputEvent::PointerDown { x: 40.0, y: 40.0 });
        assert!(level.captures_pointer());
        assert_eq!(ctx.sounds, vec![SoundCue(sound::DRAG)]);
        assert_eq!(level.machine().phase(), Phase::InProgress);
    }

    #[test]
    fn text_params_fill_progress_and_error_rate() {
        let catalog = TextCatalog::from_json(
            r#"{ "en": {
                "progress": "Word {current} of {total}",
                "placed": "{matched}/{items}",
                "rate": "Error rate: {rate}%"
            } }"#,
        )
        .unwrap();

        let (mut level, mut ctx) = started();
        let kind = level.machine().items()[0].kind;
        let wrong = target_pos_for(&level, kind, false);
        drag(&mut level, &mut ctx, item_pos(0), wrong);
        let right = target_pos_for(&level, kind, true);
        drag(&mut level, &mut ctx, item_pos(0), right);
        let params = level.text_params();
        assert_eq!(catalog.render("en", "rate", &params), "Error rate: 20%");
        assert_eq!(catalog.render("en", "placed", &params), "1/5");

        let mut phonics = DragLevel::new(5, content::phonics(), TimingConfig::default(), 3);
        phonics.init(&mut LevelContext::new());
        assert_eq!(
            catalog.render("en", "progress", &phonics.text_params()),
            "Word 1 of 3"
        );
    }
}
