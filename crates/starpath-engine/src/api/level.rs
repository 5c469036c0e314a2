use crate::api::types::{LevelEvent, SoundCue};
use crate::core::layout::Layout;
use crate::input::queue::{InputEvent, InputQueue};

/// Engine knobs a level can override, read once before `init`.
#[derive(Debug, Clone)]
pub struct LevelConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum number of sound cues per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of level events per frame (default: 32).
    pub max_events: usize,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The contract every playable level fulfils.
pub trait Level {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> LevelConfig {
        LevelConfig::default()
    }

    /// Build the first attempt: generate items/targets, reset counters.
    fn init(&mut self, ctx: &mut LevelContext);

    /// React to one input event. The host's pointer handlers reach this
    /// directly, between fixed steps; queued input comes through `update`.
    fn handle_input(&mut self, ctx: &mut LevelContext, event: &InputEvent);

    /// One fixed step. Consume queued input, advance timers, emit cues and events.
    fn update(&mut self, ctx: &mut LevelContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_input(ctx, event);
        }
        self.advance(ctx);
    }

    /// Advance time-driven state by `ctx.dt`.
    fn advance(&mut self, ctx: &mut LevelContext);

    /// Called before the level is dropped. Pending delayed actions die with the level.
    fn teardown(&mut self, _ctx: &mut LevelContext) {}

    /// Read-only view of the level for the host to render.
    fn snapshot(&self) -> serde_json::Value;

    /// Values for `{token}` placeholders in the level's text templates.
    fn text_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// True while a pointer gesture belongs to the level (an active drag), so the
    /// host suppresses native scrolling and selection for pointer moves.
    fn captures_pointer(&self) -> bool {
        false
    }
}

/// Mutable access to shared level state, passed to Level::init and Level::update.
pub struct LevelContext {
    /// Host-registered geometry of the current item and target elements.
    pub layout: Layout,
    pub sounds: Vec<SoundCue>,
    pub events: Vec<LevelEvent>,
    /// Length of the current fixed step in seconds.
    pub dt: f32,
}

impl LevelContext {
    pub fn new() -> Self {
        Self {
            layout: Layout::new(),
            sounds: Vec::new(),
            events: Vec::new(),
            dt: LevelConfig::default().fixed_dt,
        }
    }

    /// Emit a sound cue to be forwarded to the host.
    pub fn emit_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    /// Emit a level event to be forwarded to the host.
    pub fn emit_event(&mut self, event: LevelEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for LevelContext {
    fn default() -> Self {
        Self::new()
    }
}
