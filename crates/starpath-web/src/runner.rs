use starpath_engine::{
    Bounds, InputEvent, InputQueue, ItemId, Level, LevelConfig, LevelContext,
    FixedTimestep, ProtocolLayout, TargetId, TextCatalog,
};

/// Drives one level instance: fixed timestep, input queue, frame buffers.
///
/// The web bridge keeps exactly one of these in a `thread_local!`; starting a
/// new level replaces it, which drops the old level and every timer it owned.
pub struct LevelRunner {
    level: Box<dyn Level>,
    ctx: LevelContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: LevelConfig,
    layout: ProtocolLayout,
    language: String,
    initialized: bool,
    /// Flat buffer of sound cue ids for direct memory reads.
    sound_buffer: Vec<u8>,
    /// Sounds and events the host saw after the last tick.
    published_sounds: usize,
    published_events: usize,
}

impl LevelRunner {
    pub fn new(level: Box<dyn Level>, language: impl Into<String>) -> Self {
        let config = level.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            level,
            ctx: LevelContext::new(),
            input: InputQueue::new(),
            timestep,
            layout,
            config,
            language: language.into(),
            initialized: false,
            sound_buffer,
            published_sounds: 0,
            published_events: 0,
        }
    }

    /// Initialize the level. Call once after construction.
    pub fn init(&mut self) {
        self.ctx.dt = self.config.fixed_dt;
        self.level.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Give the level a chance to clean up before it is dropped.
    pub fn teardown(&mut self) {
        if self.initialized {
            self.level.teardown(&mut self.ctx);
            self.initialized = false;
        }
        self.ctx.clear_frame_data();
        self.sound_buffer.clear();
        self.published_sounds = 0;
        self.published_events = 0;
    }

    /// Queue an input event for the next fixed step.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Hand a pointer event to the level immediately, after any input still
    /// queued. Returns whether the level now captures the pointer.
    ///
    /// Cues and events it emits go out with the next tick.
    pub fn pointer_input(&mut self, event: InputEvent) -> bool {
        if !self.initialized {
            return false;
        }
        for queued in self.input.drain() {
            self.level.handle_input(&mut self.ctx, &queued);
        }
        self.level.handle_input(&mut self.ctx, &event);
        self.level.captures_pointer()
    }

    /// Run one frame: fixed steps, then pack the sound buffer.
    ///
    /// Queued input is handed to the first step only and drained once it has
    /// been seen; a frame with no step keeps it for the next frame. Output
    /// emitted outside a tick (init, pointer handlers) is kept for this frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Drop what the host read after the previous tick.
        let seen = self.published_sounds.min(self.ctx.sounds.len());
        self.ctx.sounds.drain(..seen);
        let seen = self.published_events.min(self.ctx.events.len());
        self.ctx.events.drain(..seen);

        let steps = self.timestep.accumulate(dt);
        let no_input = InputQueue::new();
        for step in 0..steps {
            self.ctx.dt = self.timestep.dt();
            let input = if step == 0 { &self.input } else { &no_input };
            self.level.update(&mut self.ctx, input);
        }
        if steps > 0 {
            self.input.drain();
        }

        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "runner: {} events this frame, only {} fit the buffer",
                self.ctx.events.len(),
                self.layout.max_events
            );
            self.ctx.events.truncate(self.layout.max_events);
        }

        // Pack sound cues into flat buffer
        self.sound_buffer.clear();
        for cue in self.ctx.sounds.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(cue.0 as u8);
        }
        self.published_sounds = self.ctx.sounds.len();
        self.published_events = self.ctx.events.len();
    }

    pub fn set_item_bounds(&mut self, id: u32, x: f32, y: f32, width: f32, height: f32) {
        self.ctx.layout.set_item(ItemId(id), Bounds::from_rect(x, y, width, height));
    }

    pub fn set_target_bounds(&mut self, id: u32, x: f32, y: f32, width: f32, height: f32) {
        self.ctx.layout.set_target(TargetId(id), Bounds::from_rect(x, y, width, height));
    }

    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(&self.level.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                log::error!("runner: snapshot serialization failed: {}", e);
                "null".to_string()
            }
        }
    }

    /// Render `key` in the session language with the level's live values.
    pub fn text(&self, catalog: &TextCatalog, key: &str) -> String {
        let params = self.level.text_params();
        catalog.render(&self.language, key, &params)
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn level_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn level_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn level_events(&self) -> &[f32] {
        bytemuck::cast_slice(&self.ctx.events)
    }

    // ---- Capacity accessors ----

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }
}
