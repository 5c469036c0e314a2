//! `#[wasm_bindgen]` surface of the level core.
//!
//! The host calls `level_start` when a level screen mounts and `level_teardown`
//! when it unmounts. In between it forwards pointer and button input, calls
//! `level_tick` once per animation frame, then reads the sound and event buffers
//! and (when it re-renders) `level_snapshot_json`. Pointer input is handled on
//! the spot; button input waits for the next fixed step. Whatever either emits,
//! along with the level's startup events, shows up in the buffers after the
//! next `level_tick`.

pub mod runner;

pub use runner::LevelRunner;

use std::cell::RefCell;

use starpath_engine::level::archetype::build;
use starpath_engine::{InputEvent, SessionConfig, TextCatalog, PROTOCOL_VERSION};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<LevelRunner>> = RefCell::new(None);
    static CATALOG: RefCell<TextCatalog> = RefCell::new(TextCatalog::new());
}

/// Run `f` against the active runner. Calls made with no level running are
/// logged and answered with `fallback`.
fn with_runner_or<R>(call: &str, fallback: R, f: impl FnOnce(&mut LevelRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("{}: no level running, call level_start() first", call);
            fallback
        }
    })
}

fn with_runner<R: Default>(call: &str, f: impl FnOnce(&mut LevelRunner) -> R) -> R {
    with_runner_or(call, R::default(), f)
}

/// Start (or restart) a level from a `SessionConfig` JSON string.
/// Returns false and keeps the current level if the config is invalid.
#[wasm_bindgen]
pub fn level_start(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match SessionConfig::from_json(config_json) {
        Ok(config) => config,
        Err(e) => {
            log::error!("level_start: invalid session config: {}", e);
            return false;
        }
    };
    let Some(archetype) = config.resolve_archetype() else {
        log::error!("level_start: no playable level at number {}", config.level_number);
        return false;
    };
    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64 + 1);

    let mut runner = LevelRunner::new(build(archetype, &config, seed), config.language.clone());
    runner.init();

    RUNNER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if let Some(old) = slot.as_mut() {
            old.teardown();
        }
        *slot = Some(runner);
    });
    log::info!(
        "starpath: level {} ({:?}) started, seed {}",
        config.level_number,
        archetype,
        seed
    );
    true
}

/// Drop the running level. Pending delayed actions die with it.
#[wasm_bindgen]
pub fn level_teardown() {
    RUNNER.with(|cell| {
        if let Some(mut runner) = cell.borrow_mut().take() {
            runner.teardown();
        }
    });
}

#[wasm_bindgen]
pub fn level_tick(dt: f32) {
    with_runner("level_tick", |r| r.tick(dt));
}

// Pointer handlers run synchronously: each returns true while a drag is
// active, and the host calls `preventDefault()` on the DOM event when it does.

#[wasm_bindgen]
pub fn level_pointer_down(x: f32, y: f32) -> bool {
    with_runner("level_pointer_down", |r| r.pointer_input(InputEvent::PointerDown { x, y }))
}

#[wasm_bindgen]
pub fn level_pointer_move(x: f32, y: f32) -> bool {
    with_runner("level_pointer_move", |r| r.pointer_input(InputEvent::PointerMove { x, y }))
}

#[wasm_bindgen]
pub fn level_pointer_up(x: f32, y: f32) -> bool {
    with_runner("level_pointer_up", |r| r.pointer_input(InputEvent::PointerUp { x, y }))
}

#[wasm_bindgen]
pub fn level_pointer_cancel() -> bool {
    with_runner("level_pointer_cancel", |r| r.pointer_input(InputEvent::PointerCancel))
}

#[wasm_bindgen]
pub fn level_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner("level_custom_event", |r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

/// Register the rendered bounds of an item (after every `LAYOUT_CHANGED`).
#[wasm_bindgen]
pub fn level_set_item_bounds(id: u32, x: f32, y: f32, width: f32, height: f32) {
    with_runner("level_set_item_bounds", |r| r.set_item_bounds(id, x, y, width, height));
}

/// Register the rendered bounds of a drop target.
#[wasm_bindgen]
pub fn level_set_target_bounds(id: u32, x: f32, y: f32, width: f32, height: f32) {
    with_runner("level_set_target_bounds", |r| r.set_target_bounds(id, x, y, width, height));
}

#[wasm_bindgen]
pub fn level_snapshot_json() -> String {
    with_runner("level_snapshot_json", |r| r.snapshot_json())
}

/// Replace the text catalog. Returns false (keeping the old one) on bad JSON.
#[wasm_bindgen]
pub fn level_load_text_catalog(json: &str) -> bool {
    match TextCatalog::from_json(json) {
        Ok(catalog) => {
            CATALOG.with(|cell| *cell.borrow_mut() = catalog);
            true
        }
        Err(e) => {
            log::error!("level_load_text_catalog: {}", e);
            false
        }
    }
}

/// Localized text for `key` with the running level's `{token}` values filled in.
#[wasm_bindgen]
pub fn level_text(key: &str) -> String {
    CATALOG.with(|catalog| {
        let catalog = catalog.borrow();
        let text = RUNNER.with(|cell| cell.borrow().as_ref().map(|r| r.text(&catalog, key)));
        text.unwrap_or_else(|| catalog.render(starpath_engine::FALLBACK_LANGUAGE, key, &[]))
    })
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner_or("get_sound_events_ptr", std::ptr::null(), |r| r.sound_events_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner("get_sound_events_len", |r| r.sound_events_len())
}

#[wasm_bindgen]
pub fn get_level_events_ptr() -> *const f32 {
    with_runner_or("get_level_events_ptr", std::ptr::null(), |r| r.level_events_ptr())
}

#[wasm_bindgen]
pub fn get_level_events_len() -> u32 {
    with_runner("get_level_events_len", |r| r.level_events_len())
}

#[wasm_bindgen]
pub fn get_max_sounds() -> u32 {
    with_runner("get_max_sounds", |r| r.max_sounds())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner("get_max_events", |r| r.max_events())
}

#[wasm_bindgen]
pub fn get_protocol_version() -> u32 {
    PROTOCOL_VERSION
}
