pub mod runner;

pub use runner::{decode_commands, CommandBuffer, WidgetRunner, CMD_FLOATS, EVENT_FLOATS};

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<WidgetRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut WidgetRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Widget not initialized. Call widget_init() first.");
        f(runner)
    })
}

/// Create (or replace) the widget. `glyph_data` is the bundled stroke
/// database JSON, `glyph` the character to practice, `config` a partial
/// options object (empty string for defaults). Returns an error message
/// to JS on bad input.
#[wasm_bindgen]
pub fn widget_init(glyph_data: &str, glyph: &str, config: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = WidgetRunner::new(glyph_data, glyph, config).map_err(|e| JsValue::from_str(&e))?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("inkstone: initialized for {glyph}");
    Ok(())
}

#[wasm_bindgen]
pub fn widget_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn widget_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.pointer_down(x, y));
}

#[wasm_bindgen]
pub fn widget_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.pointer_move(x, y));
}

#[wasm_bindgen]
pub fn widget_pointer_up() {
    with_runner(|r| r.pointer_up());
}

#[wasm_bindgen]
pub fn widget_animate_character() {
    with_runner(|r| r.animate_character());
}

#[wasm_bindgen]
pub fn widget_start_quiz() {
    with_runner(|r| r.start_quiz());
}

#[wasm_bindgen]
pub fn widget_cancel_quiz() {
    with_runner(|r| r.cancel_quiz());
}

#[wasm_bindgen]
pub fn widget_set_character(glyph: &str) -> bool {
    with_runner(|r| r.set_character(glyph))
}

#[wasm_bindgen]
pub fn widget_resize(width: f32, height: f32, padding: f32) {
    with_runner(|r| r.resize(width, height, padding));
}

#[wasm_bindgen]
pub fn widget_stroke_count() -> u32 {
    with_runner(|r| r.stroke_count())
}

#[wasm_bindgen]
pub fn widget_is_quiz_active() -> bool {
    with_runner(|r| r.is_quiz_active())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_commands_ptr() -> *const f32 {
    with_runner(|r| r.commands_ptr())
}

#[wasm_bindgen]
pub fn get_commands_len() -> u32 {
    with_runner(|r| r.commands_len())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}
