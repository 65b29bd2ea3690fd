use inkstone_core::{
    JsonCharacterSource, SinkCall, StrokeSink, Vec2, Widget, WidgetConfig, WidgetEvent,
};

/// Render command kinds in the flat buffer read by TypeScript.
pub mod cmd {
    pub const STROKE_PROGRESS: f32 = 1.0;
    pub const STROKE_ALPHA: f32 = 2.0;
    pub const HIGHLIGHT_PROGRESS: f32 = 3.0;
    pub const HINT_ALPHA: f32 = 4.0;
    pub const GESTURE_POINT: f32 = 5.0;
    pub const CLEAR_GESTURE: f32 = 6.0;
    pub const SET_OUTLINE: f32 = 7.0;
}

/// Event kinds in the flat event buffer.
pub mod event {
    pub const CORRECT_STROKE: f32 = 1.0;
    pub const MISSED_STROKE: f32 = 2.0;
    pub const COMPLETE: f32 = 3.0;
}

/// Number of floats per render command record.
pub const CMD_FLOATS: usize = 4;
/// Number of floats per event record.
pub const EVENT_FLOATS: usize = 4;

/// Flat render-command buffer: one `(kind, a, b, c)` record per sink call,
/// rebuilt every frame and read by TypeScript via SharedArrayBuffer-style
/// pointer access.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    data: Vec<f32>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(256 * CMD_FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    fn push(&mut self, kind: f32, a: f32, b: f32, c: f32) {
        self.data.extend_from_slice(&[kind, a, b, c]);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn len_floats(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn record_count(&self) -> u32 {
        (self.data.len() / CMD_FLOATS) as u32
    }
}

impl StrokeSink for CommandBuffer {
    fn stroke_progress(&mut self, stroke: usize, t: f32) {
        self.push(cmd::STROKE_PROGRESS, stroke as f32, t, 0.0);
    }

    fn stroke_alpha(&mut self, stroke: usize, alpha: f32) {
        self.push(cmd::STROKE_ALPHA, stroke as f32, alpha, 0.0);
    }

    fn highlight_progress(&mut self, stroke: usize, t: f32) {
        self.push(cmd::HIGHLIGHT_PROGRESS, stroke as f32, t, 0.0);
    }

    fn hint_alpha(&mut self, stroke: usize, alpha: f32) {
        self.push(cmd::HINT_ALPHA, stroke as f32, alpha, 0.0);
    }

    fn gesture_point(&mut self, point: Vec2) {
        self.push(cmd::GESTURE_POINT, point.x, point.y, 0.0);
    }

    fn clear_gesture(&mut self) {
        self.push(cmd::CLEAR_GESTURE, 0.0, 0.0, 0.0);
    }

    fn set_outline(&mut self, visible: bool) {
        self.push(cmd::SET_OUTLINE, if visible { 1.0 } else { 0.0 }, 0.0, 0.0);
    }
}

/// Wires the widget facade to the browser: pointer events in, a flat
/// command buffer and event buffer out.
///
/// The concrete wasm exports live in `lib.rs` behind a `thread_local!`
/// cell, because wasm-bindgen cannot export structs holding trait objects.
pub struct WidgetRunner {
    widget: Widget,
    source: JsonCharacterSource,
    commands: CommandBuffer,
    /// Flat `(kind, a, b, c)` event records for the last frame.
    event_buffer: Vec<f32>,
}

impl WidgetRunner {
    /// Build from bundled glyph JSON, a glyph id and a config JSON object
    /// (may be empty for defaults). Errors come back as strings for the
    /// wasm boundary.
    pub fn new(glyph_data_json: &str, glyph: &str, config_json: &str) -> Result<Self, String> {
        let source = JsonCharacterSource::from_json(glyph_data_json)
            .map_err(|e| format!("bad glyph data: {e}"))?;
        let config = if config_json.trim().is_empty() {
            WidgetConfig::default()
        } else {
            WidgetConfig::from_json(config_json).map_err(|e| format!("bad config: {e}"))?
        };
        let widget = Widget::new(glyph, &source, config).map_err(|e| e.to_string())?;

        Ok(Self {
            widget,
            source,
            commands: CommandBuffer::new(),
            event_buffer: Vec::new(),
        })
    }

    /// Run one frame: advance animations, rebuild the command buffer and
    /// pack pending lifecycle events.
    pub fn tick(&mut self, dt: f32) {
        self.commands.clear();
        self.widget.tick(dt, &mut self.commands);

        self.event_buffer.clear();
        for ev in self.widget.drain_events() {
            match ev {
                WidgetEvent::CorrectStroke { stroke } => {
                    self.event_buffer
                        .extend_from_slice(&[event::CORRECT_STROKE, stroke as f32, 0.0, 0.0]);
                }
                WidgetEvent::MissedStroke { stroke, gesture } => {
                    self.event_buffer.extend_from_slice(&[
                        event::MISSED_STROKE,
                        stroke as f32,
                        gesture.points().len() as f32,
                        0.0,
                    ]);
                }
                WidgetEvent::Complete { summary } => {
                    self.event_buffer.extend_from_slice(&[
                        event::COMPLETE,
                        summary.total_strokes as f32,
                        summary.total_misses as f32,
                        summary.elapsed as f32,
                    ]);
                }
            }
        }
    }

    // ---- Input forwarding (external/widget coordinates) ----

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.widget.pointer_down(Vec2::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.widget.pointer_move(Vec2::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.widget.pointer_up();
    }

    // ---- Widget control ----

    pub fn animate_character(&mut self) {
        self.widget.animate_character();
    }

    pub fn start_quiz(&mut self) {
        self.widget.start_quiz();
    }

    pub fn cancel_quiz(&mut self) {
        self.widget.cancel_quiz();
    }

    /// Swap the practiced glyph. Returns false (and keeps the old
    /// character) when the glyph is unknown or malformed.
    pub fn set_character(&mut self, glyph: &str) -> bool {
        match self.widget.set_character(glyph, &self.source) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("set_character failed: {e}");
                false
            }
        }
    }

    pub fn resize(&mut self, width: f32, height: f32, padding: f32) {
        self.widget.resize(width, height, padding);
    }

    pub fn stroke_count(&self) -> u32 {
        self.widget.character().stroke_count() as u32
    }

    pub fn is_quiz_active(&self) -> bool {
        self.widget.is_quiz_active()
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn commands_ptr(&self) -> *const f32 {
        self.commands.ptr()
    }

    pub fn commands_len(&self) -> u32 {
        self.commands.len_floats()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr()
    }

    pub fn events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }
}

/// Debug helper: decode a command buffer back into sink calls.
pub fn decode_commands(data: &[f32]) -> Vec<SinkCall> {
    data.chunks_exact(CMD_FLOATS)
        .filter_map(|rec| {
            let (kind, a, b) = (rec[0], rec[1], rec[2]);
            match kind {
                k if k == cmd::STROKE_PROGRESS => Some(SinkCall::StrokeProgress {
                    stroke: a as usize,
                    t: b,
                }),
                k if k == cmd::STROKE_ALPHA => Some(SinkCall::StrokeAlpha {
                    stroke: a as usize,
                    alpha: b,
                }),
                k if k == cmd::HIGHLIGHT_PROGRESS => Some(SinkCall::HighlightProgress {
                    stroke: a as usize,
                    t: b,
                }),
                k if k == cmd::HINT_ALPHA => Some(SinkCall::HintAlpha {
                    stroke: a as usize,
                    alpha: b,
                }),
                k if k == cmd::GESTURE_POINT => Some(SinkCall::GesturePoint(Vec2::new(a, b))),
                k if k == cmd::CLEAR_GESTURE => Some(SinkCall::ClearGesture),
                k if k == cmd::SET_OUTLINE => Some(SinkCall::SetOutline(a != 0.0)),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"{
        "glyphs": {
            "一": ["M 100 500 L 900 500"],
            "二": ["M 100 350 L 900 350", "M 100 650 L 900 650"]
        }
    }"#;

    fn runner() -> WidgetRunner {
        WidgetRunner::new(DATA, "一", "").unwrap()
    }

    #[test]
    fn construction_errors_are_strings() {
        assert!(WidgetRunner::new("nope", "一", "").is_err());
        assert!(WidgetRunner::new(DATA, "口", "").is_err());
        assert!(WidgetRunner::new(DATA, "一", "{bad json").is_err());
    }

    #[test]
    fn command_buffer_layout_round_trips() {
        let mut buf = CommandBuffer::new();
        buf.stroke_progress(2, 0.5);
        buf.gesture_point(Vec2::new(10.0, 20.0));
        buf.set_outline(true);

        assert_eq!(buf.record_count(), 3);
        let decoded = decode_commands(buf.as_slice());
        assert_eq!(
            decoded,
            vec![
                SinkCall::StrokeProgress { stroke: 2, t: 0.5 },
                SinkCall::GesturePoint(Vec2::new(10.0, 20.0)),
                SinkCall::SetOutline(true),
            ]
        );
    }

    #[test]
    fn tick_rebuilds_commands_each_frame() {
        let mut r = runner();
        r.animate_character();
        r.tick(0.1);
        let first = r.commands_len();
        assert!(first > 0);

        r.tick(0.1);
        // Buffer was cleared and rebuilt, not appended to.
        assert!(r.commands_len() <= first + CMD_FLOATS as u32 * 4);
    }

    #[test]
    fn quiz_events_are_packed() {
        let mut r = WidgetRunner::new(DATA, "一", r#"{"feedback": false}"#).unwrap();
        r.start_quiz();
        // Trace the single stroke through external coordinates.
        r.tick(0.016);
        r.pointer_down(35.0, 150.0);
        r.pointer_move(150.0, 150.0);
        r.pointer_move(265.0, 150.0);
        r.pointer_up();
        r.tick(0.016);

        let events = r.event_buffer.clone();
        assert_eq!(events.len(), 2 * EVENT_FLOATS);
        assert_eq!(events[0], event::CORRECT_STROKE);
        assert_eq!(events[1], 0.0);
        assert_eq!(events[EVENT_FLOATS], event::COMPLETE);
        assert_eq!(events[EVENT_FLOATS + 1], 1.0);
    }

    #[test]
    fn set_character_swaps_or_keeps() {
        let mut r = runner();
        assert!(r.set_character("二"));
        assert_eq!(r.stroke_count(), 2);
        assert!(!r.set_character("口"));
        assert_eq!(r.stroke_count(), 2);
    }
}
