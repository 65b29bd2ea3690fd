// render.rs
//
// The rendering collaborator seam. The core computes *what* each stroke
// should look like each tick; a sink turns that into actual drawing on
// whatever surface the integrator has. The core itself never draws.

use glam::Vec2;

/// Per-stroke rendering commands issued by the scheduler and facade.
///
/// Values are idempotent absolute states, re-issued while an animation is
/// live — a sink may simply overwrite its previous value for the stroke.
pub trait StrokeSink {
    /// Portion of stroke `stroke` drawn so far, 0.0..=1.0.
    fn stroke_progress(&mut self, stroke: usize, t: f32);

    /// Opacity of stroke `stroke` (fade-in / fade-out transitions).
    fn stroke_alpha(&mut self, stroke: usize, alpha: f32);

    /// Progress of the success-highlight sweep over stroke `stroke`.
    fn highlight_progress(&mut self, stroke: usize, t: f32);

    /// Opacity of the hint outline revealed after repeated misses.
    fn hint_alpha(&mut self, stroke: usize, alpha: f32);

    /// One point of the in-progress user gesture, in design space.
    /// Streamed in order after each `clear_gesture`.
    fn gesture_point(&mut self, point: Vec2);

    /// Drop the currently drawn user gesture.
    fn clear_gesture(&mut self);

    /// Show or hide the full character outline.
    fn set_outline(&mut self, visible: bool);
}

/// A recorded sink call, for inspection in tests and debugging.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    StrokeProgress { stroke: usize, t: f32 },
    StrokeAlpha { stroke: usize, alpha: f32 },
    HighlightProgress { stroke: usize, t: f32 },
    HintAlpha { stroke: usize, alpha: f32 },
    GesturePoint(Vec2),
    ClearGesture,
    SetOutline(bool),
}

/// Sink that records every call it receives. Used by the test suite to
/// verify sequencing and cancellation safety.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Recorded calls matching a predicate.
    pub fn filter<'a>(
        &'a self,
        pred: impl Fn(&SinkCall) -> bool + 'a,
    ) -> impl Iterator<Item = &'a SinkCall> {
        self.calls.iter().filter(move |c| pred(c))
    }
}

impl StrokeSink for RecordingSink {
    fn stroke_progress(&mut self, stroke: usize, t: f32) {
        self.calls.push(SinkCall::StrokeProgress { stroke, t });
    }

    fn stroke_alpha(&mut self, stroke: usize, alpha: f32) {
        self.calls.push(SinkCall::StrokeAlpha { stroke, alpha });
    }

    fn highlight_progress(&mut self, stroke: usize, t: f32) {
        self.calls.push(SinkCall::HighlightProgress { stroke, t });
    }

    fn hint_alpha(&mut self, stroke: usize, alpha: f32) {
        self.calls.push(SinkCall::HintAlpha { stroke, alpha });
    }

    fn gesture_point(&mut self, point: Vec2) {
        self.calls.push(SinkCall::GesturePoint(point));
    }

    fn clear_gesture(&mut self) {
        self.calls.push(SinkCall::ClearGesture);
    }

    fn set_outline(&mut self, visible: bool) {
        self.calls.push(SinkCall::SetOutline(visible));
    }
}
