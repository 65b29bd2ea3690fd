// events.rs

use crate::quiz::gesture::UserGesture;

/// Lifecycle notifications queued by the widget at quiz transitions and
/// drained by the integrator each frame.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// The user drew the target stroke acceptably.
    CorrectStroke { stroke: usize },
    /// The gesture failed to match the target stroke. Carries the scored
    /// gesture so hosts can inspect or replay it.
    MissedStroke { stroke: usize, gesture: UserGesture },
    /// Every stroke of the character has been drawn.
    Complete { summary: QuizSummary },
}

/// End-of-quiz report.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub glyph: String,
    pub total_strokes: usize,
    pub total_misses: u32,
    /// Widget-clock seconds from quiz start to completion.
    pub elapsed: f64,
}
