// quiz/mod.rs
//
// Practice-quiz layer: gesture capture, gesture-vs-stroke scoring, and the
// per-session state machine that turns pointer input into pass/fail
// judgments.

pub mod engine;
pub mod gesture;
pub mod scoring;

pub use engine::{GestureOutcome, GestureVerdict, QuizEngine, QuizPhase, QuizState};
pub use gesture::UserGesture;
pub use scoring::{score_gesture, ScoringConfig, StrokeMatch};
