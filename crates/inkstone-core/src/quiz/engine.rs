// quiz/engine.rs
//
// Per-session practice state machine. One instance per active quiz; the
// facade destroys it when the quiz is cancelled or the character is
// replaced, so stale input can never reach an old session.
//
// Input events can arrive duplicated or out of order (touch devices do
// that); anything that doesn't fit the current phase is dropped, never
// raised.

use glam::Vec2;

use super::gesture::UserGesture;
use super::scoring::{score_gesture, ScoringConfig, StrokeMatch};
use crate::character::Character;

/// Where the session is in its input/feedback cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Ready for the next pointer-down.
    AwaitingGesture,
    /// Pointer is down, points are streaming in.
    GestureInProgress,
    /// Gesture frozen, judgment in progress (transient within `end_gesture`).
    Scoring,
    /// Waiting for the feedback animation to settle.
    Feedback,
}

/// Practice progress over the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizState {
    /// Index of the stroke the user must draw next. Non-decreasing;
    /// advances by exactly one per accepted gesture.
    pub target_stroke_index: usize,
    /// Rejections on the current target; reset on acceptance.
    pub misses_on_current_stroke: u32,
    /// All strokes drawn.
    pub is_complete: bool,
}

/// Judgment of one completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureVerdict {
    Accepted {
        stroke: usize,
        /// This acceptance finished the character.
        character_complete: bool,
    },
    Rejected {
        stroke: usize,
        /// Miss count on this stroke including the current rejection.
        misses: u32,
        /// Miss threshold reached; the hint outline should be revealed.
        reveal_hint: bool,
    },
}

/// Everything the facade needs to react to one scored gesture.
#[derive(Debug, Clone)]
pub struct GestureOutcome {
    pub verdict: GestureVerdict,
    pub gesture: UserGesture,
    pub score: StrokeMatch,
}

#[derive(Debug)]
pub struct QuizEngine {
    phase: QuizPhase,
    state: QuizState,
    active: Option<UserGesture>,
    scoring: ScoringConfig,
    miss_threshold: u32,
    total_misses: u32,
}

impl QuizEngine {
    pub fn new(scoring: ScoringConfig, miss_threshold: u32) -> Self {
        Self {
            phase: QuizPhase::AwaitingGesture,
            state: QuizState {
                target_stroke_index: 0,
                misses_on_current_stroke: 0,
                is_complete: false,
            },
            active: None,
            scoring,
            miss_threshold,
            total_misses: 0,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    /// Rejections across the whole session, for the completion summary.
    pub fn total_misses(&self) -> u32 {
        self.total_misses
    }

    /// The gesture currently being drawn, if any.
    pub fn active_gesture(&self) -> Option<&UserGesture> {
        self.active.as_ref()
    }

    /// Pointer down. Only honored while awaiting a gesture on an
    /// unfinished character; a second concurrent start is dropped.
    /// Returns whether the gesture was started.
    pub fn start_gesture(&mut self, point: Vec2, at: f64) -> bool {
        if self.phase != QuizPhase::AwaitingGesture || self.state.is_complete {
            log::debug!("dropping out-of-sequence gesture start in {:?}", self.phase);
            return false;
        }
        self.active = Some(UserGesture::begin(point, at));
        self.phase = QuizPhase::GestureInProgress;
        true
    }

    /// Pointer move. No-op outside an in-progress gesture.
    pub fn continue_gesture(&mut self, point: Vec2) {
        if self.phase != QuizPhase::GestureInProgress {
            return;
        }
        if let Some(gesture) = self.active.as_mut() {
            gesture.append(point);
        }
    }

    /// Pointer up: freeze the gesture and judge it against the target
    /// stroke. Returns `None` when no gesture was in progress (duplicate
    /// or orphaned pointer-up events are dropped).
    pub fn end_gesture(&mut self, character: &Character) -> Option<GestureOutcome> {
        if self.phase != QuizPhase::GestureInProgress {
            log::debug!("dropping out-of-sequence gesture end in {:?}", self.phase);
            return None;
        }
        let mut gesture = self.active.take()?;
        gesture.freeze();
        self.phase = QuizPhase::Scoring;

        let target = self.state.target_stroke_index;
        let stroke = character
            .stroke(target)
            .expect("target index never exceeds stroke count");
        let score = score_gesture(&gesture, stroke, &self.scoring);

        let verdict = if score.accepted {
            self.state.target_stroke_index += 1;
            self.state.misses_on_current_stroke = 0;
            let character_complete = self.state.target_stroke_index == character.stroke_count();
            self.state.is_complete = character_complete;
            GestureVerdict::Accepted {
                stroke: target,
                character_complete,
            }
        } else {
            self.state.misses_on_current_stroke += 1;
            self.total_misses += 1;
            GestureVerdict::Rejected {
                stroke: target,
                misses: self.state.misses_on_current_stroke,
                reveal_hint: self.miss_threshold > 0
                    && self.state.misses_on_current_stroke >= self.miss_threshold,
            }
        };

        self.phase = QuizPhase::Feedback;
        Some(GestureOutcome {
            verdict,
            gesture,
            score,
        })
    }

    /// Feedback animation finished (or was skipped); accept input again.
    pub fn feedback_settled(&mut self) {
        if self.phase == QuizPhase::Feedback {
            self.phase = QuizPhase::AwaitingGesture;
        }
    }

    /// Abort whatever is in flight and return to awaiting input.
    /// Valid from any phase; idempotent. Progress is kept — cancel drops
    /// the gesture, not the session.
    pub fn cancel(&mut self) {
        self.active = None;
        self.phase = QuizPhase::AwaitingGesture;
    }
}
