// facade.rs
//
// The widget aggregate: one Character, one ViewTransform, one Scheduler,
// zero-or-one QuizEngine, plus the event queue and monotonic clock.
// "Showing" mode and "quiz" mode are mutually exclusive — starting either
// one cancels the other before it takes effect. Replacing the character
// tears down every dependent piece; nothing from the old character can
// leak into the new one.

use glam::Vec2;

use crate::animation::easing::Easing;
use crate::animation::scheduler::{Scheduler, SessionId, Timeline};
use crate::character::loader::CharDataLoader;
use crate::character::parser::parse_character;
use crate::character::{design_bounds, Character};
use crate::config::WidgetConfig;
use crate::error::CharacterError;
use crate::events::{QuizSummary, WidgetEvent};
use crate::quiz::engine::{GestureVerdict, QuizEngine, QuizPhase, QuizState};
use crate::render::StrokeSink;
use crate::transform::ViewTransform;

#[derive(Debug)]
pub struct Widget {
    config: WidgetConfig,
    character: Character,
    transform: ViewTransform,
    scheduler: Scheduler,
    quiz: Option<QuizEngine>,
    events: Vec<WidgetEvent>,
    /// Monotonic widget time in seconds, advanced by `tick`.
    clock: f64,
    quiz_started_at: f64,
    display_session: Option<SessionId>,
    feedback_session: Option<SessionId>,
}

impl Widget {
    /// Build a widget for one glyph. Construction fails on unknown glyphs
    /// and malformed stroke data; configuration problems are clamped away
    /// instead so options can never make the widget unusable.
    pub fn new(
        glyph: &str,
        loader: &dyn CharDataLoader,
        config: WidgetConfig,
    ) -> Result<Self, CharacterError> {
        let config = config.normalized();
        let raw = loader.load(glyph)?;
        let character = parse_character(glyph, &raw)?;
        let transform =
            ViewTransform::fit(design_bounds(), config.width, config.height, config.padding)?;
        log::info!(
            "widget ready: '{}' with {} strokes",
            character.glyph(),
            character.stroke_count()
        );

        Ok(Self {
            config,
            character,
            transform,
            scheduler: Scheduler::new(),
            quiz: None,
            events: Vec::new(),
            clock: 0.0,
            quiz_started_at: 0.0,
            display_session: None,
            feedback_session: None,
        })
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn is_quiz_active(&self) -> bool {
        self.quiz.is_some()
    }

    pub fn quiz_state(&self) -> Option<QuizState> {
        self.quiz.as_ref().map(|q| q.state())
    }

    /// Swap in a new character. Tears down the quiz, cancels any running
    /// animation and discards in-flight state; on failure the old
    /// character stays fully usable.
    pub fn set_character(
        &mut self,
        glyph: &str,
        loader: &dyn CharDataLoader,
    ) -> Result<(), CharacterError> {
        let raw = loader.load(glyph)?;
        let character = parse_character(glyph, &raw)?;
        let transform = ViewTransform::fit(
            design_bounds(),
            self.config.width,
            self.config.height,
            self.config.padding,
        )?;

        self.scheduler.cancel_all();
        self.display_session = None;
        self.feedback_session = None;
        self.quiz = None;
        self.character = character;
        self.transform = transform;
        log::info!("character replaced: '{}'", self.character.glyph());
        Ok(())
    }

    /// Change the render target size; the transform is recomputed so
    /// subsequent input lands in the right design-space positions.
    pub fn resize(&mut self, width: f32, height: f32, padding: f32) {
        self.config.width = width;
        self.config.height = height;
        self.config.padding = padding;
        self.config = self.config.clone().normalized();
        self.transform = ViewTransform::fit(
            design_bounds(),
            self.config.width,
            self.config.height,
            self.config.padding,
        )
        .expect("normalized config always fits");
    }

    // -- Display animations (cancel any quiz first) --

    /// Animate drawing the whole character, stroke by stroke.
    pub fn animate_character(&mut self) -> SessionId {
        self.cancel_quiz();
        let timeline = Timeline::draw_character(
            self.character.stroke_count(),
            self.config.stroke_duration,
            self.config.inter_stroke_delay,
            Easing::QuadInOut,
        );
        self.start_display(timeline)
    }

    /// Animate drawing a single stroke. `None` for out-of-range indices.
    pub fn animate_stroke(&mut self, stroke: usize) -> Option<SessionId> {
        if stroke >= self.character.stroke_count() {
            log::debug!("animate_stroke: index {stroke} out of range");
            return None;
        }
        self.cancel_quiz();
        let timeline =
            Timeline::draw_stroke(stroke, self.config.stroke_duration, Easing::QuadInOut);
        Some(self.start_display(timeline))
    }

    /// Fade the whole character in.
    pub fn fade_in(&mut self) -> SessionId {
        self.cancel_quiz();
        let timeline = Timeline::fade_in(
            self.character.stroke_count(),
            self.config.fade_duration,
            Easing::Linear,
        );
        self.start_display(timeline)
    }

    /// Fade the whole character out.
    pub fn fade_out(&mut self) -> SessionId {
        self.cancel_quiz();
        let timeline = Timeline::fade_out(
            self.character.stroke_count(),
            self.config.fade_duration,
            Easing::Linear,
        );
        self.start_display(timeline)
    }

    fn start_display(&mut self, timeline: Timeline) -> SessionId {
        self.feedback_session = None;
        let id = self.scheduler.run(timeline);
        self.display_session = Some(id);
        id
    }

    // -- Quiz lifecycle --

    /// Begin a practice session over the current character. Any running
    /// display animation is cancelled before the first gesture event is
    /// accepted; restarting replaces the previous session.
    pub fn start_quiz(&mut self) {
        if let Some(id) = self.display_session.take() {
            self.scheduler.cancel(id);
        }
        self.scheduler.cancel_all();
        self.feedback_session = None;
        self.quiz = Some(QuizEngine::new(
            self.config.scoring.clone(),
            self.config.miss_threshold,
        ));
        self.quiz_started_at = self.clock;
        log::info!("quiz started for '{}'", self.character.glyph());
    }

    /// End the practice session. Idempotent; cancels in-flight feedback.
    pub fn cancel_quiz(&mut self) {
        if self.quiz.take().is_some() {
            if let Some(id) = self.feedback_session.take() {
                self.scheduler.cancel(id);
            }
        }
    }

    // -- Pointer input (external coordinates) --

    pub fn pointer_down(&mut self, external: Vec2) {
        let design = self.transform.inverse(external);
        let at = self.clock;
        match self.quiz.as_mut() {
            Some(quiz) => {
                quiz.start_gesture(design, at);
            }
            None => log::debug!("pointer_down ignored: no active quiz"),
        }
    }

    pub fn pointer_move(&mut self, external: Vec2) {
        let design = self.transform.inverse(external);
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.continue_gesture(design);
        }
    }

    pub fn pointer_up(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        let Some(outcome) = quiz.end_gesture(&self.character) else {
            return;
        };

        match outcome.verdict {
            GestureVerdict::Accepted {
                stroke,
                character_complete,
            } => {
                self.events.push(WidgetEvent::CorrectStroke { stroke });

                let feedback = if !self.config.feedback {
                    None
                } else if character_complete && self.config.highlight_on_complete {
                    Some(Timeline::highlight_character(
                        self.character.stroke_count(),
                        self.config.highlight_duration,
                        Easing::QuadOut,
                    ))
                } else {
                    Some(Timeline::highlight(
                        stroke,
                        self.config.highlight_duration,
                        Easing::QuadOut,
                    ))
                };
                self.run_feedback(feedback);

                if character_complete {
                    let summary = QuizSummary {
                        glyph: self.character.glyph().to_string(),
                        total_strokes: self.character.stroke_count(),
                        total_misses: quiz_total_misses(&self.quiz),
                        elapsed: self.clock - self.quiz_started_at,
                    };
                    self.events.push(WidgetEvent::Complete { summary });
                }
            }
            GestureVerdict::Rejected {
                stroke,
                reveal_hint,
                ..
            } => {
                self.events.push(WidgetEvent::MissedStroke {
                    stroke,
                    gesture: outcome.gesture,
                });

                if reveal_hint && self.config.feedback {
                    self.run_feedback(Some(Timeline::hint(
                        stroke,
                        self.config.hint_duration,
                        Easing::Linear,
                    )));
                } else if reveal_hint {
                    // The reveal is unconditional at the miss threshold;
                    // with feedback disabled it snaps to full opacity on
                    // the next tick and never gates input.
                    self.scheduler
                        .run(Timeline::hint(stroke, 0.0, Easing::Linear));
                    self.run_feedback(None);
                } else {
                    // No animation to wait for.
                    self.run_feedback(None);
                }
            }
        }
    }

    /// Start (or skip) a feedback animation and settle the quiz phase
    /// accordingly.
    fn run_feedback(&mut self, timeline: Option<Timeline>) {
        match timeline {
            Some(timeline) => {
                let id = self.scheduler.run(timeline);
                self.feedback_session = Some(id);
                if !self.scheduler.is_active(id) {
                    // Zero-length timeline completed on the spot.
                    self.feedback_session = None;
                    if let Some(quiz) = self.quiz.as_mut() {
                        quiz.feedback_settled();
                    }
                }
            }
            None => {
                if let Some(quiz) = self.quiz.as_mut() {
                    quiz.feedback_settled();
                }
            }
        }
    }

    // -- Frame driving --

    /// Advance the widget by `dt` seconds and stream the current visual
    /// state into the sink.
    pub fn tick(&mut self, dt: f32, sink: &mut dyn StrokeSink) {
        let dt = dt.max(0.0);
        self.clock += dt as f64;

        self.scheduler.tick(dt, sink);

        for id in self.scheduler.drain_completed() {
            if self.display_session == Some(id) {
                self.display_session = None;
            }
            if self.feedback_session == Some(id) {
                self.feedback_session = None;
                if let Some(quiz) = self.quiz.as_mut() {
                    quiz.feedback_settled();
                }
            }
        }

        sink.set_outline(self.config.show_outline);

        // The gesture layer is rebuilt every frame, teacher-buffer style.
        sink.clear_gesture();
        if let Some(quiz) = self.quiz.as_ref() {
            if quiz.phase() == QuizPhase::GestureInProgress {
                if let Some(gesture) = quiz.active_gesture() {
                    for &p in gesture.points() {
                        sink.gesture_point(p);
                    }
                }
            }
        }
    }

    /// Drain queued lifecycle events (correct/missed/complete).
    pub fn drain_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }
}

fn quiz_total_misses(quiz: &Option<QuizEngine>) -> u32 {
    quiz.as_ref().map(QuizEngine::total_misses).unwrap_or(0)
}
