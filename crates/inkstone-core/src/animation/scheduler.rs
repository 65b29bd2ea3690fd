// animation/scheduler.rs
//
// Cancellable, sequenced animation driver. At most one session is live at
// a time; each session is a timeline of per-stroke tracks with their own
// delay, duration and easing. Cancellation is generation-based: a
// SessionId is only honored while it matches the live session, so pending
// work from a superseded or cancelled session can never touch the sink.

use super::easing::Easing;
use crate::render::StrokeSink;

/// What a track animates on its stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Progressive draw of the stroke outline.
    Draw,
    /// Success-highlight sweep.
    Highlight,
    /// Fade the stroke in from transparent.
    FadeIn,
    /// Fade the stroke out to transparent.
    FadeOut,
    /// Reveal the hint outline.
    Hint,
}

/// One scheduled per-stroke transition inside a timeline.
#[derive(Debug, Clone, Copy)]
pub struct Track {
    pub stroke: usize,
    pub kind: TrackKind,
    /// Seconds after session start before the track begins.
    pub delay: f32,
    /// Seconds the track runs for.
    pub duration: f32,
    pub easing: Easing,
}

impl Track {
    /// Negative delays and durations are clamped to zero rather than
    /// raised — scheduling never produces user-visible errors.
    pub fn new(stroke: usize, kind: TrackKind, delay: f32, duration: f32, easing: Easing) -> Self {
        Self {
            stroke,
            kind,
            delay: delay.max(0.0),
            duration: duration.max(0.0),
            easing,
        }
    }

    fn end(&self) -> f32 {
        self.delay + self.duration
    }
}

/// An ordered set of tracks forming one animation session.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tracks: Vec<Track>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Total session length: end of the latest-finishing track.
    pub fn duration(&self) -> f32 {
        self.tracks.iter().map(Track::end).fold(0.0, f32::max)
    }

    // -- Builders for the standard whole-character sequences --

    /// Draw every stroke in order, with a fixed gap between one stroke
    /// finishing and the next starting.
    pub fn draw_character(stroke_count: usize, duration: f32, gap: f32, easing: Easing) -> Self {
        let duration = duration.max(0.0);
        let gap = gap.max(0.0);
        let mut tl = Self::new();
        for i in 0..stroke_count {
            let delay = i as f32 * (duration + gap);
            tl.push(Track::new(i, TrackKind::Draw, delay, duration, easing));
        }
        tl
    }

    /// Draw a single stroke.
    pub fn draw_stroke(stroke: usize, duration: f32, easing: Easing) -> Self {
        let mut tl = Self::new();
        tl.push(Track::new(stroke, TrackKind::Draw, 0.0, duration, easing));
        tl
    }

    /// Highlight sweep over a single stroke.
    pub fn highlight(stroke: usize, duration: f32, easing: Easing) -> Self {
        let mut tl = Self::new();
        tl.push(Track::new(
            stroke,
            TrackKind::Highlight,
            0.0,
            duration,
            easing,
        ));
        tl
    }

    /// Simultaneous highlight of every stroke (completion flourish).
    pub fn highlight_character(stroke_count: usize, duration: f32, easing: Easing) -> Self {
        let mut tl = Self::new();
        for i in 0..stroke_count {
            tl.push(Track::new(i, TrackKind::Highlight, 0.0, duration, easing));
        }
        tl
    }

    /// Reveal the hint outline for a stroke.
    pub fn hint(stroke: usize, duration: f32, easing: Easing) -> Self {
        let mut tl = Self::new();
        tl.push(Track::new(stroke, TrackKind::Hint, 0.0, duration, easing));
        tl
    }

    /// Fade every stroke in.
    pub fn fade_in(stroke_count: usize, duration: f32, easing: Easing) -> Self {
        let mut tl = Self::new();
        for i in 0..stroke_count {
            tl.push(Track::new(i, TrackKind::FadeIn, 0.0, duration, easing));
        }
        tl
    }

    /// Fade every stroke out.
    pub fn fade_out(stroke_count: usize, duration: f32, easing: Easing) -> Self {
        let mut tl = Self::new();
        for i in 0..stroke_count {
            tl.push(Track::new(i, TrackKind::FadeOut, 0.0, duration, easing));
        }
        tl
    }
}

/// Opaque cancellation token for one scheduled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u32);

#[derive(Debug)]
struct Session {
    timeline: Timeline,
    elapsed: f32,
}

/// Cooperative single-session animation driver, advanced by `tick`.
#[derive(Debug, Default)]
pub struct Scheduler {
    active: Option<(SessionId, Session)>,
    next_id: u32,
    completed: Vec<SessionId>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session. Non-blocking: the returned id is valid
    /// immediately, and the first sink calls happen on the next `tick`.
    ///
    /// Any session still live is superseded: its id goes stale, so none of
    /// its pending work can fire afterwards. Two whole-character sessions
    /// never overlap.
    pub fn run(&mut self, timeline: Timeline) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        if timeline.is_empty() {
            // Nothing to animate; complete on the spot.
            self.active = None;
            self.completed.push(id);
            return id;
        }

        self.active = Some((
            id,
            Session {
                timeline,
                elapsed: 0.0,
            },
        ));
        id
    }

    /// Cancel a session by handle. Idempotent; stale ids are no-ops.
    /// A cancelled session produces no further sink calls and never
    /// reports completion.
    pub fn cancel(&mut self, id: SessionId) {
        if matches!(self.active, Some((active_id, _)) if active_id == id) {
            self.active = None;
        }
    }

    /// Cancel whatever session is live.
    pub fn cancel_all(&mut self) {
        self.active = None;
    }

    /// Whether `id` is the live session.
    pub fn is_active(&self, id: SessionId) -> bool {
        matches!(self.active, Some((active_id, _)) if active_id == id)
    }

    pub fn has_active_session(&self) -> bool {
        self.active.is_some()
    }

    /// Advance the live session and drive the sink. Tracks are evaluated
    /// in the order they were scheduled; a track emits nothing before its
    /// delay has elapsed. The session completes when its last track ends.
    pub fn tick(&mut self, dt: f32, sink: &mut dyn StrokeSink) {
        let dt = dt.max(0.0);
        let Some((id, session)) = self.active.as_mut() else {
            return;
        };

        session.elapsed += dt;
        let elapsed = session.elapsed;

        for track in session.timeline.tracks() {
            let local = elapsed - track.delay;
            if local < 0.0 {
                continue;
            }
            let t = if track.duration > 0.0 {
                (local / track.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let v = track.easing.apply(t);
            match track.kind {
                TrackKind::Draw => sink.stroke_progress(track.stroke, v),
                TrackKind::Highlight => sink.highlight_progress(track.stroke, v),
                TrackKind::FadeIn => sink.stroke_alpha(track.stroke, v),
                TrackKind::FadeOut => sink.stroke_alpha(track.stroke, 1.0 - v),
                TrackKind::Hint => sink.hint_alpha(track.stroke, v),
            }
        }

        if elapsed >= session.timeline.duration() {
            self.completed.push(*id);
            self.active = None;
        }
    }

    /// Drain sessions that ran to completion since the last call.
    /// Cancelled sessions never appear here.
    pub fn drain_completed(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingSink, SinkCall};

    fn progress_calls(sink: &RecordingSink) -> Vec<(usize, f32)> {
        sink.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::StrokeProgress { stroke, t } => Some((*stroke, *t)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn strokes_are_sequenced_with_gaps() {
        let mut sched = Scheduler::new();
        let mut sink = RecordingSink::new();
        sched.run(Timeline::draw_character(3, 1.0, 0.5, Easing::Linear));

        // At t=0.5 only stroke 0 is animating.
        sched.tick(0.5, &mut sink);
        let calls = progress_calls(&sink);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 0);
        assert!((calls[0].1 - 0.5).abs() < 1e-5);

        // At t=1.7 stroke 0 is done and stroke 1 (starts at 1.5) is live.
        sink.clear();
        sched.tick(1.2, &mut sink);
        let calls = progress_calls(&sink);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], (0, 1.0));
        assert_eq!(calls[1].0, 1);
        assert!((calls[1].1 - 0.2).abs() < 1e-5);
    }

    #[test]
    fn completes_only_when_last_track_ends() {
        let mut sched = Scheduler::new();
        let mut sink = RecordingSink::new();
        let id = sched.run(Timeline::draw_character(2, 1.0, 0.5, Easing::Linear));

        sched.tick(2.0, &mut sink);
        assert!(sched.drain_completed().is_empty());
        assert!(sched.is_active(id));

        // Total duration: stroke 1 starts at 1.5 and runs 1.0 -> 2.5.
        sched.tick(0.6, &mut sink);
        assert_eq!(sched.drain_completed(), vec![id]);
        assert!(!sched.is_active(id));
    }

    #[test]
    fn cancelled_session_emits_nothing() {
        let mut sched = Scheduler::new();
        let mut sink = RecordingSink::new();
        let id = sched.run(Timeline::draw_character(3, 1.0, 0.5, Easing::Linear));

        sched.tick(0.5, &mut sink);
        assert!(!sink.calls.is_empty());

        sched.cancel(id);
        sink.clear();
        for _ in 0..20 {
            sched.tick(0.5, &mut sink);
        }
        assert!(sink.calls.is_empty(), "cancelled session drove the sink");
        assert!(sched.drain_completed().is_empty());
    }

    #[test]
    fn cancel_is_idempotent_and_ignores_stale_ids() {
        let mut sched = Scheduler::new();
        let old = sched.run(Timeline::draw_stroke(0, 1.0, Easing::Linear));
        let new = sched.run(Timeline::draw_stroke(1, 1.0, Easing::Linear));

        // Superseded id is stale; cancelling it must not kill the live one.
        sched.cancel(old);
        sched.cancel(old);
        assert!(sched.is_active(new));

        sched.cancel(new);
        sched.cancel(new);
        assert!(!sched.has_active_session());
    }

    #[test]
    fn run_supersedes_previous_session() {
        let mut sched = Scheduler::new();
        let mut sink = RecordingSink::new();
        let old = sched.run(Timeline::draw_stroke(0, 10.0, Easing::Linear));
        let new = sched.run(Timeline::draw_stroke(5, 1.0, Easing::Linear));

        assert!(!sched.is_active(old));
        sched.tick(0.5, &mut sink);
        // Only the new session's stroke gets sink calls.
        for (stroke, _) in progress_calls(&sink) {
            assert_eq!(stroke, 5);
        }
        assert!(sched.is_active(new));
    }

    #[test]
    fn empty_timeline_completes_immediately() {
        let mut sched = Scheduler::new();
        let id = sched.run(Timeline::new());
        assert!(!sched.is_active(id));
        assert_eq!(sched.drain_completed(), vec![id]);
    }

    #[test]
    fn zero_duration_track_snaps_to_end() {
        let mut sched = Scheduler::new();
        let mut sink = RecordingSink::new();
        sched.run(Timeline::draw_stroke(0, 0.0, Easing::Linear));
        sched.tick(0.016, &mut sink);
        assert_eq!(progress_calls(&sink), vec![(0, 1.0)]);
    }

    #[test]
    fn negative_timing_is_clamped() {
        let track = Track::new(0, TrackKind::Draw, -2.0, -1.0, Easing::Linear);
        assert_eq!(track.delay, 0.0);
        assert_eq!(track.duration, 0.0);
    }

    #[test]
    fn fade_out_inverts_alpha() {
        let mut sched = Scheduler::new();
        let mut sink = RecordingSink::new();
        sched.run(Timeline::fade_out(1, 1.0, Easing::Linear));
        sched.tick(0.25, &mut sink);
        match sink.calls.last().unwrap() {
            SinkCall::StrokeAlpha { stroke: 0, alpha } => {
                assert!((alpha - 0.75).abs() < 1e-5);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }
}
