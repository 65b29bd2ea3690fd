// quiz/gesture.rs

use glam::Vec2;

use crate::geom;

/// One continuous user-drawn input from press to release, captured in
/// design space. Append-only while live; frozen once the pointer lifts,
/// after which further appends are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct UserGesture {
    points: Vec<Vec2>,
    started_at: f64,
    frozen: bool,
}

impl UserGesture {
    pub(crate) fn begin(first: Vec2, started_at: f64) -> Self {
        Self {
            points: vec![first],
            started_at,
            frozen: false,
        }
    }

    pub(crate) fn append(&mut self, p: Vec2) {
        if !self.frozen {
            self.points.push(p);
        }
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn start(&self) -> Vec2 {
        self.points[0]
    }

    pub fn end(&self) -> Vec2 {
        *self.points.last().expect("gesture is never empty")
    }

    /// Seconds on the widget clock when the gesture began.
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Total drawn arc length in design units.
    pub fn length(&self) -> f32 {
        geom::polyline_length(&self.points)
    }

    /// Normalized overall direction (start to end).
    pub fn direction(&self) -> Vec2 {
        geom::principal_direction(&self.points)
    }
}
