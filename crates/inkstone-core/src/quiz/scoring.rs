// quiz/scoring.rs
//
// Judges a completed gesture against the expected stroke. A gesture passes
// when its endpoints land near the stroke's endpoints, its overall
// direction agrees with the stroke's, and no point of it strays too far
// from the stroke outline. Every threshold is a named configuration value;
// nothing here is hard-coded.

use serde::Deserialize;

use super::gesture::UserGesture;
use crate::character::Stroke;

/// Named tolerances for gesture judgment. Distances are design-grid units
/// (the grid is 1024 on a side), alignment is a cosine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Max distance between gesture start and stroke start.
    pub start_tolerance: f32,
    /// Max distance between gesture end and stroke end.
    pub end_tolerance: f32,
    /// Min cosine between gesture direction and stroke direction.
    /// 1.0 demands an exact match; 0.0 allows anything up to perpendicular.
    pub min_direction_alignment: f32,
    /// Max distance any gesture point may stray from the stroke outline.
    pub max_path_deviation: f32,
    /// Gestures with fewer captured points are rejected outright
    /// (taps and single-sample noise).
    pub min_gesture_points: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            start_tolerance: 150.0,
            end_tolerance: 150.0,
            min_direction_alignment: 0.3,
            max_path_deviation: 200.0,
            min_gesture_points: 2,
        }
    }
}

/// Per-criterion breakdown of one judgment, kept for diagnostics and for
/// integrators that want to explain a miss to the user.
#[derive(Debug, Clone, Copy)]
pub struct StrokeMatch {
    pub accepted: bool,
    pub start_distance: f32,
    pub end_distance: f32,
    pub direction_alignment: f32,
    pub path_deviation: f32,
}

/// Number of evenly spaced outline samples the deviation is measured
/// against. Flattened curves have uneven point density; resampling keeps
/// the judgment independent of how the stroke was authored.
const DEVIATION_SAMPLES: usize = 32;

/// Score a frozen gesture against a reference stroke.
pub fn score_gesture(gesture: &UserGesture, stroke: &Stroke, cfg: &ScoringConfig) -> StrokeMatch {
    let start_distance = gesture.start().distance(stroke.start());
    let end_distance = gesture.end().distance(stroke.end());
    let direction_alignment = gesture.direction().dot(stroke.direction());
    let reference = stroke.samples(DEVIATION_SAMPLES);
    let path_deviation = crate::geom::polyline_deviation(gesture.points(), &reference);

    let accepted = gesture.points().len() >= cfg.min_gesture_points.max(1)
        && start_distance <= cfg.start_tolerance
        && end_distance <= cfg.end_tolerance
        && direction_alignment >= cfg.min_direction_alignment
        && path_deviation <= cfg.max_path_deviation;

    StrokeMatch {
        accepted,
        start_distance,
        end_distance,
        direction_alignment,
        path_deviation,
    }
}
