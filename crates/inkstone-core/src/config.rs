// config.rs
//
// Widget configuration surface. Everything is optional with defaults so a
// host can pass a partial JSON object (or nothing at all). Unusable values
// are clamped, never raised — the widget must always reach a renderable
// state (construction only fails on bad glyph data, not bad options).

use serde::Deserialize;

use crate::quiz::scoring::ScoringConfig;

/// RGBA color role, opaque to the core; sinks map roles to actual styling.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Render target width in external units (pixels, typically).
    pub width: f32,
    /// Render target height.
    pub height: f32,
    /// Inset on every side of the target area.
    pub padding: f32,

    /// Seconds to draw one stroke during a character animation.
    pub stroke_duration: f32,
    /// Gap between one stroke finishing and the next starting.
    pub inter_stroke_delay: f32,
    /// Length of the success-highlight sweep.
    pub highlight_duration: f32,
    /// Length of fade-in/fade-out transitions.
    pub fade_duration: f32,
    /// Length of the hint-outline reveal.
    pub hint_duration: f32,

    /// Render the full character outline behind the interaction.
    pub show_outline: bool,
    /// Flash every stroke when the quiz is completed.
    pub highlight_on_complete: bool,
    /// Animate quiz feedback; when false, feedback settles immediately.
    pub feedback: bool,
    /// Misses on one stroke before its hint outline is revealed.
    /// Zero disables hints.
    pub miss_threshold: u32,

    pub stroke_color: Color,
    pub highlight_color: Color,
    pub hint_color: Color,
    pub drawing_color: Color,

    pub scoring: ScoringConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            padding: 20.0,
            stroke_duration: 0.4,
            inter_stroke_delay: 0.25,
            highlight_duration: 0.3,
            fade_duration: 0.3,
            hint_duration: 0.2,
            show_outline: true,
            highlight_on_complete: true,
            feedback: true,
            miss_threshold: 3,
            stroke_color: Color::rgba(0.1, 0.1, 0.1, 1.0),
            highlight_color: Color::rgba(0.67, 0.85, 0.42, 1.0),
            hint_color: Color::rgba(0.67, 0.67, 0.67, 1.0),
            drawing_color: Color::rgba(0.2, 0.2, 0.2, 1.0),
            scoring: ScoringConfig::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamp unusable values into the renderable range. Non-positive or
    /// non-finite sizes fall back to defaults, negative timings go to
    /// zero; each clamp is logged once at construction.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.width.is_finite() && self.width > 0.0) {
            log::warn!("invalid width {}, using {}", self.width, defaults.width);
            self.width = defaults.width;
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            log::warn!("invalid height {}, using {}", self.height, defaults.height);
            self.height = defaults.height;
        }

        let max_padding = 0.45 * self.width.min(self.height);
        if !self.padding.is_finite() || self.padding < 0.0 {
            log::warn!("invalid padding {}, using 0", self.padding);
            self.padding = 0.0;
        } else if self.padding > max_padding {
            log::warn!("padding {} too large, clamping to {max_padding}", self.padding);
            self.padding = max_padding;
        }

        for (name, value) in [
            ("strokeDuration", &mut self.stroke_duration),
            ("interStrokeDelay", &mut self.inter_stroke_delay),
            ("highlightDuration", &mut self.highlight_duration),
            ("fadeDuration", &mut self.fade_duration),
            ("hintDuration", &mut self.hint_duration),
        ] {
            if !value.is_finite() || *value < 0.0 {
                log::warn!("invalid {name} {}, using 0", *value);
                *value = 0.0;
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_renderable() {
        let cfg = WidgetConfig::default().normalized();
        assert_eq!(cfg, WidgetConfig::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = WidgetConfig::from_json(r#"{"width": 500, "missThreshold": 5}"#).unwrap();
        assert_eq!(cfg.width, 500.0);
        assert_eq!(cfg.miss_threshold, 5);
        assert_eq!(cfg.height, WidgetConfig::default().height);
        assert_eq!(cfg.scoring, ScoringConfig::default());
    }

    #[test]
    fn scoring_thresholds_configurable_from_json() {
        let cfg =
            WidgetConfig::from_json(r#"{"scoring": {"startTolerance": 80.0}}"#).unwrap();
        assert_eq!(cfg.scoring.start_tolerance, 80.0);
        assert_eq!(
            cfg.scoring.end_tolerance,
            ScoringConfig::default().end_tolerance
        );
    }

    #[test]
    fn normalize_clamps_bad_sizes() {
        let cfg = WidgetConfig {
            width: -10.0,
            height: 0.0,
            padding: 1e6,
            stroke_duration: -1.0,
            ..WidgetConfig::default()
        }
        .normalized();

        assert_eq!(cfg.width, 300.0);
        assert_eq!(cfg.height, 300.0);
        assert!(cfg.padding <= 0.45 * 300.0);
        assert_eq!(cfg.stroke_duration, 0.0);
    }

    #[test]
    fn normalize_handles_nan() {
        let cfg = WidgetConfig {
            width: f32::NAN,
            fade_duration: f32::NEG_INFINITY,
            ..WidgetConfig::default()
        }
        .normalized();
        assert_eq!(cfg.width, 300.0);
        assert_eq!(cfg.fade_duration, 0.0);
    }
}
