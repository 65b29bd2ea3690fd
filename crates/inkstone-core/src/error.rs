use thiserror::Error;

/// Errors surfaced while constructing a character or its view transform.
///
/// Runtime input anomalies (out-of-order pointer events, stale animation
/// handles) are never errors; they are dropped and logged at debug level.
#[derive(Debug, Error)]
pub enum CharacterError {
    /// A raw stroke path could not be decoded into a usable point sequence.
    /// Fatal to character construction: an empty stroke would corrupt quiz
    /// indexing, so this must reach the caller instead of being skipped.
    #[error("malformed stroke data for '{glyph}' (stroke {stroke}): {reason}")]
    MalformedStrokeData {
        glyph: String,
        stroke: usize,
        reason: String,
    },

    /// The requested glyph is not present in the data source.
    #[error("unknown glyph '{0}'")]
    UnknownGlyph(String),

    /// A target size was unusable (non-positive width/height).
    /// Only reachable through direct `ViewTransform::fit` calls; the widget
    /// facade normalizes its configuration before construction.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
