// character/loader.rs
//
// Glyph data acquisition seam. The core only needs raw stroke path strings
// per glyph id; where they come from (bundled JSON, network, host app) is
// the integrator's business.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CharacterError;

/// Synchronous source of raw stroke path data for a glyph identifier.
///
/// An unknown glyph must surface as an error at construction time, never
/// as a crash or an empty character.
pub trait CharDataLoader {
    fn load(&self, glyph: &str) -> Result<Vec<String>, CharacterError>;
}

/// Glyph data bundled as JSON: a map from glyph id to its ordered stroke
/// path strings (the format exported by the stroke-data pipeline).
#[derive(Debug, Clone, Deserialize)]
pub struct JsonCharacterSource {
    glyphs: HashMap<String, Vec<String>>,
}

impl JsonCharacterSource {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn has_glyph(&self, glyph: &str) -> bool {
        self.glyphs.contains_key(glyph)
    }

    /// Number of glyphs in the source.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl CharDataLoader for JsonCharacterSource {
    fn load(&self, glyph: &str) -> Result<Vec<String>, CharacterError> {
        self.glyphs
            .get(glyph)
            .cloned()
            .ok_or_else(|| CharacterError::UnknownGlyph(glyph.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_JSON: &str = r#"{
        "glyphs": {
            "一": ["M 100 500 L 900 500"],
            "十": ["M 100 500 L 900 500", "M 500 100 L 500 900"]
        }
    }"#;

    #[test]
    fn parses_glyph_map() {
        let src = JsonCharacterSource::from_json(TEST_JSON).unwrap();
        assert_eq!(src.len(), 2);
        assert!(src.has_glyph("十"));
        assert!(!src.has_glyph("口"));
    }

    #[test]
    fn load_returns_strokes_in_order() {
        let src = JsonCharacterSource::from_json(TEST_JSON).unwrap();
        let raws = src.load("十").unwrap();
        assert_eq!(raws.len(), 2);
        assert!(raws[0].starts_with("M 100 500"));
        assert!(raws[1].starts_with("M 500 100"));
    }

    #[test]
    fn unknown_glyph_is_an_error() {
        let src = JsonCharacterSource::from_json(TEST_JSON).unwrap();
        let err = src.load("口").unwrap_err();
        assert!(matches!(err, CharacterError::UnknownGlyph(g) if g == "口"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(JsonCharacterSource::from_json("not json").is_err());
    }
}
