// character/mod.rs
//
// Stroke and character data model. Strokes are parsed once from raw path
// strings and immutable afterwards; insertion order is drawing order is
// quiz order, and it never changes.

pub mod loader;
pub mod parser;

use glam::Vec2;

use crate::geom::{self, BoundingBox};

/// Side length of the square grid glyph geometry is authored in,
/// independent of render size.
pub const DESIGN_GRID: f32 = 1024.0;

/// Bounding box of the full authoring grid.
pub fn design_bounds() -> BoundingBox {
    BoundingBox::new(Vec2::ZERO, Vec2::splat(DESIGN_GRID))
}

/// One ordered path segment of a character, drawn and judged independently.
///
/// Derived data (direction, bounds, length) is computed at construction so
/// scoring never re-walks the outline.
#[derive(Debug, Clone)]
pub struct Stroke {
    points: Vec<Vec2>,
    direction: Vec2,
    bounds: BoundingBox,
    length: f32,
}

impl Stroke {
    /// Callers must guarantee at least two distinct points; the parser is
    /// the only constructor path and enforces this.
    pub(crate) fn new(points: Vec<Vec2>) -> Self {
        debug_assert!(points.len() >= 2);
        let direction = geom::principal_direction(&points);
        let bounds = BoundingBox::from_points(&points)
            .unwrap_or(BoundingBox::new(Vec2::ZERO, Vec2::ZERO));
        let length = geom::polyline_length(&points);
        Self {
            points,
            direction,
            bounds,
            length,
        }
    }

    /// Ordered outline points in design space.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn start(&self) -> Vec2 {
        self.points[0]
    }

    pub fn end(&self) -> Vec2 {
        *self.points.last().expect("stroke is never empty")
    }

    /// Normalized start-to-end direction.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Arc length in design units.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Evenly spaced samples along the outline.
    pub fn samples(&self, n: usize) -> Vec<Vec2> {
        geom::resample(&self.points, n)
    }
}

/// A glyph identifier plus its ordered strokes. Fully immutable; replacing
/// a character means constructing a new one.
#[derive(Debug, Clone)]
pub struct Character {
    glyph: String,
    strokes: Vec<Stroke>,
}

impl Character {
    pub(crate) fn new(glyph: String, strokes: Vec<Stroke>) -> Self {
        debug_assert!(!strokes.is_empty());
        Self { glyph, strokes }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Tight bounds of the glyph geometry (subset of the design grid).
    pub fn bounds(&self) -> BoundingBox {
        self.strokes
            .iter()
            .map(|s| s.bounds())
            .reduce(BoundingBox::union)
            .expect("character has at least one stroke")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_derived_data() {
        let s = Stroke::new(vec![
            Vec2::new(100.0, 500.0),
            Vec2::new(500.0, 500.0),
            Vec2::new(900.0, 500.0),
        ]);
        assert_eq!(s.start(), Vec2::new(100.0, 500.0));
        assert_eq!(s.end(), Vec2::new(900.0, 500.0));
        assert_eq!(s.direction(), Vec2::X);
        assert!((s.length() - 800.0).abs() < 1e-3);
        assert!((s.bounds().width() - 800.0).abs() < 1e-3);
    }

    #[test]
    fn character_bounds_cover_all_strokes() {
        let a = Stroke::new(vec![Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0)]);
        let b = Stroke::new(vec![Vec2::new(500.0, 700.0), Vec2::new(900.0, 950.0)]);
        let c = Character::new("x".into(), vec![a, b]);
        let bb = c.bounds();
        assert_eq!(bb.min, Vec2::new(100.0, 100.0));
        assert_eq!(bb.max, Vec2::new(900.0, 950.0));
    }

    #[test]
    fn design_bounds_match_grid() {
        let bb = design_bounds();
        assert_eq!(bb.width(), DESIGN_GRID);
        assert_eq!(bb.height(), DESIGN_GRID);
    }
}
