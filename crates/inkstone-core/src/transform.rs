// transform.rs
//
// Affine mapping between the fixed design grid and the widget's render
// area. Uniform scale, aspect ratio preserved, glyph centered; the inverse
// is the exact algebraic inverse so user input captured in external space
// can be compared against design-space stroke geometry.

use glam::Vec2;

use crate::error::CharacterError;
use crate::geom::BoundingBox;

/// `external = design * scale + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    offset: Vec2,
}

impl ViewTransform {
    /// Fit `bounds` into a `width` x `height` target, inset by `padding` on
    /// every side. Fails fast on non-positive target sizes; oversized
    /// padding is clamped so the transform stays invertible.
    pub fn fit(
        bounds: BoundingBox,
        width: f32,
        height: f32,
        padding: f32,
    ) -> Result<Self, CharacterError> {
        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return Err(CharacterError::InvalidConfiguration(
                "target width and height must be positive",
            ));
        }
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(CharacterError::InvalidConfiguration(
                "design bounds must have positive extent",
            ));
        }

        let mut padding = padding.max(0.0);
        // Same cap as WidgetConfig::normalized: at least 10% of the
        // smaller dimension stays drawable, which keeps the scale large
        // enough for the inverse to round-trip in f32.
        let max_padding = 0.45 * width.min(height);
        if padding > max_padding {
            log::warn!(
                "padding {padding} leaves no drawable area in {width}x{height} target, \
                 clamping to {max_padding}"
            );
            padding = max_padding;
        }
        let avail_w = width - 2.0 * padding;
        let avail_h = height - 2.0 * padding;

        let scale = (avail_w / bounds.width()).min(avail_h / bounds.height());
        let offset = Vec2::new(width, height) * 0.5 - bounds.center() * scale;

        Ok(Self { scale, offset })
    }

    /// Design space -> external space.
    pub fn forward(&self, design: Vec2) -> Vec2 {
        design * self.scale + self.offset
    }

    /// External space -> design space.
    pub fn inverse(&self, external: Vec2) -> Vec2 {
        (external - self.offset) / self.scale
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::design_bounds;

    #[test]
    fn round_trip_identity() {
        let t = ViewTransform::fit(design_bounds(), 300.0, 200.0, 10.0).unwrap();
        for p in [
            Vec2::ZERO,
            Vec2::new(1024.0, 1024.0),
            Vec2::new(17.5, 993.25),
            Vec2::new(512.0, 1.0),
        ] {
            let back = t.inverse(t.forward(p));
            assert!(back.distance(p) < 1e-3, "{p:?} round-tripped to {back:?}");
        }
    }

    #[test]
    fn glyph_fits_inside_padded_area() {
        let t = ViewTransform::fit(design_bounds(), 300.0, 300.0, 20.0).unwrap();
        let corners = [
            Vec2::ZERO,
            Vec2::new(1024.0, 0.0),
            Vec2::new(0.0, 1024.0),
            Vec2::new(1024.0, 1024.0),
        ];
        for c in corners {
            let e = t.forward(c);
            assert!(e.x >= 20.0 - 1e-3 && e.x <= 280.0 + 1e-3, "{e:?}");
            assert!(e.y >= 20.0 - 1e-3 && e.y <= 280.0 + 1e-3, "{e:?}");
        }
    }

    #[test]
    fn glyph_is_centered() {
        let t = ViewTransform::fit(design_bounds(), 400.0, 250.0, 0.0).unwrap();
        let center = t.forward(Vec2::splat(512.0));
        assert!(center.distance(Vec2::new(200.0, 125.0)) < 1e-3);
    }

    #[test]
    fn scale_is_uniform_and_aspect_preserving() {
        // Wide target: height is the limiting dimension.
        let t = ViewTransform::fit(design_bounds(), 1000.0, 100.0, 0.0).unwrap();
        assert!((t.scale() - 100.0 / 1024.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_positive_target() {
        assert!(ViewTransform::fit(design_bounds(), 0.0, 100.0, 0.0).is_err());
        assert!(ViewTransform::fit(design_bounds(), 100.0, -5.0, 0.0).is_err());
    }

    #[test]
    fn oversized_padding_still_invertible() {
        // Padding larger than the target: clamped so a drawable area
        // remains and the round trip stays accurate.
        let t = ViewTransform::fit(design_bounds(), 100.0, 100.0, 500.0).unwrap();
        assert!((t.scale() - 10.0 / 1024.0).abs() < 1e-6, "scale {}", t.scale());
        for p in [Vec2::splat(512.0), Vec2::ZERO, Vec2::new(1024.0, 17.0)] {
            let back = t.inverse(t.forward(p));
            assert!(back.distance(p) < 1e-2, "{p:?} round-tripped to {back:?}");
        }
    }
}
