// geom/mod.rs
//
// Pure 2D geometry primitives: bounding boxes and polyline math.
// No widget state — just math over glam vectors.

use glam::Vec2;

/// Axis-aligned bounding box in design-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Tightest box around a point set. `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        let mut bb = Self {
            min: first,
            max: first,
        };
        for &p in &points[1..] {
            bb = bb.expand(p);
        }
        Some(bb)
    }

    /// Grow the box to include a point.
    pub fn expand(self, p: Vec2) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Smallest box containing both boxes.
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Total arc length of a polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Normalized start-to-end direction of a polyline.
/// Degenerate inputs (single point, zero extent) fall back to +X so the
/// caller never divides by zero.
pub fn principal_direction(points: &[Vec2]) -> Vec2 {
    match (points.first(), points.last()) {
        (Some(&a), Some(&b)) => {
            let d = b - a;
            if d.length_squared() > f32::EPSILON {
                d.normalize()
            } else {
                Vec2::X
            }
        }
        _ => Vec2::X,
    }
}

/// Resample a polyline into `n` evenly spaced points (arc-length
/// parameterized). Endpoints are preserved exactly.
pub fn resample(points: &[Vec2], n: usize) -> Vec<Vec2> {
    if points.is_empty() || n == 0 {
        return Vec::new();
    }
    if points.len() == 1 || n == 1 {
        return vec![points[0]; n];
    }

    let total = polyline_length(points);
    if total <= f32::EPSILON {
        return vec![points[0]; n];
    }

    let step = total / (n - 1) as f32;
    let mut out = Vec::with_capacity(n);
    out.push(points[0]);

    let mut seg = 0;
    let mut seg_start_dist = 0.0;
    let mut seg_len = points[1].distance(points[0]);

    for i in 1..n - 1 {
        let target = step * i as f32;
        // Advance to the segment containing the target distance.
        while seg_start_dist + seg_len < target && seg + 2 < points.len() {
            seg_start_dist += seg_len;
            seg += 1;
            seg_len = points[seg + 1].distance(points[seg]);
        }
        let t = if seg_len > f32::EPSILON {
            ((target - seg_start_dist) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(points[seg].lerp(points[seg + 1], t));
    }

    out.push(*points.last().unwrap());
    out
}

/// Distance from a point to a line segment.
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Distance from a point to the nearest segment of a polyline.
pub fn point_polyline_distance(p: Vec2, polyline: &[Vec2]) -> f32 {
    if polyline.len() < 2 {
        return polyline.first().map_or(f32::INFINITY, |&a| p.distance(a));
    }
    polyline
        .windows(2)
        .map(|w| point_segment_distance(p, w[0], w[1]))
        .fold(f32::INFINITY, f32::min)
}

/// Worst-case distance from any of `points` to the reference polyline.
/// Used to judge how far a user gesture strays from the expected stroke.
pub fn polyline_deviation(points: &[Vec2], reference: &[Vec2]) -> f32 {
    points
        .iter()
        .map(|&p| point_polyline_distance(p, reference))
        .fold(0.0, f32::max)
}
