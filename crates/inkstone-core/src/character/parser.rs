// character/parser.rs
//
// Decodes raw per-stroke path strings (absolute SVG-style commands authored
// in the design grid) into ordered point sequences. Curves are flattened
// with Lyon so downstream code only ever sees polylines.
//
// Deterministic and pure: the same input always yields an identical
// Character. Any undecodable stroke aborts construction — a silently empty
// stroke would corrupt quiz indexing later.

use glam::Vec2;
use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};
use lyon::math::point;

use super::{Character, Stroke};
use crate::error::CharacterError;

/// Max distance between a flattened polyline and the true curve,
/// in design-grid units.
const FLATTEN_TOLERANCE: f32 = 1.0;

/// Consecutive points closer than this are collapsed.
const DEDUP_EPSILON: f32 = 1e-3;

/// Parse a full character from its raw stroke path strings.
///
/// Stroke order in `raw_paths` is drawing order and quiz order.
pub fn parse_character(glyph: &str, raw_paths: &[String]) -> Result<Character, CharacterError> {
    if raw_paths.is_empty() {
        return Err(CharacterError::MalformedStrokeData {
            glyph: glyph.to_string(),
            stroke: 0,
            reason: "character has no strokes".to_string(),
        });
    }

    let mut strokes = Vec::with_capacity(raw_paths.len());
    for (i, raw) in raw_paths.iter().enumerate() {
        let points =
            parse_stroke_path(raw).map_err(|reason| CharacterError::MalformedStrokeData {
                glyph: glyph.to_string(),
                stroke: i,
                reason,
            })?;
        strokes.push(Stroke::new(points));
    }

    Ok(Character::new(glyph.to_string(), strokes))
}

/// Decode one path string into a flattened, deduplicated polyline.
fn parse_stroke_path(raw: &str) -> Result<Vec<Vec2>, String> {
    let tokens = tokenize(raw)?;
    if tokens.is_empty() {
        return Err("empty path".to_string());
    }

    let mut points: Vec<Vec2> = Vec::new();
    let mut subpath_start = Vec2::ZERO;
    let mut cursor = 0;

    // First command must be a moveto.
    match tokens[0] {
        Token::Cmd('M') => {}
        Token::Cmd(c) => return Err(format!("path must start with M, found {c}")),
        Token::Num(_) => return Err("path must start with M".to_string()),
    }

    let mut cmd = ' ';
    while cursor < tokens.len() {
        match tokens[cursor] {
            Token::Cmd(c) => {
                cmd = c;
                cursor += 1;
                if c == 'Z' {
                    // Close the subpath back to its first point.
                    push_point(&mut points, subpath_start);
                    continue;
                }
            }
            // SVG semantics: bare numbers repeat the previous command.
            Token::Num(_) => {}
        }

        let current = points.last().copied().unwrap_or(Vec2::ZERO);
        match cmd {
            'M' => {
                let p = take_point(&tokens, &mut cursor, "M")?;
                subpath_start = p;
                push_point(&mut points, p);
                // Repeated coordinates after M are implicit linetos.
                cmd = 'L';
            }
            'L' => {
                let p = take_point(&tokens, &mut cursor, "L")?;
                push_point(&mut points, p);
            }
            'H' => {
                let x = take_num(&tokens, &mut cursor, "H")?;
                push_point(&mut points, Vec2::new(x, current.y));
            }
            'V' => {
                let y = take_num(&tokens, &mut cursor, "V")?;
                push_point(&mut points, Vec2::new(current.x, y));
            }
            'Q' => {
                let ctrl = take_point(&tokens, &mut cursor, "Q")?;
                let to = take_point(&tokens, &mut cursor, "Q")?;
                let seg = QuadraticBezierSegment {
                    from: point(current.x, current.y),
                    ctrl: point(ctrl.x, ctrl.y),
                    to: point(to.x, to.y),
                };
                for p in seg.flattened(FLATTEN_TOLERANCE) {
                    push_point(&mut points, Vec2::new(p.x, p.y));
                }
                push_point(&mut points, to);
            }
            'C' => {
                let c1 = take_point(&tokens, &mut cursor, "C")?;
                let c2 = take_point(&tokens, &mut cursor, "C")?;
                let to = take_point(&tokens, &mut cursor, "C")?;
                let seg = CubicBezierSegment {
                    from: point(current.x, current.y),
                    ctrl1: point(c1.x, c1.y),
                    ctrl2: point(c2.x, c2.y),
                    to: point(to.x, to.y),
                };
                for p in seg.flattened(FLATTEN_TOLERANCE) {
                    push_point(&mut points, Vec2::new(p.x, p.y));
                }
                push_point(&mut points, to);
            }
            other => return Err(format!("unsupported path command '{other}'")),
        }
    }

    if points.len() < 2 {
        return Err("stroke has fewer than two distinct points".to_string());
    }
    Ok(points)
}

/// Append a point, collapsing consecutive duplicates.
fn push_point(points: &mut Vec<Vec2>, p: Vec2) {
    if let Some(&last) = points.last() {
        if last.distance_squared(p) < DEDUP_EPSILON * DEDUP_EPSILON {
            return;
        }
    }
    points.push(p);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Cmd(char),
    Num(f32),
}

fn tokenize(raw: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' | ',' => {
                chars.next();
            }
            'M' | 'L' | 'H' | 'V' | 'Q' | 'C' | 'Z' => {
                tokens.push(Token::Cmd(c));
                chars.next();
            }
            // Lowercase (relative) commands are not part of the authoring
            // format; reject them loudly rather than misinterpreting.
            'm' | 'l' | 'h' | 'v' | 'q' | 'c' | 'z' | 'a' | 'A' | 's' | 'S' | 't' | 'T' => {
                return Err(format!("unsupported path command '{c}'"));
            }
            _ => {
                let mut num = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit()
                        || d == '.'
                        || d == 'e'
                        || d == 'E'
                        || ((d == '-' || d == '+')
                            && (num.is_empty() || num.ends_with('e') || num.ends_with('E')))
                    {
                        num.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if num.is_empty() {
                    return Err(format!("unexpected character '{c}' in path"));
                }
                let value: f32 = num
                    .parse()
                    .map_err(|_| format!("invalid number '{num}' in path"))?;
                if !value.is_finite() {
                    return Err(format!("non-finite number '{num}' in path"));
                }
                tokens.push(Token::Num(value));
            }
        }
    }

    Ok(tokens)
}

fn take_num(tokens: &[Token], cursor: &mut usize, cmd: &str) -> Result<f32, String> {
    match tokens.get(*cursor) {
        Some(Token::Num(v)) => {
            *cursor += 1;
            Ok(*v)
        }
        _ => Err(format!("command {cmd} is missing coordinates")),
    }
}

fn take_point(tokens: &[Token], cursor: &mut usize, cmd: &str) -> Result<Vec2, String> {
    let x = take_num(tokens, cursor, cmd)?;
    let y = take_num(tokens, cursor, cmd)?;
    Ok(Vec2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines() {
        let raws = vec!["M 100 500 L 900 500".to_string()];
        let c = parse_character("一", &raws).unwrap();
        assert_eq!(c.stroke_count(), 1);
        let s = c.stroke(0).unwrap();
        assert_eq!(s.start(), Vec2::new(100.0, 500.0));
        assert_eq!(s.end(), Vec2::new(900.0, 500.0));
    }

    #[test]
    fn parses_h_v_and_repeated_coords() {
        let raws = vec!["M 0 0 100 0 H 200 V 50 L 300 50 400 50".to_string()];
        let c = parse_character("t", &raws).unwrap();
        let pts = c.stroke(0).unwrap().points();
        let expected = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(200.0, 0.0),
            Vec2::new(200.0, 50.0),
            Vec2::new(300.0, 50.0),
            Vec2::new(400.0, 50.0),
        ];
        assert_eq!(pts, &expected[..]);
    }

    #[test]
    fn flattens_quadratic_curves() {
        let raws = vec!["M 0 0 Q 500 500 1000 0".to_string()];
        let c = parse_character("q", &raws).unwrap();
        let s = c.stroke(0).unwrap();
        // Flattening must produce intermediate points, not just endpoints.
        assert!(s.points().len() > 2, "got {} points", s.points().len());
        assert_eq!(s.start(), Vec2::ZERO);
        assert_eq!(s.end(), Vec2::new(1000.0, 0.0));
        // Curve apex is at y=250 for this control polygon.
        let max_y = s.points().iter().map(|p| p.y).fold(0.0, f32::max);
        assert!((max_y - 250.0).abs() < 5.0, "apex at {max_y}");
    }

    #[test]
    fn flattens_cubic_curves() {
        let raws = vec!["M 0 0 C 0 300 1000 300 1000 0".to_string()];
        let c = parse_character("c", &raws).unwrap();
        let s = c.stroke(0).unwrap();
        assert!(s.points().len() > 2);
        assert_eq!(s.end(), Vec2::new(1000.0, 0.0));
    }

    #[test]
    fn close_returns_to_subpath_start() {
        let raws = vec!["M 0 0 L 100 0 L 100 100 Z".to_string()];
        let c = parse_character("z", &raws).unwrap();
        let s = c.stroke(0).unwrap();
        assert_eq!(s.end(), Vec2::ZERO);
    }

    #[test]
    fn parse_is_deterministic() {
        let raws = vec!["M 0 0 Q 512 900 1024 100 C 0 0 512 512 900 900".to_string()];
        let a = parse_character("d", &raws).unwrap();
        let b = parse_character("d", &raws).unwrap();
        assert_eq!(a.stroke(0).unwrap().points(), b.stroke(0).unwrap().points());
    }

    #[test]
    fn rejects_empty_character() {
        let err = parse_character("x", &[]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CharacterError::MalformedStrokeData { stroke: 0, .. }
        ));
    }

    #[test]
    fn rejects_garbage_path() {
        for bad in [
            "",
            "L 10 10",          // no leading M
            "M 10",             // missing coordinate
            "M 10 10 L foo 20", // not a number
            "M 0 0 l 10 10",    // relative commands unsupported
            "M 5 5",            // single point, no extent
        ] {
            let raws = vec![bad.to_string()];
            assert!(
                parse_character("x", &raws).is_err(),
                "expected error for {bad:?}"
            );
        }
    }

    #[test]
    fn error_reports_failing_stroke_index() {
        let raws = vec!["M 0 0 L 10 10".to_string(), "bogus".to_string()];
        match parse_character("好", &raws).unwrap_err() {
            crate::error::CharacterError::MalformedStrokeData { glyph, stroke, .. } => {
                assert_eq!(glyph, "好");
                assert_eq!(stroke, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
