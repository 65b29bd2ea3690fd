pub mod animation;
pub mod character;
pub mod config;
pub mod error;
pub mod events;
pub mod facade;
pub mod geom;
pub mod quiz;
pub mod render;
pub mod transform;

// Re-export key types at crate root for convenience
pub use animation::easing::{ease, lerp, Easing};
pub use animation::scheduler::{Scheduler, SessionId, Timeline, Track, TrackKind};
pub use character::loader::{CharDataLoader, JsonCharacterSource};
pub use character::parser::parse_character;
pub use character::{design_bounds, Character, Stroke, DESIGN_GRID};
pub use config::{Color, WidgetConfig};
pub use error::CharacterError;
pub use events::{QuizSummary, WidgetEvent};
pub use facade::Widget;
pub use geom::BoundingBox;
pub use quiz::engine::{GestureOutcome, GestureVerdict, QuizEngine, QuizPhase, QuizState};
pub use quiz::gesture::UserGesture;
pub use quiz::scoring::{score_gesture, ScoringConfig, StrokeMatch};
pub use render::{RecordingSink, SinkCall, StrokeSink};
pub use transform::ViewTransform;

// The math type the whole API speaks; re-exported so integrating crates
// don't need their own glam pin.
pub use glam::Vec2;
