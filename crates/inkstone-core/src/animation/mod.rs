// animation/mod.rs
//
// Tick-driven animation layer: easing curves and the cancellable
// single-session scheduler that sequences per-stroke transitions.

pub mod easing;
pub mod scheduler;

pub use easing::{ease, lerp, Easing};
pub use scheduler::{Scheduler, SessionId, Timeline, Track, TrackKind};
