//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `FrameInput::dt_ms`
//! - Stable list order (removal never reorders survivors)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod oscillator;
pub mod state;
pub mod tick;

pub use collision::{Cell, clamp_to_maze, probe, same_cell};
pub use level::{EntityKind, Level, LevelData, LevelSet, Position};
pub use oscillator::{beast_offset, triangle_wave};
pub use state::{Counters, GameEvent, GameResult, GameState, Notification, Outcome};
pub use tick::{FrameInput, FrameReport, tick};
