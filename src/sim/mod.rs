//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per scheduled frame, fixed step
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::rects_overlap;
pub use state::{Enemy, GameEvent, GamePhase, GameState, Player, Rect, Shot, Tint};
pub use tick::{TickInput, tick};
