//! Sky Invaders - a Space Invaders variant fed by a simulated social graph
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game rules)
//! - `render`: Frame composition over an abstract drawing surface
//! - `input`: Keyboard state and control intents
//! - `provider`: Identity/social-stat provider consumed during init
//! - `game`: Host-facing lifecycle (init / frame / destroy)

pub mod config;
pub mod game;
pub mod input;
pub mod provider;
pub mod render;
pub mod sim;
pub mod storage;

pub use config::GameConfig;
pub use game::{Game, InitError};

/// Game geometry constants
pub mod consts {
    /// Logical drawing surface dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Enemy formation - 5 rows of 10, marching as one body
    pub const ENEMY_ROWS: usize = 5;
    pub const ENEMY_COLS: usize = 10;
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 20.0;
    pub const ENEMY_SPEED: f32 = 1.0;
    pub const FORMATION_ORIGIN_X: f32 = 100.0;
    pub const FORMATION_ORIGIN_Y: f32 = 80.0;
    pub const FORMATION_COL_SPACING: f32 = 60.0;
    pub const FORMATION_ROW_SPACING: f32 = 40.0;
    /// Vertical step taken by every enemy on an edge bounce
    pub const FORMATION_DESCENT: f32 = 20.0;
    /// Enemies reaching this line end the run
    pub const INVASION_LINE: f32 = CANVAS_HEIGHT - 100.0;

    /// Projectiles
    pub const SHOT_WIDTH: f32 = 4.0;
    pub const SHOT_HEIGHT: f32 = 10.0;
    pub const PLAYER_SHOT_SPEED: f32 = 7.0;
    pub const ENEMY_SHOT_SPEED: f32 = 3.0;
}
