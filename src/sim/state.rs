//! Game state and entity types
//!
//! Everything the tick loop mutates and the renderer reads lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;

/// Lifecycle phase of a game instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the identity provider; no input is processed
    Loading,
    /// Title screen, waiting for the start key
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Terminal. Only recreating the instance leaves this phase
    GameOver,
}

/// Opaque display token. The renderer maps these to concrete colors;
/// the simulation never handles color values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Player,
    FrontRow,
    MidRow,
    BackRow,
    PlayerShot,
    EnemyShot,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner (y grows downward)
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w > 0.0 && h > 0.0);
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }
}

/// The player ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal movement per tick while a move key is held
    pub speed: f32,
    pub tint: Tint,
}

/// One formation member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
    /// Horizontal facing, +1 or -1. Flipped for the whole formation on
    /// an edge bounce.
    pub dir: f32,
    pub tint: Tint,
}

/// A projectile, player- or enemy-fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub rect: Rect,
    pub speed: f32,
    pub tint: Tint,
}

/// One-shot things that happened during a tick. Drained by the host layer
/// each frame (quota recording, notifications); never read by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The run left the menu
    Started,
    EnemyDestroyed { awarded: u32 },
    LifeLost { remaining: u8 },
    LevelUp { level: u32 },
    GameOver { score: u64 },
}

fn fire_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Shots remaining; seeded from the provider, capped by config
    pub ammunition: u32,
    /// Score scaling from interest diversity, >= 1.0
    pub multiplier: f32,
    pub lives: u8,
    pub level: u32,
    /// Formation speed factor, grows with each cleared level
    pub game_speed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Player-fired shots, ascending
    pub shots: Vec<Shot>,
    /// Enemy-fired shots, descending
    pub enemy_shots: Vec<Shot>,
    pub cfg: GameConfig,
    /// Events emitted this tick (drained by the host)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Enemy fire rolls. Reseeded from `seed` on deserialization.
    #[serde(skip, default = "fire_rng")]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a state in `Loading` with the player and a fresh formation
    /// in place. Provider-derived values arrive via [`finish_loading`].
    ///
    /// [`finish_loading`]: GameState::finish_loading
    pub fn new(cfg: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Loading,
            score: 0,
            ammunition: cfg.default_ammo,
            multiplier: 1.0,
            lives: cfg.start_lives,
            level: 1,
            game_speed: 1.0,
            time_ticks: 0,
            player: Player {
                rect: Rect::new(
                    CANVAS_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                    CANVAS_HEIGHT - 50.0,
                    PLAYER_WIDTH,
                    PLAYER_HEIGHT,
                ),
                speed: PLAYER_SPEED,
                tint: Tint::Player,
            },
            enemies: Vec::new(),
            shots: Vec::new(),
            enemy_shots: Vec::new(),
            cfg,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_formation();
        state
    }

    /// Apply provider-derived stats and move to the menu. Ammunition is
    /// capped; the multiplier is taken as-is (already >= 1.0 by contract).
    pub fn finish_loading(&mut self, ammunition: u32, multiplier: f32) {
        if self.phase != GamePhase::Loading {
            return;
        }
        self.ammunition = ammunition.min(self.cfg.ammo_cap);
        self.multiplier = multiplier;
        self.phase = GamePhase::Menu;
    }

    /// Replace the formation with a fresh 5x10 grid at the canonical layout.
    pub fn spawn_formation(&mut self) {
        self.enemies.clear();
        for row in 0..ENEMY_ROWS {
            for col in 0..ENEMY_COLS {
                self.enemies.push(Enemy {
                    rect: Rect::new(
                        FORMATION_ORIGIN_X + col as f32 * FORMATION_COL_SPACING,
                        FORMATION_ORIGIN_Y + row as f32 * FORMATION_ROW_SPACING,
                        ENEMY_WIDTH,
                        ENEMY_HEIGHT,
                    ),
                    speed: ENEMY_SPEED,
                    dir: 1.0,
                    tint: row_tint(row),
                });
            }
        }
    }
}

/// Display token for a formation row (0 = closest to the top)
fn row_tint(row: usize) -> Tint {
    if row < 2 {
        Tint::FrontRow
    } else if row < 4 {
        Tint::MidRow
    } else {
        Tint::BackRow
    }
}
