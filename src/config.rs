//! Gameplay rule knobs
//!
//! Geometry lives in [`crate::consts`]; the values a host might tune or
//! load from JSON live here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lives at the start of a run
    pub start_lives: u8,
    /// Ammunition used when the provider cannot supply a seed count
    pub default_ammo: u32,
    /// Upper bound on provider-supplied ammunition
    pub ammo_cap: u32,
    /// Per-enemy, per-tick chance of firing
    pub enemy_fire_chance: f32,
    /// Base score for destroying one enemy, before the multiplier
    pub kill_score: u32,
    /// Added to the formation speed factor at each level advance
    pub speed_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_lives: 3,
            default_ammo: 100,
            ammo_cap: 1000,
            enemy_fire_chance: 0.001,
            kill_score: 100,
            speed_step: 0.1,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
