//! Sky Invaders entry point
//!
//! Runs a short self-driving session against the simulated provider and a
//! headless surface, logging the outcome. Real hosts embed the library,
//! implement `render::Surface` over their raster target and forward key
//! events into the input router.

use std::time::{SystemTime, UNIX_EPOCH};

use sky_invaders::config::GameConfig;
use sky_invaders::game::Game;
use sky_invaders::input::Key;
use sky_invaders::provider::{SimulatedGraphProvider, StaticResolver};
use sky_invaders::render::NullSurface;
use sky_invaders::sim::GamePhase;
use sky_invaders::storage::MemoryStore;

const DEMO_HANDLE: &str = "demo.invaders.test";
const DEMO_FRAMES: u32 = 1200;

fn main() {
    env_logger::init();
    log::info!("Sky Invaders (headless demo) starting...");

    let cfg = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => GameConfig::from_json(&json).unwrap_or_else(|err| {
                log::warn!("bad config {path}: {err}; using defaults");
                GameConfig::default()
            }),
            Err(err) => {
                log::warn!("cannot read {path}: {err}; using defaults");
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    };

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let day_stamp = format!("day-{}", now_ms / 86_400_000);

    let provider = SimulatedGraphProvider::new(
        StaticResolver(Some(DEMO_HANDLE.into())),
        MemoryStore::new(),
        day_stamp,
        now_ms,
    );
    let mut game = Game::new(provider, cfg, now_ms);

    if let Err(err) = pollster::block_on(game.init(NullSurface)) {
        log::error!("startup aborted: {err}");
        return;
    }

    // Start the run, then sweep back and forth taking potshots.
    game.input_mut().key_down(Key::Enter);
    game.frame();
    game.input_mut().key_up(Key::Enter);

    for frame in 0..DEMO_FRAMES {
        if game.phase() == GamePhase::GameOver {
            break;
        }

        let sweep = (frame / 120) % 2 == 0;
        let (held, released) = if sweep {
            (Key::ArrowRight, Key::ArrowLeft)
        } else {
            (Key::ArrowLeft, Key::ArrowRight)
        };
        game.input_mut().key_up(released);
        game.input_mut().key_down(held);

        if frame % 30 == 0 {
            game.input_mut().key_down(Key::Space);
        } else {
            game.input_mut().key_up(Key::Space);
        }

        game.frame();
    }

    log::info!(
        "demo finished: phase={:?} score={} level={} ammo={} lives={}",
        game.phase(),
        game.score(),
        game.level(),
        game.ammunition(),
        game.lives()
    );
    game.destroy();
}
