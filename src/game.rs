//! Host-facing game instance
//!
//! Owns the provider session, the input router, the simulation state and
//! the drawing surface. Hosts call `init` once, `frame` once per display
//! refresh, and `destroy` on teardown. Several instances can coexist;
//! keeping a page to a single game is the host's policy, not the engine's.

use thiserror::Error;

use crate::config::GameConfig;
use crate::input::InputRouter;
use crate::provider::{
    BASELINE_TAG, ProviderError, Session, StatsProvider, multiplier_from_tags,
};
use crate::render::{Surface, draw_frame};
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Why startup did not reach the menu
#[derive(Debug, Error)]
pub enum InitError {
    #[error("authentication failed: {0}")]
    Auth(#[from] ProviderError),
    /// Graceful abort; the instance stays inert.
    #[error("daily play limit reached ({used}/{limit})")]
    QuotaExhausted { used: u32, limit: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Single user-visible message channel. Hosts typically show a modal;
/// the default implementation logs.
pub trait Notifier {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Default notifier backed by the log facade
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => log::error!("{message}"),
            Severity::Success | Severity::Info => log::info!("{message}"),
        }
    }
}

pub struct Game<P: StatsProvider, S: Surface> {
    provider: P,
    state: GameState,
    input: InputRouter,
    session: Option<Session>,
    surface: Option<S>,
    notifier: Box<dyn Notifier>,
}

impl<P: StatsProvider, S: Surface> Game<P, S> {
    pub fn new(provider: P, cfg: GameConfig, seed: u64) -> Self {
        Self {
            provider,
            state: GameState::new(cfg, seed),
            input: InputRouter::new(),
            session: None,
            surface: None,
            notifier: Box::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Run the loading sequence: authenticate, fetch stats (recovering
    /// with defaults), gate on the daily quota, then take the surface and
    /// enter the menu. Provider calls are attempted once; no retries.
    pub async fn init(&mut self, surface: S) -> Result<(), InitError> {
        let session = match self.provider.authenticate().await {
            Ok(session) => session,
            Err(err) => {
                self.notifier
                    .notify(Severity::Error, "Failed to load game. Please try again.");
                return Err(err.into());
            }
        };
        log::info!("authenticated as {}", session.handle);

        let ammunition = match self.provider.ammunition_seed(&session).await {
            Ok(count) => count,
            Err(err) => {
                let fallback = self.state.cfg.default_ammo;
                log::warn!("ammunition fetch failed ({err}); defaulting to {fallback}");
                fallback
            }
        };

        let tags = match self.provider.interest_tags(&session).await {
            Ok(tags) if !tags.is_empty() => tags,
            Ok(_) | Err(_) => {
                log::warn!("interest tags unavailable; using baseline");
                vec![BASELINE_TAG.to_string()]
            }
        };
        let multiplier = multiplier_from_tags(&tags);

        let quota = self.provider.daily_quota(&session);
        if quota.remaining == 0 {
            self.notifier
                .notify(Severity::Error, "Daily limit reached. Come back tomorrow!");
            return Err(InitError::QuotaExhausted {
                used: quota.used,
                limit: quota.limit,
            });
        }

        log::info!(
            "loaded: ammo={ammunition} multiplier={multiplier:.1} plays_remaining={}",
            quota.remaining
        );
        self.state.finish_loading(ammunition, multiplier);
        self.session = Some(session);
        self.surface = Some(surface);
        Ok(())
    }

    /// One scheduled animation frame: consume input, advance the
    /// simulation one tick, dispatch events, draw.
    pub fn frame(&mut self) {
        let input = self.input.take_tick_input();
        tick(&mut self.state, &input);
        self.dispatch_events();
        if let Some(surface) = self.surface.as_mut() {
            draw_frame(surface, &self.state);
        }
    }

    fn dispatch_events(&mut self) {
        let events: Vec<GameEvent> = self.state.events.drain(..).collect();
        for event in events {
            match event {
                GameEvent::Started => {
                    if let Some(session) = &self.session {
                        // Best-effort; a miss must not stop the run
                        if let Err(err) = self.provider.record_session(session) {
                            log::warn!("session recording failed: {err}");
                        }
                    }
                }
                GameEvent::LevelUp { level } => {
                    self.notifier
                        .notify(Severity::Success, &format!("Level {level}!"));
                }
                GameEvent::GameOver { score } => {
                    log::info!("game over with score {score}");
                }
                GameEvent::EnemyDestroyed { awarded } => {
                    log::trace!("enemy down, +{awarded}");
                }
                GameEvent::LifeLost { remaining } => {
                    log::debug!("hit taken, {remaining} lives left");
                }
            }
        }
    }

    /// Synchronous teardown: drop key state and the session reference and
    /// hand the surface back. The instance stays inert afterwards.
    pub fn destroy(&mut self) -> Option<S> {
        self.input.release_all();
        self.session = None;
        self.surface.take()
    }

    /// Router to forward host key events into.
    pub fn input_mut(&mut self) -> &mut InputRouter {
        &mut self.input
    }

    /// True once after Escape was pressed; the host should tear down.
    pub fn quit_requested(&mut self) -> bool {
        self.input.take_quit_request()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn ammunition(&self) -> u32 {
        self.state.ammunition
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn multiplier(&self) -> f32 {
        self.state.multiplier
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Read access to the provider, e.g. for a plays-remaining readout.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
