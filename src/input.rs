//! Keyboard state and control intents
//!
//! Hosts forward raw key-down/key-up events; the router keeps the held-key
//! map and derives the per-tick [`TickInput`]. Movement reads the held map;
//! fire, pause-toggle and start come from key-down edges so they land
//! exactly once per press, with auto-repeat filtered out.

use std::collections::HashMap;

use crate::sim::TickInput;

/// Physical key identity as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    KeyP,
    Enter,
    Escape,
}

#[derive(Debug, Default)]
pub struct InputRouter {
    held: HashMap<Key, bool>,
    pending: TickInput,
    quit: bool,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw key-down. Repeats while a key is held are ignored.
    pub fn key_down(&mut self, key: Key) {
        let was_held = self.held.insert(key, true).unwrap_or(false);
        if was_held {
            return;
        }
        match key {
            Key::Space => self.pending.fire = true,
            Key::KeyP => self.pending.pause = true,
            Key::Enter => self.pending.start = true,
            Key::Escape => self.quit = true,
            Key::ArrowLeft | Key::ArrowRight => {}
        }
    }

    /// Raw key-up.
    pub fn key_up(&mut self, key: Key) {
        self.held.insert(key, false);
    }

    /// Intents for the next tick. Held movement is re-read on every call;
    /// edge intents are consumed.
    pub fn take_tick_input(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.move_left = self.is_held(Key::ArrowLeft);
        input.move_right = self.is_held(Key::ArrowRight);
        input
    }

    /// True once after Escape was pressed.
    pub fn take_quit_request(&mut self) -> bool {
        std::mem::take(&mut self.quit)
    }

    /// Drop all key state. Used at teardown.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.pending = TickInput::default();
        self.quit = false;
    }

    fn is_held(&self, key: Key) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }
}
