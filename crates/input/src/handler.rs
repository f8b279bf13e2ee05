//! Key release emulation for terminal environments.
//!
//! Most terminals only report presses (plus auto-repeated presses while a key
//! is held). The tracker treats a key as released once it has gone quiet for
//! the timeout, and steps aside as soon as the terminal proves it reports real
//! releases.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::types::{InputEvent, Key};

/// Long enough to bridge the typical initial auto-repeat delay.
pub const DEFAULT_RELEASE_TIMEOUT_MS: u32 = 500;

pub const MAX_HELD_KEYS: usize = Key::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Held {
    key: Key,
    idle_ms: u32,
}

/// Tracks held keys and synthesizes key-ups on timeout.
#[derive(Debug, Clone)]
pub struct ReleaseTracker {
    held: ArrayVec<Held, MAX_HELD_KEYS>,
    timeout_ms: u32,
    native_release: bool,
}

impl ReleaseTracker {
    pub fn new() -> Self {
        Self::with_timeout_ms(DEFAULT_RELEASE_TIMEOUT_MS)
    }

    pub fn with_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            held: ArrayVec::new(),
            timeout_ms: timeout_ms.max(1),
            native_release: false,
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Whether a real release event has been observed.
    pub fn native_release(&self) -> bool {
        self.native_release
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|h| h.key == key)
    }

    /// Record an event coming from the terminal.
    pub fn observe(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                if let Some(h) = self.held.iter_mut().find(|h| h.key == key) {
                    h.idle_ms = 0;
                } else {
                    let _ = self.held.try_push(Held { key, idle_ms: 0 });
                }
            }
            InputEvent::KeyUp(key) => {
                if !self.native_release {
                    debug!("terminal reports key releases");
                    self.native_release = true;
                }
                self.held.retain(|h| h.key != key);
            }
        }
    }

    /// Advance the idle clocks and return the key-ups that timed out.
    ///
    /// Always empty once the terminal has reported a real release.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<InputEvent, MAX_HELD_KEYS> {
        let mut released = ArrayVec::new();
        if self.native_release {
            return released;
        }

        for h in self.held.iter_mut() {
            h.idle_ms = h.idle_ms.saturating_add(elapsed_ms);
            if h.idle_ms >= self.timeout_ms {
                released.push(InputEvent::KeyUp(h.key));
            }
        }
        let timeout = self.timeout_ms;
        self.held.retain(|h| h.idle_ms < timeout);
        released
    }

    /// Time until the next synthesized key-up, if any key is held.
    pub fn remaining_ms(&self) -> Option<u32> {
        if self.native_release {
            return None;
        }
        self.held
            .iter()
            .map(|h| self.timeout_ms.saturating_sub(h.idle_ms))
            .min()
    }

    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for ReleaseTracker {
    fn default() -> Self {
        Self::new()
    }
}
