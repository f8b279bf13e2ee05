//! Guarded interval timer driven by elapsed milliseconds.
//!
//! The timer never reads a clock. The host feeds it elapsed time through
//! [`IntervalTimer::advance`], which keeps it deterministic under test the same
//! way the fixed-timestep game loop is.

use crate::types::{MIN_SPEED_MS, SPEED_BOOST_PER_LEVEL_MS, STARTING_SPEED_MS};

/// Step interval for a level.
///
/// `max(900 - level * 100, 100)`, saturating so large levels clamp instead of
/// wrapping.
///
/// # Examples
///
/// ```
/// use tetris_console_core::step_interval_ms;
///
/// assert_eq!(step_interval_ms(0), 900);
/// assert_eq!(step_interval_ms(3), 600);
/// assert_eq!(step_interval_ms(8), 100);
/// assert_eq!(step_interval_ms(40), 100);
/// ```
pub fn step_interval_ms(level: u32) -> u32 {
    STARTING_SPEED_MS
        .saturating_sub(level.saturating_mul(SPEED_BOOST_PER_LEVEL_MS))
        .max(MIN_SPEED_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    handle: u64,
    interval_ms: u32,
    elapsed_ms: u32,
}

/// A repeating timer with at most one live handle.
///
/// Arming while armed and disarming while disarmed are no-ops.
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    armed: Option<Armed>,
    handles_issued: u64,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm with the given interval. Returns `false` if already armed, in which
    /// case the running interval is left untouched.
    pub fn arm(&mut self, interval_ms: u32) -> bool {
        if self.armed.is_some() {
            return false;
        }
        self.handles_issued += 1;
        self.armed = Some(Armed {
            handle: self.handles_issued,
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        });
        true
    }

    /// Disarm. Returns `false` if nothing was armed.
    pub fn disarm(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Identifier of the live handle, if any.
    pub fn handle(&self) -> Option<u64> {
        self.armed.map(|a| a.handle)
    }

    /// Total number of handles ever issued by this timer.
    pub fn handles_issued(&self) -> u64 {
        self.handles_issued
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.armed.map(|a| a.interval_ms)
    }

    /// Milliseconds until the next fire.
    pub fn remaining_ms(&self) -> Option<u32> {
        self.armed.map(|a| a.interval_ms - a.elapsed_ms)
    }

    /// Advance by `elapsed_ms` and return how many intervals completed.
    ///
    /// A disarmed timer never fires and does not accumulate time.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let Some(armed) = self.armed.as_mut() else {
            return 0;
        };

        let total = armed.elapsed_ms.saturating_add(elapsed_ms);
        let fires = total / armed.interval_ms;
        armed.elapsed_ms = total % armed.interval_ms;
        fires
    }
}
