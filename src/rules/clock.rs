//! Round countdown.
//!
//! The clock does nothing until the first card is flipped. After that it
//! loses one second per tick until it reaches zero, then stays there.

use serde::{Deserialize, Serialize};

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockTick {
    /// Not started, or already expired. Nothing changed.
    Idle,
    /// Time left after this tick.
    Running(u32),
    /// This tick used up the last second.
    Expired,
}

/// Countdown with one-second resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClock {
    time_limit: u32,
    time_remaining: u32,
    started: bool,
}

impl SessionClock {
    /// A stopped clock showing the full `time_limit`.
    #[must_use]
    pub fn new(time_limit: u32) -> Self {
        Self {
            time_limit,
            time_remaining: time_limit,
            started: false,
        }
    }

    /// Start counting. Returns true only on the call that actually started
    /// the clock.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    /// Take one second off a running clock.
    pub fn tick(&mut self) -> ClockTick {
        if !self.started || self.time_remaining == 0 {
            return ClockTick::Idle;
        }

        self.time_remaining -= 1;
        if self.time_remaining == 0 {
            ClockTick::Expired
        } else {
            ClockTick::Running(self.time_remaining)
        }
    }

    /// The limit this clock started from, in seconds.
    #[must_use]
    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    /// Seconds left.
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Has counting begun?
    #[must_use]
    pub fn started(&self) -> bool {
        self.started
    }
}
