//! Hidden admin reveal: repeated taps on the logo open the login prompt.
//!
//! The gate is a two-state machine driven by a single deadline:
//!
//! ```text
//! Idle --tap--> Counting{1, now+window} --tap--> Counting{2, now+window} --tap--> Idle (reveal)
//!   ^                      |                               |
//!   +------- deadline -----+---------------- deadline -----+
//! ```
//!
//! Every tap restarts the window, so the taps must each follow the previous
//! one within the window.

use std::time::Duration;
use tokio::time::Instant;

use promptbank_core::defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Counting { count: u32, deadline: Instant },
}

/// Result of a single tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Still counting; carries the taps seen so far.
    Counting(u32),
    /// Threshold reached: open the login prompt.
    Reveal,
}

#[derive(Debug, Clone)]
pub struct AdminGate {
    state: GateState,
    threshold: u32,
    window: Duration,
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new(
            defaults::ADMIN_GESTURE_COUNT,
            Duration::from_millis(defaults::ADMIN_GESTURE_WINDOW_MS),
        )
    }
}

impl AdminGate {
    pub fn new(threshold: u32, window: Duration) -> Self {
        Self {
            state: GateState::Idle,
            threshold: threshold.max(1),
            window,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Taps counted in the current burst.
    pub fn count(&self) -> u32 {
        match self.state {
            GateState::Idle => 0,
            GateState::Counting { count, .. } => count,
        }
    }

    /// Register a tap at `now`.
    pub fn tap(&mut self, now: Instant) -> GateOutcome {
        // A burst whose deadline already passed is over even if no tick
        // arrived in between.
        self.tick(now);

        let count = self.count() + 1;
        if count >= self.threshold {
            self.state = GateState::Idle;
            return GateOutcome::Reveal;
        }
        self.state = GateState::Counting {
            count,
            deadline: now + self.window,
        };
        GateOutcome::Counting(count)
    }

    /// Expire the burst when its deadline has passed. Returns true when the
    /// gate went back to idle.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            GateState::Counting { deadline, .. } if now >= deadline => {
                self.state = GateState::Idle;
                true
            }
            _ => false,
        }
    }
}
