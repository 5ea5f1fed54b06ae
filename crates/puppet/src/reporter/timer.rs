// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render timer with a fast and a slow cadence.

use std::time::{Duration, Instant};

use ni_core::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Fast,
    Slow,
}

ni_core::simple_display! {
    TimerMode {
        Fast => "fast",
        Slow => "slow",
    }
}

/// Decides when the next processing pass is due.
#[derive(Debug)]
pub struct RenderTimer<C: Clock> {
    clock: C,
    fast: Duration,
    slow: Duration,
    mode: TimerMode,
    armed_at: Instant,
    /// Delay after `armed_at` until the next pass is due.
    wait: Duration,
}

impl<C: Clock> RenderTimer<C> {
    /// Starts in slow mode with the first pass due immediately.
    pub fn new(clock: C, fast: Duration, slow: Duration) -> Self {
        let armed_at = clock.now();
        Self { clock, fast, slow, mode: TimerMode::Slow, armed_at, wait: Duration::ZERO }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn interval(&self) -> Duration {
        match self.mode {
            TimerMode::Fast => self.fast,
            TimerMode::Slow => self.slow,
        }
    }

    /// A pass did work: poll again soon.
    pub fn busy(&mut self) {
        self.rearm(TimerMode::Fast);
    }

    /// A pass found nothing to send: back off.
    pub fn idle(&mut self) {
        self.rearm(TimerMode::Slow);
    }

    /// New input arrived: switch to fast mode without pushing back a closer deadline.
    pub fn wake(&mut self) {
        self.mode = TimerMode::Fast;
        if self.fast < self.remaining() {
            self.armed_at = self.clock.now();
            self.wait = self.fast;
        }
    }

    /// Re-arm in the current mode, e.g. after a skipped pass.
    pub fn restart(&mut self) {
        self.rearm(self.mode);
    }

    pub fn is_due(&self) -> bool {
        self.clock.since(self.armed_at) >= self.wait
    }

    /// Time left until the next pass, zero when already due.
    pub fn remaining(&self) -> Duration {
        self.wait.saturating_sub(self.clock.since(self.armed_at))
    }

    fn rearm(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.armed_at = self.clock.now();
        self.wait = self.interval();
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
