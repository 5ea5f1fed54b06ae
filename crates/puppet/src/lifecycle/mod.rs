// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Puppet lifecycle: configuration and channel startup.

mod startup;

pub use startup::{startup, Connection};

use std::path::PathBuf;
use std::time::Duration;

use crate::env;

/// Where commands come from and where output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Connect to the IDE's local socket.
    Live { endpoint: String },
    /// Replay a recorded command stream.
    Captured {
        input: PathBuf,
        /// Record outgoing commands here.
        output: Option<PathBuf>,
        /// Compare outgoing commands against this recording instead.
        control: Option<PathBuf>,
    },
}

/// Puppet configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// Heartbeat interval in live mode
    pub puppet_alive: Duration,
    /// Unwritten output at which processing passes are skipped
    pub backpressure_bytes: usize,
    pub render_fast: Duration,
    pub render_slow: Duration,
}

impl Config {
    /// Combine a mode with environment overrides.
    pub fn load(mode: Mode) -> Self {
        Self {
            mode,
            puppet_alive: env::puppet_alive_interval(),
            backpressure_bytes: env::backpressure_bytes(),
            render_fast: env::render_fast_interval(),
            render_slow: env::render_slow_interval(),
        }
    }

    ni_core::setters! {
        set {
            puppet_alive: Duration,
            backpressure_bytes: usize,
            render_fast: Duration,
            render_slow: Duration,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
