// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the puppet crate.

use std::time::Duration;

fn millis(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Heartbeat interval while connected to a live peer (default 1s).
pub fn puppet_alive_interval() -> Duration {
    millis("NI_PUPPET_ALIVE_MS").unwrap_or(Duration::from_secs(1))
}

/// Pending outgoing bytes at which a processing pass is skipped (default 10000).
pub fn backpressure_bytes() -> usize {
    std::env::var("NI_BACKPRESSURE_BYTES")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
}

/// Render timer interval while the scene is changing (default 16ms).
pub fn render_fast_interval() -> Duration {
    millis("NI_RENDER_FAST_MS").unwrap_or(Duration::from_millis(16))
}

/// Render timer interval once the scene has settled (default 200ms).
pub fn render_slow_interval() -> Duration {
    millis("NI_RENDER_SLOW_MS").unwrap_or(Duration::from_millis(200))
}

/// Tracing filter directive: NI_LOG > "info"
pub fn log_filter() -> String {
    std::env::var("NI_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "info".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
