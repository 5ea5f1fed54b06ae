// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;

use super::*;

const VARS: [&str; 5] = [
    "NI_PUPPET_ALIVE_MS",
    "NI_BACKPRESSURE_BYTES",
    "NI_RENDER_FAST_MS",
    "NI_RENDER_SLOW_MS",
    "NI_LOG",
];

fn clear() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_without_environment() {
    clear();
    assert_eq!(puppet_alive_interval(), Duration::from_secs(1));
    assert_eq!(backpressure_bytes(), 10_000);
    assert_eq!(render_fast_interval(), Duration::from_millis(16));
    assert_eq!(render_slow_interval(), Duration::from_millis(200));
    assert_eq!(log_filter(), "info");
}

#[test]
#[serial]
fn overrides_are_read() {
    clear();
    std::env::set_var("NI_PUPPET_ALIVE_MS", "250");
    std::env::set_var("NI_BACKPRESSURE_BYTES", "64");
    std::env::set_var("NI_LOG", "ni_puppet=debug");
    assert_eq!(puppet_alive_interval(), Duration::from_millis(250));
    assert_eq!(backpressure_bytes(), 64);
    assert_eq!(log_filter(), "ni_puppet=debug");
    clear();
}

#[test]
#[serial]
fn unparsable_values_fall_back_to_defaults() {
    clear();
    std::env::set_var("NI_RENDER_FAST_MS", "soon");
    std::env::set_var("NI_BACKPRESSURE_BYTES", "-1");
    std::env::set_var("NI_LOG", "");
    assert_eq!(render_fast_interval(), Duration::from_millis(16));
    assert_eq!(backpressure_bytes(), 10_000);
    assert_eq!(log_filter(), "info");
    clear();
}
