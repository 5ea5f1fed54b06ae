// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;

use super::*;

fn clear_env() {
    for key in ["NI_PUPPET_ALIVE_MS", "NI_BACKPRESSURE_BYTES", "NI_RENDER_FAST_MS", "NI_RENDER_SLOW_MS"]
    {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn load_uses_defaults() {
    clear_env();
    let config = Config::load(Mode::Live { endpoint: "ide".to_string() });
    assert_eq!(config.puppet_alive, Duration::from_secs(1));
    assert_eq!(config.backpressure_bytes, 10_000);
    assert_eq!(config.render_fast, Duration::from_millis(16));
    assert_eq!(config.render_slow, Duration::from_millis(200));
}

#[test]
#[serial]
fn load_reads_environment() {
    clear_env();
    std::env::set_var("NI_BACKPRESSURE_BYTES", "512");
    std::env::set_var("NI_PUPPET_ALIVE_MS", "250");
    let config = Config::load(Mode::Live { endpoint: "ide".to_string() });
    clear_env();

    assert_eq!(config.backpressure_bytes, 512);
    assert_eq!(config.puppet_alive, Duration::from_millis(250));
}

#[test]
#[serial]
fn setters_override_loaded_values() {
    clear_env();
    let mode = Mode::Captured { input: PathBuf::from("in.bin"), output: None, control: None };
    let config = Config::load(mode.clone())
        .backpressure_bytes(1)
        .render_fast(Duration::from_millis(1))
        .render_slow(Duration::from_millis(2));

    assert_eq!(config.mode, mode);
    assert_eq!(config.backpressure_bytes, 1);
    assert_eq!(config.render_fast, Duration::from_millis(1));
    assert_eq!(config.render_slow, Duration::from_millis(2));
}
