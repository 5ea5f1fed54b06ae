// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use tempfile::tempdir;
use tokio::net::UnixListener;

use super::*;
use crate::endpoint::ChannelRole;

fn live(endpoint: &str) -> Config {
    Config::load(Mode::Live { endpoint: endpoint.to_string() })
        .puppet_alive(Duration::from_millis(50))
}

#[tokio::test]
async fn live_startup_connects_to_socket() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ide.sock");
    let listener = UnixListener::bind(&path).unwrap();

    let config = live(path.to_str().unwrap());
    let connection = startup(&config).await.unwrap();
    assert!(matches!(connection, Connection::Live(_)));
    listener.accept().await.unwrap();
}

#[tokio::test]
async fn live_startup_fails_without_listener() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.sock");
    let config = live(path.to_str().unwrap());

    match startup(&config).await {
        Err(ConnectionFault::Connect { name, .. }) => assert!(name.ends_with("missing.sock")),
        Err(e) => panic!("expected Connect, got: {e}"),
        Ok(_) => panic!("expected Connect, but startup succeeded"),
    }
}

#[tokio::test]
async fn captured_startup_opens_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.bin");
    std::fs::write(&input, b"").unwrap();

    let config = Config::load(Mode::Captured { input, output: None, control: None });
    let connection = startup(&config).await.unwrap();
    assert!(matches!(connection, Connection::Captured(_)));
}

#[tokio::test]
async fn captured_startup_creates_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.bin");
    let output = dir.path().join("output.bin");
    std::fs::write(&input, b"").unwrap();

    let config =
        Config::load(Mode::Captured { input, output: Some(output.clone()), control: None });
    startup(&config).await.unwrap();
    assert!(output.exists());
}

#[tokio::test]
async fn captured_startup_fails_on_missing_input() {
    let dir = tempdir().unwrap();
    let config = Config::load(Mode::Captured {
        input: dir.path().join("nope.bin"),
        output: None,
        control: None,
    });

    match startup(&config).await {
        Err(ConnectionFault::ChannelOpen { role: ChannelRole::Input, .. }) => {}
        Err(e) => panic!("expected ChannelOpen, got: {e}"),
        Ok(_) => panic!("expected ChannelOpen, but startup succeeded"),
    }
}
