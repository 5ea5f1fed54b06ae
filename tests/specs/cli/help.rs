// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line surface specs

use crate::prelude::*;

#[test]
fn help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("--read-captured-stream");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn endpoint_is_required() {
    cli().fails().stderr_has("<ENDPOINT>");
}

#[test]
fn control_requires_captured_mode() {
    cli().args(&["ide-socket", "--control", "expected.bin"]).fails().stderr_has("--read-captured-stream");
}

#[test]
fn output_requires_captured_mode() {
    cli().args(&["ide-socket", "out.bin"]).fails().stderr_has("--read-captured-stream");
}

#[test]
fn output_and_control_conflict() {
    cli()
        .args(&["--read-captured-stream", "in.bin", "out.bin", "--control", "expected.bin"])
        .fails()
        .stderr_has("cannot be used with");
}

#[test]
fn live_mode_fails_without_ide() {
    let capture = Capture::new();
    cli().arg_path(&capture.path("ide.sock")).fails().stderr_has("cannot connect");
}
