// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conformance checking against a control stream

use crate::prelude::*;

#[test]
fn recorded_output_is_a_matching_control() {
    let capture = Capture::new();
    let input = capture.write("in.bin", &[scene(), sync(1), set_value(1, "width", 40.0), end()]);

    cli().args(&["--read-captured-stream"]).arg_path(&input).arg_path(&capture.path("recorded.bin")).passes();

    cli()
        .args(&["--read-captured-stream"])
        .arg_path(&input)
        .args(&["--control"])
        .arg_path(&capture.path("recorded.bin"))
        .passes();
}

#[test]
fn mismatch_fails_and_logs_both_commands() {
    let capture = Capture::new();
    let input = capture.write("in.bin", &[create(&[0])]);
    let control = capture.write("control.bin", &[PuppetAliveCommand {}.into()]);

    cli()
        .args(&["--read-captured-stream"])
        .arg_path(&input)
        .args(&["--control"])
        .arg_path(&control)
        .fails()
        .stderr_has("InformationChanged")
        .stderr_has("PuppetAlive");
}

#[test]
fn extra_output_beyond_control_fails() {
    let capture = Capture::new();
    let input = capture.write("in.bin", &[create(&[0])]);
    let control = capture.write("control.bin", &[]);

    cli()
        .args(&["--read-captured-stream"])
        .arg_path(&input)
        .args(&["--control"])
        .arg_path(&control)
        .fails()
        .stderr_has("end of control stream");
}

#[test]
fn missing_control_fails() {
    let capture = Capture::new();
    let input = capture.write("in.bin", &[create(&[0])]);

    cli()
        .args(&["--read-captured-stream"])
        .arg_path(&input)
        .args(&["--control"])
        .arg_path(&capture.path("absent.bin"))
        .fails()
        .stderr_has("cannot open control stream");
}
