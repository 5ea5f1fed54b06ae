// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replaying captured command streams

use similar_asserts::assert_eq;

use crate::prelude::*;

#[test]
fn replay_records_coalesced_changes() {
    let capture = Capture::new();
    let input = capture.write("in.bin", &[scene(), sync(4), set_value(1, "x", 12.0), end()]);

    cli()
        .args(&["--read-captured-stream"])
        .arg_path(&input)
        .arg_path(&capture.path("out.bin"))
        .passes()
        .stderr_has("end requested");

    let sent = capture.read("out.bin");
    let kinds: Vec<CommandKind> = sent.iter().map(Command::kind).collect();
    assert_eq!(kinds.first(), Some(&CommandKind::InformationChanged));
    assert!(kinds.contains(&CommandKind::ChildrenChanged), "sent: {kinds:?}");
    assert!(kinds.contains(&CommandKind::ComponentCompleted), "sent: {kinds:?}");
    assert_eq!(sent.last(), Some(&sync(4)));
}

#[test]
fn replay_ends_when_input_runs_out() {
    let capture = Capture::new();
    let input = capture.write("in.bin", &[create(&[0])]);

    cli()
        .args(&["--read-captured-stream"])
        .arg_path(&input)
        .arg_path(&capture.path("out.bin"))
        .passes()
        .stderr_has("input exhausted");

    let kinds: Vec<CommandKind> = capture.read("out.bin").iter().map(Command::kind).collect();
    assert_eq!(kinds, vec![CommandKind::InformationChanged]);
}

#[test]
fn replay_ignores_commands_after_end_process() {
    let capture = Capture::new();
    let input = capture.write("in.bin", &[end(), create(&[0])]);

    cli().args(&["--read-captured-stream"]).arg_path(&input).arg_path(&capture.path("out.bin")).passes();

    assert!(capture.read("out.bin").is_empty());
}

#[test]
fn sequence_gap_does_not_stop_replay() {
    let capture = Capture::new();
    let mut bytes = ni_wire::encode_frame(0, &create(&[0])).unwrap().to_vec();
    bytes.extend_from_slice(&ni_wire::encode_frame(9, &set_value(0, "x", 3.0)).unwrap());
    bytes.extend_from_slice(&ni_wire::encode_frame(10, &sync(2)).unwrap());
    bytes.extend_from_slice(&ni_wire::encode_frame(11, &set_value(0, "y", 5.0)).unwrap());
    let input = capture.path("in.bin");
    std::fs::write(&input, bytes).unwrap();

    cli()
        .args(&["--read-captured-stream"])
        .arg_path(&input)
        .arg_path(&capture.path("out.bin"))
        .passes()
        .stderr_has("out of sequence");

    assert_eq!(capture.read("out.bin").last(), Some(&sync(2)));
}

#[test]
fn missing_input_fails() {
    let capture = Capture::new();
    cli()
        .args(&["--read-captured-stream"])
        .arg_path(&capture.path("absent.bin"))
        .fails()
        .stderr_has("cannot open input stream");
}

#[test]
fn unknown_command_tag_fails() {
    let capture = Capture::new();
    let mut bytes = ni_wire::encode_frame(0, &create(&[0])).unwrap().to_vec();
    // First byte of the tag.
    bytes[12] = b'#';
    let input = capture.path("in.bin");
    std::fs::write(&input, bytes).unwrap();

    cli().args(&["--read-captured-stream"]).arg_path(&input).fails().stderr_has("unknown command tag");
}
