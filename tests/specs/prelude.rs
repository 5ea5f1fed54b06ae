// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for launching the puppet and building captured streams.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use bytes::BytesMut;
use tempfile::TempDir;

pub use ni_core::InstanceId;
pub use ni_wire::{
    ChangeValuesCommand, Command, CommandKind, CreateInstancesCommand, CreateSceneCommand,
    EndPuppetCommand, InstanceContainer, PropertyValueContainer, PuppetAliveCommand,
    ReparentContainer, SynchronizeCommand,
};
use ni_wire::{DecodeOutcome, FrameDecoder, FrameEncoder};

/// Start building a puppet invocation.
pub fn cli() -> CliBuilder {
    CliBuilder { args: Vec::new() }
}

pub struct CliBuilder {
    args: Vec<String>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.display().to_string());
        self
    }

    fn run(&self) -> Output {
        let mut cmd = assert_cmd::Command::cargo_bin("ni-puppet").unwrap();
        cmd.args(&self.args).env("NI_LOG", "info").timeout(Duration::from_secs(10));
        cmd.output().unwrap()
    }

    /// Run and assert a zero exit status.
    pub fn passes(self) -> RunAssert {
        let output = self.run();
        let run = RunAssert { output };
        assert!(run.output.status.success(), "expected success\nstderr:\n{}", run.stderr());
        run
    }

    /// Run and assert a non-zero exit status.
    pub fn fails(self) -> RunAssert {
        let output = self.run();
        let run = RunAssert { output };
        assert!(!run.output.status.success(), "expected failure\nstderr:\n{}", run.stderr());
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout missing {expected:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr missing {expected:?}:\n{stderr}");
        self
    }
}

/// A temporary directory holding captured command streams.
pub struct Capture {
    dir: TempDir,
}

impl Capture {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `commands` as a framed stream and return its path.
    pub fn write(&self, name: &str, commands: &[Command]) -> PathBuf {
        let mut encoder = FrameEncoder::new();
        let mut bytes = Vec::new();
        for command in commands {
            bytes.extend_from_slice(&encoder.encode(command).unwrap());
        }
        let path = self.path(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Decode every command in the stream `name`.
    pub fn read(&self, name: &str) -> Vec<Command> {
        let mut buf = BytesMut::from(&std::fs::read(self.path(name)).unwrap()[..]);
        let mut decoder = FrameDecoder::new();
        let mut commands = Vec::new();
        loop {
            match decoder.try_decode_frame(&mut buf) {
                DecodeOutcome::Decoded { frame, .. } => commands.push(frame.command),
                DecodeOutcome::Incomplete => return commands,
                DecodeOutcome::Corrupt(e) => panic!("corrupt stream {name}: {e}"),
            }
        }
    }
}

pub fn instance(id: i32, type_name: &str) -> InstanceContainer {
    InstanceContainer { instance_id: InstanceId(id), type_name: type_name.into(), ..Default::default() }
}

pub fn create(ids: &[i32]) -> Command {
    CreateInstancesCommand { instances: ids.iter().map(|&id| instance(id, "QtQuick.Item")).collect() }
        .into()
}

/// Root item 0 with one rectangle child 1.
pub fn scene() -> Command {
    CreateSceneCommand {
        instances: vec![instance(0, "QtQuick.Item"), instance(1, "QtQuick.Rectangle")],
        reparent_instances: vec![ReparentContainer {
            instance_id: InstanceId(1),
            old_parent_instance_id: None,
            old_parent_property: String::new(),
            new_parent_instance_id: Some(InstanceId(0)),
            new_parent_property: "data".into(),
        }],
        file_url: "file:///main.qml".into(),
        ..Default::default()
    }
    .into()
}

pub fn set_value(id: i32, name: &str, value: f64) -> Command {
    ChangeValuesCommand {
        value_changes: vec![PropertyValueContainer::new(InstanceId(id), name, value.into())],
    }
    .into()
}

pub fn sync(id: i32) -> Command {
    SynchronizeCommand { synchronize_id: id }.into()
}

pub fn end() -> Command {
    EndPuppetCommand {}.into()
}
