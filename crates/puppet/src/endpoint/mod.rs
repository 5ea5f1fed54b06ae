// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport endpoint: frames commands onto a live connection or a captured
//! stream and decodes incoming bytes back into commands.
//!
//! A live endpoint never touches the socket itself. The driver feeds it the
//! bytes it reads and drains [`Endpoint::pending_output`] as the socket becomes
//! writable, so the endpoint stays synchronous and testable.

mod client;
mod control;

pub use control::ControlStream;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bytes::{Buf, BytesMut};
use ni_wire::{Command, DecodeOutcome, FrameDecoder, FrameEncoder, ProtocolError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Which stream of a captured session an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRole {
    Input,
    Output,
    Control,
}

ni_core::simple_display! {
    ChannelRole {
        Input => "input",
        Output => "output",
        Control => "control",
    }
}

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum ConnectionFault {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("outgoing command does not match control stream: sent {sent}, expected {expected}")]
    ConformanceMismatch { sent: String, expected: String },

    #[error("cannot open {role} stream {}: {source}", path.display())]
    ChannelOpen {
        role: ChannelRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot connect to {name}: {source}")]
    Connect {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {role} stream: {source}")]
    Io {
        role: ChannelRole,
        #[source]
        source: io::Error,
    },
}

enum Channel {
    Live {
        outgoing: BytesMut,
    },
    Captured {
        output: Option<BufWriter<File>>,
        control: Option<ControlStream>,
    },
}

/// One end of a node-instance connection.
pub struct Endpoint {
    channel: Channel,
    encoder: FrameEncoder,
    decoder: FrameDecoder,
    inbound: BytesMut,
    anomalies: u64,
    sent: u64,
}

impl Endpoint {
    fn with_channel(channel: Channel) -> Self {
        Self {
            channel,
            encoder: FrameEncoder::new(),
            decoder: FrameDecoder::new(),
            inbound: BytesMut::new(),
            anomalies: 0,
            sent: 0,
        }
    }

    /// Endpoint for a live socket driven by the caller.
    pub fn live() -> Self {
        Self::with_channel(Channel::Live { outgoing: BytesMut::new() })
    }

    /// Endpoint replaying an in-memory captured input.
    ///
    /// Outgoing commands are compared against `control` when given, otherwise
    /// written to `output` when given, otherwise discarded.
    pub fn captured(input: &[u8], output: Option<File>, control: Option<ControlStream>) -> Self {
        let mut endpoint = Self::with_channel(Channel::Captured {
            output: output.map(BufWriter::new),
            control,
        });
        endpoint.feed(input);
        endpoint
    }

    /// Open the files of a captured session. Any failure is fatal at startup.
    pub fn open_captured(
        input: &Path,
        output: Option<&Path>,
        control: Option<&Path>,
    ) -> Result<Self, ConnectionFault> {
        let bytes = std::fs::read(input).map_err(|source| ConnectionFault::ChannelOpen {
            role: ChannelRole::Input,
            path: input.to_path_buf(),
            source,
        })?;
        let output = output
            .map(|path| {
                File::create(path).map_err(|source| ConnectionFault::ChannelOpen {
                    role: ChannelRole::Output,
                    path: path.to_path_buf(),
                    source,
                })
            })
            .transpose()?;
        let control = control.map(ControlStream::open).transpose()?;
        info!(input = %input.display(), bytes = bytes.len(), "opened captured input");
        Ok(Self::captured(&bytes, output, control))
    }

    /// Append bytes received from the peer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.inbound.extend_from_slice(bytes);
    }

    /// Decode every complete command buffered so far, in arrival order.
    ///
    /// Sequence anomalies are logged and counted; the command is still
    /// delivered. A corrupt block ends the session.
    pub fn poll_incoming(&mut self) -> Result<Vec<Command>, ConnectionFault> {
        let mut commands = Vec::new();
        loop {
            match self.decoder.try_decode_frame(&mut self.inbound) {
                DecodeOutcome::Incomplete => return Ok(commands),
                DecodeOutcome::Decoded { frame, anomaly } => {
                    if anomaly {
                        self.anomalies += 1;
                        warn!(
                            sequence = frame.sequence,
                            command = frame.command.kind().name(),
                            "incoming command counter is out of sequence"
                        );
                    }
                    commands.push(frame.command);
                }
                DecodeOutcome::Corrupt(e) => {
                    self.inbound.clear();
                    return Err(e.into());
                }
            }
        }
    }

    /// Frame `command` and hand it to the outgoing channel.
    pub fn send(&mut self, command: &Command) -> Result<(), ConnectionFault> {
        let block = self.encoder.encode(command)?;
        self.sent += 1;
        match &mut self.channel {
            Channel::Live { outgoing } => outgoing.extend_from_slice(&block),
            Channel::Captured { control: Some(control), .. } => control.check(command)?,
            Channel::Captured { output: Some(output), .. } => output
                .write_all(&block)
                .map_err(|source| ConnectionFault::Io { role: ChannelRole::Output, source })?,
            Channel::Captured { .. } => {}
        }
        Ok(())
    }

    /// Flush the captured output file. Live output is drained by the driver.
    pub fn flush(&mut self) -> Result<(), ConnectionFault> {
        if let Channel::Captured { output: Some(output), .. } = &mut self.channel {
            output.flush().map_err(|source| ConnectionFault::Io { role: ChannelRole::Output, source })?;
        }
        Ok(())
    }

    /// Outgoing bytes accepted by the endpoint but not yet written.
    pub fn bytes_to_write(&self) -> usize {
        match &self.channel {
            Channel::Live { outgoing } => outgoing.len(),
            Channel::Captured { output: Some(output), .. } => output.buffer().len(),
            Channel::Captured { .. } => 0,
        }
    }

    /// Bytes waiting for the live socket to accept them.
    pub fn pending_output(&self) -> &[u8] {
        match &self.channel {
            Channel::Live { outgoing } => &outgoing[..],
            Channel::Captured { .. } => &[],
        }
    }

    /// Drop the first `written` pending bytes after a successful socket write.
    pub fn advance_written(&mut self, written: usize) {
        if let Channel::Live { outgoing } = &mut self.channel {
            outgoing.advance(written.min(outgoing.len()));
        }
    }

    /// Bytes received but not yet forming a complete frame.
    pub fn buffered_input(&self) -> usize {
        self.inbound.len()
    }

    /// Count of incoming frames whose sequence number was unexpected.
    pub fn anomalies(&self) -> u64 {
        self.anomalies
    }

    pub fn commands_sent(&self) -> u64 {
        self.sent
    }

    /// Close output, then input, then control.
    pub fn close(&mut self) -> Result<(), ConnectionFault> {
        let result = self.flush();
        if let Channel::Captured { output, control } = &mut self.channel {
            output.take();
            if !self.inbound.is_empty() {
                warn!(bytes = self.inbound.len(), "discarding incomplete trailing input");
            }
            self.inbound.clear();
            if let Some(control) = control.take() {
                if control.remaining() > 0 {
                    warn!(bytes = control.remaining(), "control stream not fully consumed");
                }
            }
        } else {
            self.inbound.clear();
        }
        debug!(sent = self.sent, anomalies = self.anomalies, "endpoint closed");
        result
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
