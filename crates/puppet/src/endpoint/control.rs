// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference stream of expected outgoing commands for captured replays.

use std::path::Path;

use bytes::BytesMut;
use ni_wire::{Command, DecodeOutcome, FrameDecoder};
use tracing::{error, warn};

use super::{ChannelRole, ConnectionFault};

/// Expected output of a replay, consumed one command per send.
pub struct ControlStream {
    buffer: BytesMut,
    decoder: FrameDecoder,
}

impl ControlStream {
    pub fn new(bytes: &[u8]) -> Self {
        Self { buffer: BytesMut::from(bytes), decoder: FrameDecoder::new() }
    }

    pub fn open(path: &Path) -> Result<Self, ConnectionFault> {
        let bytes = std::fs::read(path).map_err(|source| ConnectionFault::ChannelOpen {
            role: ChannelRole::Control,
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(&bytes))
    }

    /// Next expected command, or `None` once the stream is exhausted.
    pub fn next_command(&mut self) -> Result<Option<Command>, ConnectionFault> {
        match self.decoder.try_decode_frame(&mut self.buffer) {
            DecodeOutcome::Incomplete => Ok(None),
            DecodeOutcome::Decoded { frame, anomaly } => {
                if anomaly {
                    warn!(sequence = frame.sequence, "control command counter is out of sequence");
                }
                Ok(Some(frame.command))
            }
            DecodeOutcome::Corrupt(e) => Err(e.into()),
        }
    }

    /// Compare a sent command against the next expected one.
    pub fn check(&mut self, sent: &Command) -> Result<(), ConnectionFault> {
        let expected = match self.next_command()? {
            Some(expected) if expected == *sent => return Ok(()),
            Some(expected) => format!("{:?}", expected),
            None => "<end of control stream>".to_string(),
        };
        let sent = format!("{:?}", sent);
        error!(%sent, %expected, "outgoing command differs from control stream");
        Err(ConnectionFault::ConformanceMismatch { sent, expected })
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }
}
