// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame codec.
//!
//! Wire block, all integers in host byte order:
//!
//! ```text
//! [u32 length][u32 sequence][u32 tag_len][tag bytes][payload bytes]
//! ```
//!
//! `length` counts everything after itself. The payload is the JSON encoding of
//! the command's payload struct.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

use crate::command::{Command, CommandKind};

/// Size of the length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Sequence number plus tag length: the smallest well-formed block.
const BLOCK_HEADER_LEN: usize = 8;

/// Largest block accepted before its bytes have even arrived.
pub const MAX_BLOCK_LEN: u32 = 64 * 1024 * 1024;

/// Errors produced while encoding or decoding frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("block of {0} bytes is shorter than its header")]
    Truncated(usize),

    #[error("block length {0} exceeds the {MAX_BLOCK_LEN} byte limit")]
    Oversized(u32),

    #[error("command tag is not valid UTF-8")]
    InvalidTag,

    #[error("unknown command tag {0:?}")]
    UnknownTag(String),

    #[error("malformed {tag} payload: {source}")]
    Payload {
        tag: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {tag}: {source}")]
    Encode {
        tag: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("frame of {0} bytes does not fit the length prefix")]
    FrameTooLarge(usize),
}

/// A decoded command together with the sequence number it was sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub sequence: u32,
    pub command: Command,
}

/// Result of one decode attempt.
#[derive(Debug)]
pub enum DecodeOutcome {
    /// Not enough bytes buffered; nothing was consumed.
    Incomplete,
    /// One block was consumed. `anomaly` is set when the sequence number was not
    /// the expected one.
    Decoded { frame: Frame, anomaly: bool },
    /// The block was consumed but cannot be interpreted. Fatal for the stream.
    Corrupt(ProtocolError),
}

/// Encode one command into a complete wire block.
pub fn encode_frame(sequence: u32, command: &Command) -> Result<Bytes, ProtocolError> {
    let tag = command.kind().name();
    let payload = command.encode_payload().map_err(|source| ProtocolError::Encode { tag, source })?;

    let mut block =
        BytesMut::with_capacity(LENGTH_PREFIX_LEN + BLOCK_HEADER_LEN + tag.len() + payload.len());
    block.put_u32_ne(0);
    block.put_u32_ne(sequence);
    block.put_u32_ne(tag.len() as u32);
    block.put_slice(tag.as_bytes());
    block.put_slice(&payload);

    let length = u32::try_from(block.len() - LENGTH_PREFIX_LEN)
        .map_err(|_| ProtocolError::FrameTooLarge(block.len()))?;
    block[..LENGTH_PREFIX_LEN].copy_from_slice(&length.to_ne_bytes());
    Ok(block.freeze())
}

/// Outgoing side of one direction: numbers frames from zero.
#[derive(Debug, Default)]
pub struct FrameEncoder {
    next_sequence: u32,
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(&mut self, command: &Command) -> Result<Bytes, ProtocolError> {
        let block = encode_frame(self.next_sequence, command)?;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        Ok(block)
    }

    pub fn next_sequence(&self) -> u32 {
        self.next_sequence
    }
}

/// Incoming side of one direction.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    expected_next_sequence: u32,
    /// Length prefix already validated for the block at the head of the buffer.
    pending_block_length: Option<u32>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expected_next_sequence(&self) -> u32 {
        self.expected_next_sequence
    }

    /// Try to take one block off the front of `buffer`.
    ///
    /// On `Incomplete` the buffer is untouched, so the call can be repeated once
    /// more bytes have been appended.
    pub fn try_decode_frame(&mut self, buffer: &mut BytesMut) -> DecodeOutcome {
        let length = match self.pending_block_length {
            Some(length) => length,
            None => {
                if buffer.len() < LENGTH_PREFIX_LEN {
                    return DecodeOutcome::Incomplete;
                }
                let length = (&buffer[..LENGTH_PREFIX_LEN]).get_u32_ne();
                if length > MAX_BLOCK_LEN {
                    buffer.clear();
                    return DecodeOutcome::Corrupt(ProtocolError::Oversized(length));
                }
                self.pending_block_length = Some(length);
                length
            }
        };

        let length = length as usize;
        if buffer.len() < LENGTH_PREFIX_LEN + length {
            return DecodeOutcome::Incomplete;
        }

        self.pending_block_length = None;
        buffer.advance(LENGTH_PREFIX_LEN);
        let block = buffer.split_to(length);

        match parse_block(block) {
            Ok(frame) => {
                let sequence = frame.sequence;
                let anomaly = !(sequence == 0 && self.expected_next_sequence == 0)
                    && sequence != self.expected_next_sequence;
                self.expected_next_sequence = sequence.wrapping_add(1);
                DecodeOutcome::Decoded { frame, anomaly }
            }
            Err(e) => DecodeOutcome::Corrupt(e),
        }
    }

    /// Decode every complete block in `buffer`, leaving any partial tail in place.
    pub fn decode_all(&mut self, buffer: &mut BytesMut) -> Result<Vec<(Frame, bool)>, ProtocolError> {
        let mut frames = Vec::new();
        loop {
            match self.try_decode_frame(buffer) {
                DecodeOutcome::Incomplete => return Ok(frames),
                DecodeOutcome::Decoded { frame, anomaly } => frames.push((frame, anomaly)),
                DecodeOutcome::Corrupt(e) => return Err(e),
            }
        }
    }
}

fn parse_block(mut block: BytesMut) -> Result<Frame, ProtocolError> {
    if block.len() < BLOCK_HEADER_LEN {
        return Err(ProtocolError::Truncated(block.len()));
    }
    let sequence = block.get_u32_ne();
    let tag_len = block.get_u32_ne() as usize;
    if tag_len > block.remaining() {
        return Err(ProtocolError::Truncated(BLOCK_HEADER_LEN + block.remaining()));
    }
    let tag_bytes = block.split_to(tag_len);
    let tag = std::str::from_utf8(&tag_bytes).map_err(|_| ProtocolError::InvalidTag)?;
    let kind = CommandKind::from_name(tag).ok_or_else(|| ProtocolError::UnknownTag(tag.to_string()))?;
    let command = Command::decode_payload(kind, &block)
        .map_err(|source| ProtocolError::Payload { tag: kind.name(), source })?;
    Ok(Frame { sequence, command })
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
