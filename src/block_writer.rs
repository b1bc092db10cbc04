//! Framed telesoftware block emission
//!
//! One block on the wire:
//!
//! ```text
//! 0x1F 0x3C  b1 b2 b3  <encoded payload bytes>  <end marker>
//! ```
//!
//! The payload travels through the bit packer, so every payload byte on the
//! wire sits in 0x40-0x7F; the framing bytes stay outside that range and a
//! receiver can always find block boundaries.
//!
// Copyright (c) 2025 Tommy Olsen
// Licensed under the MIT License.

use std::io::{self, Write};

use crate::bit_packer::BitPacker;
use crate::load_address::{Bank, encode_load_addr};

/// Fixed two-byte start marker of every block
pub const BLOCK_START: [u8; 2] = [0x1F, 0x3C];

/// Single byte closing a block, selecting what the receiver does next.
///
/// The semantics are receiver-defined; the values come from the Mupid
/// telesoftware format and are treated as opaque here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndMarker {
    /// 0x21: end the teleprogram
    EndProgramDefault,
    /// 0x22: end of one data block, more blocks follow
    EndDataBlock,
    /// 0x28: end the teleprogram and start with PROGBA (semantics unclear,
    /// never emitted)
    EndProgramWithStart,
    /// 0x29: end the teleprogram and start at the block load address
    EndProgram,
    /// 0x2A: end the teleprogram and start BASIC
    EndProgramThenBasic,
}

impl EndMarker {
    pub fn byte(&self) -> u8 {
        match self {
            EndMarker::EndProgramDefault => 0x21,
            EndMarker::EndDataBlock => 0x22,
            EndMarker::EndProgramWithStart => 0x28,
            EndMarker::EndProgram => 0x29,
            EndMarker::EndProgramThenBasic => 0x2A,
        }
    }
}

/// Build one complete framed block.
///
/// A fresh packer runs over the payload, each encoded byte appended as it
/// becomes available, then the packer is flushed and the end marker closes
/// the block.
pub fn encode_block(load_addr: u16, bank: Bank, payload: &[u8], end: EndMarker) -> Vec<u8> {
    let mut block = Vec::with_capacity(
        BLOCK_START.len() + 3 + (payload.len() * 8).div_ceil(6) + 1,
    );
    block.extend_from_slice(&BLOCK_START);
    block.extend_from_slice(&encode_load_addr(load_addr, bank));

    let mut packer = BitPacker::new();
    for &byte in payload {
        packer.feed(byte);
        block.extend(packer.drain_ready());
    }
    block.extend(packer.flush());

    block.push(end.byte());
    block
}

/// Write one framed block to the output stream.
pub fn write_block(
    out: &mut impl Write,
    load_addr: u16,
    bank: Bank,
    payload: &[u8],
    end: EndMarker,
) -> io::Result<()> {
    out.write_all(&encode_block(load_addr, bank, payload, end))
}
