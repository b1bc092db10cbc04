//! Payload partitioning for progress-bar mode
//!
//! Progress mode slices the payload into a fixed number of nearly-equal
//! blocks so the terminal can advance one bar cell per block, then appends
//! a zero-length terminator block that tells the receiver the whole
//! teleprogram is complete and where to start it.
//!
// Copyright (c) 2025 Tommy Olsen
// Licensed under the MIT License.

use std::ops::Range;

use crate::block_writer::EndMarker;
use crate::error::ConvertError;

/// Number of data blocks (and bar cells) in progress mode
pub const PROGRESS_BLOCK_COUNT: usize = 40;

/// One planned block: where it loads, which payload bytes it carries and
/// how it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    pub load_addr: u16,
    pub range: Range<usize>,
    pub end_marker: EndMarker,
}

/// Partition a payload of `size` bytes starting at `load_addr` into the
/// progress-mode plan: 40 data blocks ending in `EndDataBlock`, each loaded
/// right after the previous one, followed by the zero-length terminator
/// block at the original start address ending in `EndProgram`.
///
/// The nominal block size is `size / 40 + 1`; blocks near the end shrink
/// (possibly to zero) once the payload runs out, so the data block lengths
/// always sum to exactly `size`.
pub fn progress_blocks(size: usize, load_addr: u16) -> Result<Vec<BlockSpec>, ConvertError> {
    if size < PROGRESS_BLOCK_COUNT - 1 {
        return Err(ConvertError::Argument(format!(
            "Progress bar mode needs a payload of at least {} bytes (got {})",
            PROGRESS_BLOCK_COUNT - 1,
            size
        )));
    }

    let block_size = size / PROGRESS_BLOCK_COUNT + 1;
    let mut plan = Vec::with_capacity(PROGRESS_BLOCK_COUNT + 1);
    let mut offset = 0;

    for index in 0..PROGRESS_BLOCK_COUNT {
        let len = if index < PROGRESS_BLOCK_COUNT - 1 {
            block_size.min(size - offset)
        } else {
            // last data block takes whatever is left
            size - offset
        };
        plan.push(BlockSpec {
            load_addr: (load_addr as u32 + offset as u32) as u16,
            range: offset..offset + len,
            end_marker: EndMarker::EndDataBlock,
        });
        offset += len;
    }

    plan.push(BlockSpec {
        load_addr,
        range: size..size,
        end_marker: EndMarker::EndProgram,
    });

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_covers_whole_payload() {
        let plan = progress_blocks(10000, 0x8100).unwrap();

        assert_eq!(plan.len(), PROGRESS_BLOCK_COUNT + 1);

        // data block lengths sum exactly to the payload size
        let total: usize = plan[..PROGRESS_BLOCK_COUNT].iter().map(|b| b.range.len()).sum();
        assert_eq!(total, 10000);

        // contiguous, in address order
        let mut expected_start = 0;
        for block in &plan[..PROGRESS_BLOCK_COUNT] {
            assert_eq!(block.range.start, expected_start);
            assert_eq!(block.end_marker, EndMarker::EndDataBlock);
            assert_eq!(block.load_addr, 0x8100 + block.range.start as u16);
            expected_start = block.range.end;
        }
    }

    #[test]
    fn test_nominal_block_size() {
        // 10000 / 40 + 1 = 251 for the first 39 blocks, remainder 211 last
        let plan = progress_blocks(10000, 0x8100).unwrap();
        for block in &plan[..PROGRESS_BLOCK_COUNT - 1] {
            assert_eq!(block.range.len(), 251);
        }
        assert_eq!(plan[PROGRESS_BLOCK_COUNT - 1].range.len(), 211);
    }

    #[test]
    fn test_terminator_block() {
        let plan = progress_blocks(4000, 0x2000).unwrap();
        let terminator = plan.last().unwrap();
        assert_eq!(terminator.range.len(), 0);
        assert_eq!(terminator.load_addr, 0x2000);
        assert_eq!(terminator.end_marker, EndMarker::EndProgram);
    }

    #[test]
    fn test_minimum_payload() {
        // 39 bytes: one byte per block, the 40th data block is empty
        let plan = progress_blocks(39, 0x8100).unwrap();
        let total: usize = plan[..PROGRESS_BLOCK_COUNT].iter().map(|b| b.range.len()).sum();
        assert_eq!(total, 39);
        assert_eq!(plan[PROGRESS_BLOCK_COUNT - 1].range.len(), 0);
    }

    #[test]
    fn test_payload_too_small() {
        assert!(progress_blocks(38, 0x8100).is_err());
        assert!(progress_blocks(0, 0x8100).is_err());
    }

    #[test]
    fn test_awkward_size_never_goes_negative() {
        // 40 / 40 + 1 = 2: the payload runs out after 20 blocks and the
        // remaining data blocks are empty, still summing to the size
        let plan = progress_blocks(40, 0x8100).unwrap();
        let total: usize = plan[..PROGRESS_BLOCK_COUNT].iter().map(|b| b.range.len()).sum();
        assert_eq!(total, 40);
        assert_eq!(plan.len(), PROGRESS_BLOCK_COUNT + 1);
    }
}
