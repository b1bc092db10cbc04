//! Terminal progress-bar markup and progress-mode emission
//!
//! The bar is drawn with two fixed control sequences from the terminal's
//! markup vocabulary. Their byte values are data, not algorithm: they are
//! reproduced exactly and never derived.
//!
// Copyright (c) 2025 Tommy Olsen
// Licensed under the MIT License.

use std::io::Write;

use crate::block_plan::{PROGRESS_BLOCK_COUNT, progress_blocks};
use crate::block_writer::write_block;
use crate::error::ConvertError;
use crate::load_address::Bank;

/// Cells in the drawn bar, one per data block except the last
pub const BAR_CELLS: u8 = 39;

/// Control sequence drawing the empty bar at terminal row `row` and parking
/// the cursor back at its first cell.
pub fn bar_setup(row: u8) -> [u8; 10] {
    [
        0x1F,
        0x40 + row,
        0x41,
        0x1D,
        b'Q',
        0x12,
        0x40 + BAR_CELLS,
        0x1F,
        0x40 + row,
        0x41,
    ]
}

/// Control sequence filling the single bar cell at (`row`, `col`).
pub fn bar_step(row: u8, col: u8) -> [u8; 6] {
    [0x1F, 0x40 + row, 0x40 + col, 0x1D, 0x82, 127]
}

/// Write the whole payload as progress-mode blocks: the bar, then each data
/// block followed by its one-cell bar advance, then the terminator block.
pub fn write_with_progress(
    out: &mut impl Write,
    payload: &[u8],
    load_addr: u16,
    bank: Bank,
    row: u8,
) -> Result<(), ConvertError> {
    let plan = progress_blocks(payload.len(), load_addr)?;

    out.write_all(&bar_setup(row))?;
    for (index, block) in plan.iter().enumerate() {
        write_block(
            out,
            block.load_addr,
            bank,
            &payload[block.range.clone()],
            block.end_marker,
        )?;
        if index < PROGRESS_BLOCK_COUNT {
            out.write_all(&bar_step(row, index as u8 + 1))?;
        }
    }
    Ok(())
}
