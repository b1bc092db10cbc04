//! Conversion parameters
//!
//! Holds everything one conversion run needs besides the input and output
//! paths. Defaults match the classic tool: load at 0x8100 into bank 2, no
//! progress bar, no pre-load screen.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use std::path::PathBuf;

use crate::load_address::Bank;

/// Application version
pub const VERSION: &str = "0.2.0";

/// Default load address for Z80 program images
pub const DEFAULT_LOAD_ADDR: u16 = 0x8100;

/// Terminal rows a progress bar can occupy
pub const PROGRESS_ROW_RANGE: std::ops::RangeInclusive<u8> = 1..=24;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the first payload byte loads at
    pub load_addr: u16,
    /// Receiver memory bank
    pub bank: Bank,
    /// Terminal row for the progress bar; None disables progress mode
    pub progress_row: Option<u8>,
    /// Raw screen blob copied verbatim ahead of the encoded payload
    pub preload_screen: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_addr: DEFAULT_LOAD_ADDR,
            bank: Bank::Two,
            progress_row: None,
            preload_screen: None,
            verbose: false,
        }
    }
}
