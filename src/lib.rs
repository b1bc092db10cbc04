//! Z80 Binary to BTX Converter Library
//!
//! This library provides the core functionality for converting Z80 binary
//! files to Mupid teleprogram (.btx) files in the BTX telesoftware format:
//! framed blocks of 6-bit-clean bytes carrying a load address, with
//! optional terminal progress-bar markup between blocks.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

pub mod bit_packer;
pub mod block_plan;
pub mod block_writer;
pub mod config;
pub mod convert_binary;
pub mod error;
pub mod load_address;
pub mod progress_bar;
