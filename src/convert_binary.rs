//! Converter main API
//!
//! Converts a Z80 binary image into a Mupid teleprogram (.btx) stream:
//! an optional verbatim pre-load screen, then the payload as one framed
//! block, or as 40 framed blocks interleaved with progress-bar markup when
//! a progress row is configured.
//!
// Copyright (c) 2025 Tommy Olsen
// Licensed under the MIT License.

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use crate::block_plan::PROGRESS_BLOCK_COUNT;
use crate::block_writer::{EndMarker, write_block};
use crate::config::{Config, PROGRESS_ROW_RANGE};
use crate::error::ConvertError;
use crate::progress_bar::write_with_progress;

/// Summary of one finished conversion, for status reporting.
#[derive(Debug, Clone, Copy)]
pub struct ConvertStats {
    pub payload_bytes: usize,
    pub block_count: usize,
}

pub struct ConvertBinary {
    config: Config,
}

impl ConvertBinary {
    /// Create a new converter with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Convert a Z80 binary file to a BTX teleprogram file.
    ///
    /// Reads the whole input, validates the run against the configuration,
    /// then writes the output file. A partially written output file is
    /// removed again on any failure.
    pub fn convert(&self, input_path: &str, output_path: &str) -> Result<ConvertStats, ConvertError> {
        let payload = fs::read(input_path)
            .map_err(|e| ConvertError::Io(format!("Failed to read {}: {}", input_path, e)))?;

        // Reject bad parameter combinations before touching the output
        self.validate(payload.len())?;

        let preload = match &self.config.preload_screen {
            Some(path) => Some(fs::read(path).map_err(|e| {
                ConvertError::Io(format!("Failed to read screen file {}: {}", path.display(), e))
            })?),
            None => None,
        };

        let file = File::create(output_path)
            .map_err(|e| ConvertError::Io(format!("Failed to create {}: {}", output_path, e)))?;
        let mut out = BufWriter::new(file);

        let result = self
            .convert_payload(&payload, preload.as_deref(), &mut out)
            .and_then(|stats| {
                out.flush()?;
                Ok(stats)
            });

        if result.is_err() {
            drop(out);
            let _ = fs::remove_file(output_path);
        }
        result
    }

    /// Convert an in-memory payload, writing the BTX stream to `out`.
    pub fn convert_payload(
        &self,
        payload: &[u8],
        preload: Option<&[u8]>,
        out: &mut impl Write,
    ) -> Result<ConvertStats, ConvertError> {
        self.validate(payload.len())?;

        // Pre-load screen goes out untouched: no framing, no encoding
        if let Some(blob) = preload {
            out.write_all(blob)?;
        }

        let block_count = match self.config.progress_row {
            Some(row) => {
                write_with_progress(out, payload, self.config.load_addr, self.config.bank, row)?;
                PROGRESS_BLOCK_COUNT + 1
            }
            None => {
                write_block(
                    out,
                    self.config.load_addr,
                    self.config.bank,
                    payload,
                    EndMarker::EndProgram,
                )?;
                1
            }
        };

        Ok(ConvertStats {
            payload_bytes: payload.len(),
            block_count,
        })
    }

    fn validate(&self, size: usize) -> Result<(), ConvertError> {
        if let Some(row) = self.config.progress_row {
            if !PROGRESS_ROW_RANGE.contains(&row) {
                return Err(ConvertError::Argument(format!(
                    "Progress row must be {}-{} (got {})",
                    PROGRESS_ROW_RANGE.start(),
                    PROGRESS_ROW_RANGE.end(),
                    row
                )));
            }
            if size < PROGRESS_BLOCK_COUNT - 1 {
                return Err(ConvertError::Argument(format!(
                    "Progress bar mode needs a payload of at least {} bytes (got {})",
                    PROGRESS_BLOCK_COUNT - 1,
                    size
                )));
            }
        }

        // The last byte must still land inside the 64K bank
        if self.config.load_addr as u64 + size as u64 > 0x10000 {
            return Err(ConvertError::Argument(format!(
                "Program of {} bytes at {:#06X} does not fit the 64K bank",
                size, self.config.load_addr
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_writer::encode_block;
    use crate::load_address::Bank;
    use crate::progress_bar::bar_setup;

    #[test]
    fn test_single_block_mode() {
        let payload = vec![0x12u8, 0x34, 0x56];
        let converter = ConvertBinary::new(Config::default());

        let mut out = Vec::new();
        let stats = converter.convert_payload(&payload, None, &mut out).unwrap();

        assert_eq!(stats.block_count, 1);
        assert_eq!(stats.payload_bytes, 3);
        assert_eq!(
            out,
            encode_block(0x8100, Bank::Two, &payload, EndMarker::EndProgram)
        );
    }

    #[test]
    fn test_single_block_covers_empty_payload() {
        let converter = ConvertBinary::new(Config::default());
        let mut out = Vec::new();
        converter.convert_payload(&[], None, &mut out).unwrap();
        assert_eq!(out, vec![0x1F, 0x3C, 0x48, 0x44, 0x40, 0x29]);
    }

    #[test]
    fn test_preload_screen_copied_verbatim() {
        // The blob is not 6-bit clean and must not be touched
        let screen = [0x0C, 0xFF, 0x00, 0x1F, 0x3C];
        let payload = vec![0x00u8; 4];
        let converter = ConvertBinary::new(Config::default());

        let mut out = Vec::new();
        converter.convert_payload(&payload, Some(&screen), &mut out).unwrap();

        assert_eq!(&out[..screen.len()], &screen);
        assert_eq!(out[screen.len()], 0x1F);
        assert_eq!(out[screen.len() + 1], 0x3C);
    }

    #[test]
    fn test_progress_mode_block_count() {
        let config = Config {
            progress_row: Some(23),
            ..Config::default()
        };
        let converter = ConvertBinary::new(config);

        let payload = vec![0x55u8; 2000];
        let mut out = Vec::new();
        let stats = converter.convert_payload(&payload, None, &mut out).unwrap();

        assert_eq!(stats.block_count, PROGRESS_BLOCK_COUNT + 1);
        assert_eq!(&out[..10], &bar_setup(23));
    }

    #[test]
    fn test_progress_mode_rejects_small_payload() {
        let config = Config {
            progress_row: Some(23),
            ..Config::default()
        };
        let converter = ConvertBinary::new(config);

        let mut out = Vec::new();
        let result = converter.convert_payload(&[0u8; 38], None, &mut out);
        assert!(matches!(result, Err(ConvertError::Argument(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_progress_row_out_of_range() {
        let config = Config {
            progress_row: Some(25),
            ..Config::default()
        };
        let converter = ConvertBinary::new(config);

        let mut out = Vec::new();
        let result = converter.convert_payload(&[0u8; 100], None, &mut out);
        assert!(matches!(result, Err(ConvertError::Argument(_))));
    }

    #[test]
    fn test_program_must_fit_the_bank() {
        let config = Config {
            load_addr: 0xFF00,
            ..Config::default()
        };
        let converter = ConvertBinary::new(config);

        let mut out = Vec::new();
        // 0xFF00 + 0x100 = 0x10000 still fits
        assert!(converter.convert_payload(&[0u8; 0x100], None, &mut out).is_ok());
        // one more byte does not
        let result = converter.convert_payload(&[0u8; 0x101], None, &mut out);
        assert!(matches!(result, Err(ConvertError::Argument(_))));
    }
}
