//! Converter error types
//!
// Copyright (c) 2025 Tommy Olsen
// Licensed under the MIT License.

/// Errors reported by the converter.
///
/// `Argument` covers everything the caller got wrong (out-of-range values,
/// payloads that cannot be split or loaded as requested); `Io` covers every
/// failure of the underlying streams. There is no retry and no recovery:
/// any byte sequence is valid converter input, so nothing else can fail.
#[derive(Debug)]
pub enum ConvertError {
    Argument(String),
    Io(String),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConvertError::Argument(s) => write!(f, "Invalid argument: {}", s),
            ConvertError::Io(s) => write!(f, "I/O error: {}", s),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        ConvertError::Io(e.to_string())
    }
}
