//! Program-image loader.
//!
//! A program file is whitespace-separated two-character hex bytes in
//! program order; each pair becomes one byte at increasing addresses, and
//! the total byte count becomes `max_pc`. Instruction words are
//! little-endian, so the first byte of a word is its least significant.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::common::constants::PROGRAM_IMAGE_LIMIT;

/// Errors produced while loading a program image.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    Io(std::io::Error),
    /// A token was not a two-character hex byte.
    InvalidByte(String),
    /// The image exceeds the program-memory limit.
    TooLarge(usize),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read program file: {}", e),
            LoadError::InvalidByte(tok) => {
                write!(f, "invalid hex byte {:?} in program file", tok)
            }
            LoadError::TooLarge(n) => write!(
                f,
                "program image of {} bytes exceeds the {}-byte limit",
                n, PROGRAM_IMAGE_LIMIT
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// Loads a program image from a hex-character file.
///
/// # Arguments
///
/// * `path` - Path to the program file.
///
/// # Returns
///
/// The instruction byte array, at most 4 KiB.
pub fn load_program(path: &Path) -> Result<Vec<u8>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_program(&text)
}

/// Parses hex-character program text into the instruction byte array.
///
/// Tokens longer than two characters are consumed pairwise, so both
/// `"93 02 50 00"` and `"93025000"` describe the same four bytes.
pub fn parse_program(text: &str) -> Result<Vec<u8>, LoadError> {
    let mut image = Vec::new();

    for token in text.split_whitespace() {
        if token.len() % 2 != 0 || !token.is_ascii() {
            return Err(LoadError::InvalidByte(token.to_string()));
        }
        for pair in token.as_bytes().chunks(2) {
            let pair = std::str::from_utf8(pair).map_err(|_| LoadError::InvalidByte(token.to_string()))?;
            let byte = u8::from_str_radix(pair, 16)
                .map_err(|_| LoadError::InvalidByte(pair.to_string()))?;
            image.push(byte);
        }
    }

    if image.len() > PROGRAM_IMAGE_LIMIT {
        return Err(LoadError::TooLarge(image.len()));
    }

    Ok(image)
}
