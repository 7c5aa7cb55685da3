//! Error types for KN5 reading.

use std::io;
use thiserror::Error;

/// Errors that can occur while reading a KN5 texture table.
#[derive(Debug, Error)]
pub enum Kn5Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The file does not start with `sc6969`.
    #[error("Not a KN5 file, magic was {0:02X?}")]
    InvalidMagic([u8; 6]),

    /// A texture name is not valid UTF-8.
    #[error("Invalid texture name at offset {offset}")]
    InvalidString {
        /// Offset of the name bytes within the file
        offset: u64,
    },

    /// A length or count field is negative.
    #[error("Negative {field} ({value}) in KN5 texture table")]
    NegativeLength { field: &'static str, value: i32 },

    /// No texture with this name is embedded in the file.
    #[error("Texture not found: {0}")]
    TextureNotFound(String),
}
