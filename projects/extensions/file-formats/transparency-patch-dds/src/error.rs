//! Error types for DDS reading and writing.

use thiserror::Error;
use transparency_patch_bcn::BcnError;
use transparency_patch_common::surface::SurfaceError;

/// Errors that can occur while reading or writing DDS files.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DdsError {
    /// The data does not start with the `DDS ` magic, or is shorter than a header.
    #[error("Not a DDS file")]
    NotADds,

    /// A header field holds a value no DDS writer produces.
    #[error("Invalid DDS header: {0}")]
    InvalidHeader(&'static str),

    /// The pixel layout is valid DDS but cannot be decoded.
    #[error("Unsupported DDS format: {0}")]
    UnsupportedFormat(String),

    /// The file ends before the top mip level does.
    #[error("DDS data too short for stated texture size: need {needed} bytes, but only {actual} bytes available.")]
    InputTooShortForStatedTextureSize {
        /// The required size in bytes, header included
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// Width or height is zero.
    #[error("DDS texture has zero width or height")]
    ZeroDimensions,

    /// Block decoding failed.
    #[error(transparent)]
    Bcn(#[from] BcnError),

    /// The decoded pixels could not form a surface.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
