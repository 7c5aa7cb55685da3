//! Error types for BCn decoding and encoding.

use thiserror::Error;
use transparency_patch_common::surface::SurfaceError;

/// Errors that can occur while decoding or encoding block compressed data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BcnError {
    /// The input holds fewer bytes than the stated dimensions need.
    #[error("Input too short: need {needed} bytes, but only {actual} bytes available.")]
    InputTooShort {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The output buffer is too small for the operation.
    #[error("Output buffer too small: need {needed} bytes, but only {actual} bytes available.")]
    OutputBufferTooSmall {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The decoded pixels could not form a surface.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
