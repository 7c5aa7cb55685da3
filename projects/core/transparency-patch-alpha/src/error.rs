//! Error types for alpha classification and format resolution.

use thiserror::Error;
use transparency_patch_common::texture_format::TextureFormat;

/// Errors raised when constructing an [`AlphaPolicy`](crate::AlphaPolicy).
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum AlphaError {
    /// The gradient threshold lies outside `(0, 1]`.
    #[error("Alpha threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),
}

/// Errors raised by [`resolve_format`](crate::resolve_format).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatResolveError {
    /// The nominal format has no alpha-capable counterpart.
    #[error("Format {0} has no alpha-capable counterpart")]
    NoAlphaSibling(TextureFormat),
}
