use std::io;
use std::path::PathBuf;
use thiserror::Error;
use transparency_patch_alpha::{AlphaError, FormatResolveError};
use transparency_patch_common::surface::SurfaceError;
use transparency_patch_dds::DdsError;
use transparency_patch_kn5::Kn5Error;

/// Errors that end the whole run.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
    #[error(transparent)]
    Config(#[from] AlphaError),
    #[error("Failed to read rules file {path}: {source}")]
    Rules { path: PathBuf, source: io::Error },
    #[error("Fail to find AC root directory")]
    AcRootNotFound,
    #[error("No rules found")]
    NoRules,
    #[error(transparent)]
    FormatResolve(#[from] FormatResolveError),
    /// A texture of one car failed; the run continues with the next car.
    #[error("{car_id}: {source}")]
    Texture {
        car_id: String,
        source: TextureError,
    },
}

/// Errors for a single texture.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Dds(#[from] DdsError),
    #[error(transparent)]
    Kn5(#[from] Kn5Error),
    #[error(transparent)]
    FormatResolve(#[from] FormatResolveError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
