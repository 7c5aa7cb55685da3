#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod error;
pub mod textures;

pub use error::Kn5Error;
pub use textures::{Kn5TextureEntry, Kn5Textures};
