#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod bc1;
pub mod bc2;
pub mod bc3;
mod color_block;
pub mod error;
pub mod surface;

pub use error::BcnError;
pub use surface::{decode_surface, encode_surface_into, BlockFormat, EncodeQuality};
