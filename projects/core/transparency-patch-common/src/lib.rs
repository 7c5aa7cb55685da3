#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod color_565;
pub mod color_8888;
pub mod decoded_4x4_block;
pub mod surface;
pub mod texture_format;
