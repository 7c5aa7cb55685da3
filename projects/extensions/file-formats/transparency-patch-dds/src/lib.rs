#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[cfg(test)]
pub mod test_prelude;

pub mod dds;
pub mod error;

pub use error::DdsError;
