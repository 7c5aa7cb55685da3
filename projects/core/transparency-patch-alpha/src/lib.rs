#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod classify;
pub mod error;
pub mod policy;
pub mod resolve;
pub mod transform;

pub use classify::{classify_alpha, AlphaClass};
pub use error::{AlphaError, FormatResolveError};
pub use policy::AlphaPolicy;
pub use resolve::resolve_format;
pub use transform::{
    flatten_alpha, normalize_alpha, stretch_alpha, stretched_alpha_value, AlphaOutcome,
};
