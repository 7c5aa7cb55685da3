pub(crate) mod constants;
pub mod decode;
pub mod encode;
pub mod likely_dds;
pub mod parse_dds;

pub use decode::decode_dds;
pub use encode::{encode_dds, DdsEncodeOptions};
pub use likely_dds::likely_dds;
pub use parse_dds::{parse_dds, DdsFormat, DdsInfo, PixelLayout};
