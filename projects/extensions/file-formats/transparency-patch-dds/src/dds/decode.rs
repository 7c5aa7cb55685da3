//! DDS to [`Surface`] decoding.

use super::parse_dds::{parse_dds, DdsFormat, LayoutKind, PixelLayout};
use crate::error::DdsError;
use log::trace;
use transparency_patch_bcn::decode_surface;
use transparency_patch_common::{color_8888::Color8888, surface::Surface};

/// Decodes the top mip level of a DDS file.
///
/// # Errors
///
/// Any error of [`parse_dds`], or a block decoding error.
pub fn decode_dds(data: &[u8]) -> Result<Surface, DdsError> {
    let info = parse_dds(data)?;
    trace!(
        "Decoding DDS {}x{} {:?} ({} mip levels)",
        info.width,
        info.height,
        info.format,
        info.mipmap_count
    );

    let top_level = &data[info.data_offset..info.data_offset + info.data_length];
    match info.format {
        DdsFormat::Block(format) => Ok(decode_surface(format, info.width, info.height, top_level)?),
        DdsFormat::Uncompressed(layout) => {
            decode_uncompressed(&layout, info.width, info.height, top_level)
        }
    }
}

/// Extracts one masked channel, scaled to 8 bits.
#[derive(Debug, Clone, Copy)]
struct Channel {
    mask: u32,
    shift: u32,
    max: u32,
}

impl Channel {
    fn new(mask: u32) -> Option<Self> {
        if mask == 0 {
            return None;
        }
        let shift = mask.trailing_zeros();
        Some(Self {
            mask,
            shift,
            max: mask >> shift,
        })
    }

    #[inline]
    fn extract(&self, value: u32) -> u8 {
        let raw = (value & self.mask) >> self.shift;
        // Round to nearest when widening, e.g. 4 bit 0xF -> 255.
        ((raw as u64 * 255 + self.max as u64 / 2) / self.max as u64) as u8
    }
}

fn decode_uncompressed(
    layout: &PixelLayout,
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<Surface, DdsError> {
    let r = Channel::new(layout.r_mask);
    let g = Channel::new(layout.g_mask);
    let b = Channel::new(layout.b_mask);
    let a = Channel::new(layout.a_mask);
    let extract = |channel: Option<Channel>, value: u32, default: u8| {
        channel.map_or(default, |c| c.extract(value))
    };

    let pixels = data
        .chunks_exact(layout.bytes_per_pixel())
        .map(|bytes| {
            let mut raw = [0u8; 4];
            raw[..bytes.len()].copy_from_slice(bytes);
            let value = u32::from_le_bytes(raw);

            let alpha = extract(a, value, 255);
            match layout.kind {
                LayoutKind::Rgb => Color8888::new(
                    extract(r, value, 0),
                    extract(g, value, 0),
                    extract(b, value, 0),
                    alpha,
                ),
                LayoutKind::Luminance => {
                    let l = extract(r, value, 0);
                    Color8888::new(l, l, l, alpha)
                }
                LayoutKind::AlphaOnly => Color8888::new(0, 0, 0, alpha),
            }
        })
        .collect();

    Ok(Surface::new(width, height, pixels)?)
}
