//! BC2 (DXT2/DXT3) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc2>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use crate::color_block::{ColourHalf, ColourMode};
use transparency_patch_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Size of a BC2 block in bytes.
pub const BC2_BLOCK_SIZE: usize = 16;

/// Decodes a BC2 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC2 block (16 bytes); 8 bytes of explicit 4-bit alpha, then a colour half
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc2_block(src: &[u8]) -> Option<Decoded4x4Block> {
    if src.len() < BC2_BLOCK_SIZE {
        return None;
    }

    // BC2 always uses the 4-color mode (no transparency from color section)
    let colours = ColourHalf::read(&src[8..16], ColourMode::FourColourOnly);
    let alpha_bytes = &src[..8];

    let mut result = Decoded4x4Block::new(Color8888::default());
    for (pixel_index, pixel) in result.pixels.iter_mut().enumerate() {
        let shift_amount = (pixel_index & 0x1) * 4;
        let alpha_value = (alpha_bytes[pixel_index >> 1] >> shift_amount) & 0x0F;

        // Scale 4-bit alpha (0-15) to 8-bit (0-255): multiply by 17
        *pixel = colours.pixel(pixel_index).with_alpha(alpha_value * 17);
    }
    Some(result)
}
