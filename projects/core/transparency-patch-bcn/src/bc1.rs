//! BC1 (DXT1) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d9/opaque-and-1-bit-alpha-textures>

use crate::color_block::{ColourHalf, ColourMode};
use transparency_patch_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Size of a BC1 block in bytes.
pub const BC1_BLOCK_SIZE: usize = 8;

/// Decodes a BC1 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC1 block (8 bytes)
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
///
/// # Example
///
/// ```
/// use transparency_patch_bcn::bc1::decode_bc1_block;
///
/// let bc1_block = [0u8; 8]; // Compressed BC1 block
/// let decoded = decode_bc1_block(&bc1_block).unwrap();
/// let pixel_at_0_0 = decoded.get_pixel(0, 0);
/// ```
#[inline]
pub fn decode_bc1_block(src: &[u8]) -> Option<Decoded4x4Block> {
    if src.len() < BC1_BLOCK_SIZE {
        return None;
    }

    let colours = ColourHalf::read(src, ColourMode::Bc1);
    let mut result = Decoded4x4Block::new(Color8888::default());
    for (pixel_index, pixel) in result.pixels.iter_mut().enumerate() {
        *pixel = colours.pixel(pixel_index);
    }
    Some(result)
}
