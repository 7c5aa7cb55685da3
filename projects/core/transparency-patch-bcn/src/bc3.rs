//! BC3 (DXT4/DXT5) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc3>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use crate::color_block::{ColourHalf, ColourMode};
use transparency_patch_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Size of a BC3 block in bytes.
pub const BC3_BLOCK_SIZE: usize = 16;

/// Builds the 8-entry alpha palette of a BC4-style alpha block.
#[allow(clippy::identity_op)]
fn alpha_palette(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let (a0, a1) = (alpha0 as u16, alpha1 as u16);
    let mut alpha_values = [0u8; 8];
    alpha_values[0] = alpha0; // bit code 000
    alpha_values[1] = alpha1; // bit code 001

    // If alpha0 > alpha1, we have 8 interpolated values
    // Otherwise we have 6 interpolated values plus transparent and opaque
    if alpha0 > alpha1 {
        alpha_values[2] = ((6 * a0 + 1 * a1) / 7) as u8; // bit code 010
        alpha_values[3] = ((5 * a0 + 2 * a1) / 7) as u8; // bit code 011
        alpha_values[4] = ((4 * a0 + 3 * a1) / 7) as u8; // bit code 100
        alpha_values[5] = ((3 * a0 + 4 * a1) / 7) as u8; // bit code 101
        alpha_values[6] = ((2 * a0 + 5 * a1) / 7) as u8; // bit code 110
        alpha_values[7] = ((1 * a0 + 6 * a1) / 7) as u8; // bit code 111
    } else {
        alpha_values[2] = ((4 * a0 + 1 * a1) / 5) as u8; // bit code 010
        alpha_values[3] = ((3 * a0 + 2 * a1) / 5) as u8; // bit code 011
        alpha_values[4] = ((2 * a0 + 3 * a1) / 5) as u8; // bit code 100
        alpha_values[5] = ((1 * a0 + 4 * a1) / 5) as u8; // bit code 101
        alpha_values[6] = 0; // Transparent (bit code 110)
        alpha_values[7] = 255; // Opaque (bit code 111)
    }
    alpha_values
}

/// Decodes a BC3 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC3 block (16 bytes); an 8-byte BC4 alpha block, then a colour half
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
///
/// # Example
///
/// ```
/// use transparency_patch_bcn::bc3::decode_bc3_block;
///
/// let bc3_block = [0u8; 16]; // Compressed BC3 block
/// let decoded = decode_bc3_block(&bc3_block).unwrap();
/// assert_eq!(decoded.get_pixel(0, 0).a, 0);
/// ```
#[inline]
pub fn decode_bc3_block(src: &[u8]) -> Option<Decoded4x4Block> {
    if src.len() < BC3_BLOCK_SIZE {
        return None;
    }

    // BC3 always uses the 4-color mode (no transparency from color section)
    let colours = ColourHalf::read(&src[8..16], ColourMode::FourColourOnly);
    let alpha_values = alpha_palette(src[0], src[1]);

    // 48 bits of 3-bit alpha indices, little endian.
    let alpha_indices = src[2..8]
        .iter()
        .rev()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64);

    let mut result = Decoded4x4Block::new(Color8888::default());
    for (pixel_index, pixel) in result.pixels.iter_mut().enumerate() {
        let alpha_idx = (alpha_indices >> (pixel_index * 3)) & 0b111;
        *pixel = colours
            .pixel(pixel_index)
            .with_alpha(alpha_values[alpha_idx as usize]);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_decode_bc3_block() {
        // White color with alpha
        let bc3_block = [
            // Alpha data (BC4 compression)
            0, 0, 0, 255, 255, 255, 255, 255, // Color data (BC1-style format)
            255, 255, // c0 = R:31 G:63 B:31 (white)
            18, 0, // c1 = R:0 G:0 B:1
            0, 0, 0, 250, // Indices: mostly index 0, some index 2 and 3
        ];

        let decoded = decode_bc3_block(&bc3_block).unwrap();

        // Create the expected block with an array of 16 pixels (row-major order)
        let expected = Decoded4x4Block {
            pixels: [
                // Row 0
                Color8888::new(255, 255, 255, 0),
                Color8888::new(255, 255, 255, 0),
                Color8888::new(255, 255, 255, 0),
                Color8888::new(255, 255, 255, 255),
                // Row 1
                Color8888::new(255, 255, 255, 255),
                Color8888::new(255, 255, 255, 255),
                Color8888::new(255, 255, 255, 255),
                Color8888::new(255, 255, 255, 255),
                // Row 2
                Color8888::new(255, 255, 255, 255),
                Color8888::new(255, 255, 255, 255),
                Color8888::new(255, 255, 255, 255),
                Color8888::new(255, 255, 255, 255),
                // Row 3
                Color8888::new(170, 170, 219, 255),
                Color8888::new(170, 170, 219, 255),
                Color8888::new(85, 85, 183, 255),
                Color8888::new(85, 85, 183, 255),
            ],
        };

        assert_eq!(decoded, expected, "Decoded block doesn't match expected");
    }

    #[test]
    fn can_decode_bc3_block_with_varying_alpha() {
        // Alpha data with alpha0 > alpha1 (8-value mode)
        let bc3_block = [
            41, 1, 253, 178, 0, 0, 0, 0, // Alpha
            10, 0, 0, 0, 0, 0, 77, 0, // Blue color with various indices
        ];

        let decoded = decode_bc3_block(&bc3_block).unwrap();

        let expected = Decoded4x4Block {
            pixels: [
                // Row 0 - varying alpha
                Color8888::new(0, 0, 82, 18),
                Color8888::new(0, 0, 82, 6),
                Color8888::new(0, 0, 82, 29),
                Color8888::new(0, 0, 82, 1),
                // Row 1
                Color8888::new(0, 0, 82, 29),
                Color8888::new(0, 0, 82, 1),
                Color8888::new(0, 0, 82, 41),
                Color8888::new(0, 0, 82, 41),
                // Row 2 - with blue variations
                Color8888::new(0, 0, 0, 41),
                Color8888::new(0, 0, 27, 41),
                Color8888::new(0, 0, 82, 41),
                Color8888::new(0, 0, 0, 41),
                // Row 3
                Color8888::new(0, 0, 82, 41),
                Color8888::new(0, 0, 82, 41),
                Color8888::new(0, 0, 82, 41),
                Color8888::new(0, 0, 82, 41),
            ],
        };

        assert_eq!(decoded, expected, "Decoded block doesn't match expected");
    }

    #[test]
    fn six_value_mode_has_explicit_transparent_and_opaque() {
        let palette = alpha_palette(10, 200);
        assert_eq!(palette[6], 0);
        assert_eq!(palette[7], 255);
        assert_eq!(palette[2], 48); // (4*10 + 200) / 5
    }

    #[test]
    fn test_slice_too_small() {
        assert!(decode_bc3_block(&[0u8; 15]).is_none());
    }
}
