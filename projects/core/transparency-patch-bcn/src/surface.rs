//! Whole-texture decoding and encoding.

use crate::bc1::{decode_bc1_block, BC1_BLOCK_SIZE};
use crate::bc2::{decode_bc2_block, BC2_BLOCK_SIZE};
use crate::bc3::{decode_bc3_block, BC3_BLOCK_SIZE};
use crate::error::BcnError;
use derive_enum_all_values::AllValues;
use transparency_patch_common::{
    color_8888::Color8888, decoded_4x4_block::Decoded4x4Block, surface::Surface,
};

/// A 4x4 block compressed pixel format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum BlockFormat {
    /// BC1 / DXT1
    Bc1,
    /// BC2 / DXT2 / DXT3
    Bc2,
    /// BC3 / DXT4 / DXT5
    Bc3,
}

impl BlockFormat {
    /// Size of a single block in bytes.
    pub fn block_size(self) -> usize {
        match self {
            Self::Bc1 => BC1_BLOCK_SIZE,
            Self::Bc2 => BC2_BLOCK_SIZE,
            Self::Bc3 => BC3_BLOCK_SIZE,
        }
    }

    /// Bytes needed for a `width` x `height` image; partial blocks at the edges count as whole.
    /// Saturates at `usize::MAX`; see [`Self::checked_compressed_size`].
    pub fn compressed_size(self, width: u32, height: u32) -> usize {
        self.checked_compressed_size(width, height)
            .unwrap_or(usize::MAX)
    }

    /// [`Self::compressed_size`], or [`None`] if it does not fit in `usize`.
    pub fn checked_compressed_size(self, width: u32, height: u32) -> Option<usize> {
        (width.div_ceil(4) as usize)
            .checked_mul(height.div_ceil(4) as usize)?
            .checked_mul(self.block_size())
    }

    fn decode_block(self, src: &[u8]) -> Option<Decoded4x4Block> {
        match self {
            Self::Bc1 => decode_bc1_block(src),
            Self::Bc2 => decode_bc2_block(src),
            Self::Bc3 => decode_bc3_block(src),
        }
    }

    fn squish_format(self) -> squish::Format {
        match self {
            Self::Bc1 => squish::Format::Bc1,
            Self::Bc2 => squish::Format::Bc2,
            Self::Bc3 => squish::Format::Bc3,
        }
    }
}

/// Trade-off between encoding speed and block quality.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, AllValues)]
pub enum EncodeQuality {
    /// Single cluster fit pass.
    #[default]
    Normal,
    /// Iterative cluster fit; noticeably slower.
    Production,
}

impl EncodeQuality {
    fn algorithm(self) -> squish::Algorithm {
        match self {
            Self::Normal => squish::Algorithm::ClusterFit,
            Self::Production => squish::Algorithm::IterativeClusterFit,
        }
    }
}

/// Decodes a block compressed texture into a [`Surface`].
///
/// # Parameters
///
/// - `format`: block format of `data`
/// - `width`, `height`: image dimensions in pixels; need not be multiples of 4
/// - `data`: the blocks, row-major; bytes past [`BlockFormat::compressed_size`] are ignored
///
/// # Errors
///
/// - [`BcnError::InputTooShort`] if `data` holds fewer blocks than the dimensions need,
///   (`needed` saturates at `usize::MAX` for dimensions whose size overflows)
/// - [`BcnError::Surface`] if a dimension is zero
pub fn decode_surface(
    format: BlockFormat,
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<Surface, BcnError> {
    let needed = format.compressed_size(width, height);
    if data.len() < needed {
        return Err(BcnError::InputTooShort {
            needed,
            actual: data.len(),
        });
    }

    let mut surface = Surface::filled(width, height, Color8888::default())?;
    let blocks_x = width.div_ceil(4);
    let block_size = format.block_size();

    for (block_index, src) in data[..needed].chunks_exact(block_size).enumerate() {
        let block_index = block_index as u32;
        // Length was checked above; chunks are always a full block.
        if let Some(block) = format.decode_block(src) {
            surface.write_block(block_index % blocks_x, block_index / blocks_x, &block);
        }
    }

    Ok(surface)
}

/// Encodes `surface` into `output`, returning the number of bytes written.
///
/// # Errors
///
/// [`BcnError::OutputBufferTooSmall`] if `output` cannot hold the compressed image.
pub fn encode_surface_into(
    format: BlockFormat,
    surface: &Surface,
    quality: EncodeQuality,
    output: &mut [u8],
) -> Result<usize, BcnError> {
    let needed = format.compressed_size(surface.width(), surface.height());
    if output.len() < needed {
        return Err(BcnError::OutputBufferTooSmall {
            needed,
            actual: output.len(),
        });
    }

    compress_into(format, surface, quality, &mut output[..needed]);
    Ok(needed)
}

fn compress_into(format: BlockFormat, surface: &Surface, quality: EncodeQuality, output: &mut [u8]) {
    let params = squish::Params {
        algorithm: quality.algorithm(),
        weights: squish::COLOUR_WEIGHTS_PERCEPTUAL,
        weigh_colour_by_alpha: format != BlockFormat::Bc1,
    };
    format.squish_format().compress(
        &surface.to_rgba8(),
        surface.width() as usize,
        surface.height() as usize,
        params,
        output,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BlockFormat::Bc1, 4, 4, 8)]
    #[case(BlockFormat::Bc1, 5, 4, 16)]
    #[case(BlockFormat::Bc2, 8, 8, 64)]
    #[case(BlockFormat::Bc3, 1, 1, 16)]
    #[case(BlockFormat::Bc3, 256, 128, 32768)]
    fn compressed_sizes(
        #[case] format: BlockFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(format.compressed_size(width, height), expected);
    }

    #[rstest]
    #[case(BlockFormat::Bc2, u32::MAX, u32::MAX)]
    #[case(BlockFormat::Bc3, 0xFFFF_FFFD, 0xFFFF_FFFD)]
    fn oversized_dimensions_have_no_size(
        #[case] format: BlockFormat,
        #[case] width: u32,
        #[case] height: u32,
    ) {
        assert_eq!(format.checked_compressed_size(width, height), None);
        assert_eq!(format.compressed_size(width, height), usize::MAX);
        assert_eq!(
            decode_surface(format, width, height, &[0u8; 64]),
            Err(BcnError::InputTooShort {
                needed: usize::MAX,
                actual: 64
            })
        );
    }

    fn encode(format: BlockFormat, surface: &Surface, quality: EncodeQuality) -> Vec<u8> {
        let mut output = vec![0u8; format.compressed_size(surface.width(), surface.height())];
        let written = encode_surface_into(format, surface, quality, &mut output).unwrap();
        assert_eq!(written, output.len());
        output
    }

    #[test]
    fn decodes_blocks_in_row_major_order() {
        // Two BC1 blocks side by side: red, then blue.
        let data = [
            0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0, // red
            0x1F, 0x00, 0x1F, 0x00, 0, 0, 0, 0, // blue
        ];
        let surface = decode_surface(BlockFormat::Bc1, 8, 4, &data).unwrap();

        assert_eq!(surface.pixel(3, 3), Some(Color8888::new(255, 0, 0, 255)));
        assert_eq!(surface.pixel(4, 0), Some(Color8888::new(0, 0, 255, 255)));
    }

    #[test]
    fn decodes_partial_edge_blocks() {
        let data = [0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0];
        let surface = decode_surface(BlockFormat::Bc1, 2, 3, &data).unwrap();
        assert_eq!(surface.pixels().len(), 6);
        assert!(surface
            .pixels()
            .iter()
            .all(|p| *p == Color8888::new(255, 0, 0, 255)));
    }

    #[test]
    fn rejects_short_input() {
        let result = decode_surface(BlockFormat::Bc3, 8, 8, &[0u8; 48]);
        assert_eq!(
            result,
            Err(BcnError::InputTooShort {
                needed: 64,
                actual: 48
            })
        );
    }

    #[test]
    fn encode_rejects_small_output() {
        let surface = Surface::filled(8, 8, Color8888::new(1, 2, 3, 4)).unwrap();
        let mut output = [0u8; 16];
        assert_eq!(
            encode_surface_into(BlockFormat::Bc1, &surface, EncodeQuality::Normal, &mut output),
            Err(BcnError::OutputBufferTooSmall {
                needed: 32,
                actual: 16
            })
        );
    }

    #[rstest]
    #[case(BlockFormat::Bc1, EncodeQuality::Normal)]
    #[case(BlockFormat::Bc3, EncodeQuality::Normal)]
    #[case(BlockFormat::Bc3, EncodeQuality::Production)]
    fn solid_colour_survives_encoding(#[case] format: BlockFormat, #[case] quality: EncodeQuality) {
        // 565-exact colour so the endpoints reproduce it without rounding.
        let colour = Color8888::new(255, 0, 255, 255);
        let surface = Surface::filled(8, 4, colour).unwrap();

        let encoded = encode(format, &surface, quality);
        assert_eq!(encoded.len(), format.compressed_size(8, 4));

        let decoded = decode_surface(format, 8, 4, &encoded).unwrap();
        assert!(decoded.pixels().iter().all(|p| *p == colour));
    }

    #[test]
    fn bc3_keeps_alpha_extremes() {
        let mut pixels = vec![Color8888::new(0, 0, 0, 0); 8];
        pixels.extend(vec![Color8888::new(0, 0, 0, 255); 8]);
        let surface = Surface::new(4, 4, pixels).unwrap();

        let encoded = encode(BlockFormat::Bc3, &surface, EncodeQuality::Normal);
        let decoded = decode_surface(BlockFormat::Bc3, 4, 4, &encoded).unwrap();

        assert_eq!(decoded.pixel(0, 0).map(|p| p.a), Some(0));
        assert_eq!(decoded.pixel(3, 3).map(|p| p.a), Some(255));
    }
}
