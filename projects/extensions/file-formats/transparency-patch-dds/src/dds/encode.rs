//! [`Surface`] to DDS encoding.
//!
//! Block compressed output is produced with `squish` through [`transparency_patch_bcn`];
//! uncompressed layouts are packed directly. Mipmaps are generated down to 1x1 with a
//! Catmull-Rom filter.

use super::constants::*;
use super::parse_dds::{DdsFormat, LayoutKind, PixelLayout};
use crate::error::DdsError;
use endian_writer::{EndianWriter, LittleEndianWriter};
use image::{imageops::FilterType, ImageBuffer, Rgba, RgbaImage};
use log::debug;
use transparency_patch_bcn::{encode_surface_into, BlockFormat, EncodeQuality};
use transparency_patch_common::{color_8888::Color8888, surface::Surface, texture_format::TextureFormat};

/// How a surface is written out as DDS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsEncodeOptions {
    pub format: TextureFormat,
    /// Generate the full mip chain down to 1x1.
    pub mipmaps: bool,
    /// Block compression quality; ignored for uncompressed formats.
    pub quality: EncodeQuality,
}

impl DdsEncodeOptions {
    /// Options for `format` with mipmaps and normal quality.
    pub fn new(format: TextureFormat) -> Self {
        Self {
            format,
            mipmaps: true,
            quality: EncodeQuality::Normal,
        }
    }
}

/// The DDS pixel format a [`TextureFormat`] is written as.
pub fn dds_format_for(format: TextureFormat) -> DdsFormat {
    match format {
        TextureFormat::Dxt1 => DdsFormat::Block(BlockFormat::Bc1),
        TextureFormat::Dxt5 => DdsFormat::Block(BlockFormat::Bc3),
        TextureFormat::Luminance => DdsFormat::Uncompressed(PixelLayout::L8),
        TextureFormat::LuminanceAlpha => DdsFormat::Uncompressed(PixelLayout::A8L8),
        TextureFormat::Rgb565 => DdsFormat::Uncompressed(PixelLayout::R5G6B5),
        TextureFormat::Rgba4444 => DdsFormat::Uncompressed(PixelLayout::A4R4G4B4),
        TextureFormat::Rgb => DdsFormat::Uncompressed(PixelLayout::B8G8R8X8),
        TextureFormat::Rgba => DdsFormat::Uncompressed(PixelLayout::B8G8R8A8),
    }
}

/// Rounds a dimension to the nearest multiple of 4, with 4 as the minimum.
#[inline]
pub fn round_to_block_dimension(value: u32) -> u32 {
    ((value + 2) / 4 * 4).max(4)
}

/// Encodes `surface` as a complete DDS file.
///
/// Block compressed targets whose dimensions are not multiples of four are resized to the
/// nearest multiple first.
///
/// # Errors
///
/// - [`DdsError::Surface`] if a resized level cannot form a surface
/// - [`DdsError::Bcn`] if block compression fails
pub fn encode_dds(surface: &Surface, options: &DdsEncodeOptions) -> Result<Vec<u8>, DdsError> {
    let format = dds_format_for(options.format);

    let top = match format {
        DdsFormat::Block(_) => {
            let width = round_to_block_dimension(surface.width());
            let height = round_to_block_dimension(surface.height());
            if (width, height) != (surface.width(), surface.height()) {
                debug!(
                    "Resizing {}x{} to {width}x{height} for block compression",
                    surface.width(),
                    surface.height()
                );
                resize(surface, width, height)?
            } else {
                surface.clone()
            }
        }
        DdsFormat::Uncompressed(_) => surface.clone(),
    };

    let mut levels = vec![top];
    if options.mipmaps {
        while let Some(last) = levels.last() {
            if last.width() == 1 && last.height() == 1 {
                break;
            }
            let next = resize(last, (last.width() / 2).max(1), (last.height() / 2).max(1))?;
            levels.push(next);
        }
    }

    let mut output = write_header(&levels[0], format, levels.len() as u32);
    for level in &levels {
        match format {
            DdsFormat::Block(block_format) => {
                let start = output.len();
                output.resize(
                    start + block_format.compressed_size(level.width(), level.height()),
                    0,
                );
                encode_surface_into(block_format, level, options.quality, &mut output[start..])?;
            }
            DdsFormat::Uncompressed(layout) => pack_uncompressed(&layout, level, &mut output),
        }
    }

    debug!(
        "Encoded {}x{} as {} with {} mip levels, {} bytes",
        levels[0].width(),
        levels[0].height(),
        options.format,
        levels.len(),
        output.len()
    );
    Ok(output)
}

fn resize(surface: &Surface, width: u32, height: u32) -> Result<Surface, DdsError> {
    let image: RgbaImage = ImageBuffer::from_fn(surface.width(), surface.height(), |x, y| {
        let p = surface.pixel(x, y).unwrap_or_default();
        Rgba([p.r, p.g, p.b, p.a])
    });
    let resized = image::imageops::resize(&image, width, height, FilterType::CatmullRom);
    Ok(Surface::from_rgba8(width, height, resized.as_raw())?)
}

fn write_header(top: &Surface, format: DdsFormat, mipmap_count: u32) -> Vec<u8> {
    let mut header = vec![0u8; DDS_HEADER_SIZE];

    let mut flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT;
    let mut caps = DDSCAPS_TEXTURE;
    if mipmap_count > 1 {
        flags |= DDSD_MIPMAPCOUNT;
        caps |= DDSCAPS_COMPLEX | DDSCAPS_MIPMAP;
    }
    let pitch_or_linear_size = match format {
        DdsFormat::Block(block_format) => {
            flags |= DDSD_LINEARSIZE;
            block_format.compressed_size(top.width(), top.height())
        }
        DdsFormat::Uncompressed(layout) => {
            flags |= DDSD_PITCH;
            top.width() as usize * layout.bytes_per_pixel()
        }
    };

    // SAFETY: Every offset written below lies within the 128 byte header allocated above.
    unsafe {
        let mut writer = LittleEndianWriter::new(header.as_mut_ptr());
        writer.write_u32_at(DDS_MAGIC, 0);
        writer.write_u32_at(DDS_HEADER_STRUCT_SIZE, DDS_SIZE_OFFSET as isize);
        writer.write_u32_at(flags, DDS_FLAGS_OFFSET as isize);
        writer.write_u32_at(top.height(), DDS_HEIGHT_OFFSET as isize);
        writer.write_u32_at(top.width(), DDS_WIDTH_OFFSET as isize);
        writer.write_u32_at(
            pitch_or_linear_size as u32,
            DDS_PITCH_OR_LINEAR_SIZE_OFFSET as isize,
        );
        writer.write_u32_at(mipmap_count, DDS_MIPMAP_COUNT_OFFSET as isize);
        writer.write_u32_at(DDS_PIXELFORMAT_STRUCT_SIZE, DDS_PIXELFORMAT_OFFSET as isize);

        match format {
            DdsFormat::Block(block_format) => {
                let fourcc = match block_format {
                    BlockFormat::Bc1 => FOURCC_DXT1,
                    BlockFormat::Bc2 => FOURCC_DXT3,
                    BlockFormat::Bc3 => FOURCC_DXT5,
                };
                writer.write_u32_at(DDPF_FOURCC, DDS_PIXELFORMAT_FLAGS_OFFSET as isize);
                writer.write_u32_at(fourcc, FOURCC_OFFSET as isize);
            }
            DdsFormat::Uncompressed(layout) => {
                let mut pixel_flags = match layout.kind {
                    LayoutKind::Rgb => DDPF_RGB,
                    LayoutKind::Luminance => DDPF_LUMINANCE,
                    LayoutKind::AlphaOnly => DDPF_ALPHA,
                };
                if layout.a_mask != 0 && layout.kind != LayoutKind::AlphaOnly {
                    pixel_flags |= DDPF_ALPHAPIXELS;
                }
                writer.write_u32_at(pixel_flags, DDS_PIXELFORMAT_FLAGS_OFFSET as isize);
                writer.write_u32_at(
                    layout.bits_per_pixel,
                    DDS_PIXELFORMAT_RGBBITCOUNT_OFFSET as isize,
                );
                writer.write_u32_at(layout.r_mask, DDS_PIXELFORMAT_RBITMASK_OFFSET as isize);
                writer.write_u32_at(layout.g_mask, DDS_PIXELFORMAT_GBITMASK_OFFSET as isize);
                writer.write_u32_at(layout.b_mask, DDS_PIXELFORMAT_BBITMASK_OFFSET as isize);
                writer.write_u32_at(layout.a_mask, DDS_PIXELFORMAT_ABITMASK_OFFSET as isize);
            }
        }

        writer.write_u32_at(caps, DDS_CAPS_OFFSET as isize);
    }

    header
}

/// Quantizes an 8-bit value into `mask`, rounding to nearest.
#[inline]
fn pack_channel(value: u8, mask: u32) -> u32 {
    if mask == 0 {
        return 0;
    }
    let shift = mask.trailing_zeros();
    let max = (mask >> shift) as u64;
    let quantized = (value as u64 * max + 127) / 255;
    (quantized as u32) << shift
}

fn pack_uncompressed(layout: &PixelLayout, surface: &Surface, output: &mut Vec<u8>) {
    let bytes_per_pixel = layout.bytes_per_pixel();
    output.reserve(surface.pixels().len() * bytes_per_pixel);

    for pixel in surface.pixels() {
        let Color8888 { r, g, b, a } = *pixel;
        let (r, g, b) = match layout.kind {
            LayoutKind::Rgb => (r, g, b),
            LayoutKind::Luminance => (pixel.luminance(), 0, 0),
            LayoutKind::AlphaOnly => (0, 0, 0),
        };
        let value = pack_channel(r, layout.r_mask)
            | pack_channel(g, layout.g_mask)
            | pack_channel(b, layout.b_mask)
            | pack_channel(a, layout.a_mask);
        output.extend_from_slice(&value.to_le_bytes()[..bytes_per_pixel]);
    }
}
