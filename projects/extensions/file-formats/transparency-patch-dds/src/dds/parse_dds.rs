use super::{constants::*, likely_dds};
use crate::error::DdsError;
use endian_writer::{EndianReader, LittleEndianReader};
use transparency_patch_bcn::BlockFormat;

/// Which channels an uncompressed layout carries colour in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Separate red, green and blue masks (`DDPF_RGB`).
    Rgb,
    /// A single grey channel in the red mask (`DDPF_LUMINANCE`).
    Luminance,
    /// Alpha only (`DDPF_ALPHA`); colour decodes as black.
    AlphaOnly,
}

/// An uncompressed pixel layout described by bit masks over a little endian pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub kind: LayoutKind,
    /// 8, 16, 24 or 32.
    pub bits_per_pixel: u32,
    pub r_mask: u32,
    pub g_mask: u32,
    pub b_mask: u32,
    /// Zero when the layout has no alpha.
    pub a_mask: u32,
}

impl PixelLayout {
    /// `R8G8B8A8`: bytes in R, G, B, A order.
    pub const R8G8B8A8: Self = Self::rgb(32, 0x000000FF, 0x0000FF00, 0x00FF0000, 0xFF000000);
    /// `B8G8R8A8` / `A8R8G8B8`: bytes in B, G, R, A order.
    pub const B8G8R8A8: Self = Self::rgb(32, 0x00FF0000, 0x0000FF00, 0x000000FF, 0xFF000000);
    /// `X8R8G8B8`: as [`Self::B8G8R8A8`], fourth byte unused.
    pub const B8G8R8X8: Self = Self::rgb(32, 0x00FF0000, 0x0000FF00, 0x000000FF, 0);
    /// `R5G6B5`
    pub const R5G6B5: Self = Self::rgb(16, 0xF800, 0x07E0, 0x001F, 0);
    /// `A4R4G4B4`
    pub const A4R4G4B4: Self = Self::rgb(16, 0x0F00, 0x00F0, 0x000F, 0xF000);
    /// `L8`
    pub const L8: Self = Self {
        kind: LayoutKind::Luminance,
        bits_per_pixel: 8,
        r_mask: 0xFF,
        g_mask: 0,
        b_mask: 0,
        a_mask: 0,
    };
    /// `A8L8`
    pub const A8L8: Self = Self {
        kind: LayoutKind::Luminance,
        bits_per_pixel: 16,
        r_mask: 0x00FF,
        g_mask: 0,
        b_mask: 0,
        a_mask: 0xFF00,
    };

    const fn rgb(bits_per_pixel: u32, r_mask: u32, g_mask: u32, b_mask: u32, a_mask: u32) -> Self {
        Self {
            kind: LayoutKind::Rgb,
            bits_per_pixel,
            r_mask,
            g_mask,
            b_mask,
            a_mask,
        }
    }

    /// Bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel / 8) as usize
    }
}

/// Pixel data format of a DDS file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdsFormat {
    /// 4x4 block compression (BC1-BC3).
    Block(BlockFormat),
    /// Uncompressed pixels described by bit masks.
    Uncompressed(PixelLayout),
}

impl DdsFormat {
    /// Bytes used by a single `width` x `height` surface, or [`None`] if that overflows `usize`.
    pub fn surface_size(&self, width: u32, height: u32) -> Option<usize> {
        match self {
            Self::Block(format) => format.checked_compressed_size(width, height),
            Self::Uncompressed(layout) => (width as usize)
                .checked_mul(height as usize)?
                .checked_mul(layout.bytes_per_pixel()),
        }
    }
}

/// The information of the DDS file supplied to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsInfo {
    pub format: DdsFormat,
    pub width: u32,
    pub height: u32,
    /// Number of mip levels stored; at least 1.
    pub mipmap_count: u32,
    /// Offset of the top mip level.
    pub data_offset: usize,
    /// Length of the top mip level.
    pub data_length: usize,
}

/// Reads a little endian `u32` header field.
#[inline(always)]
fn read_u32(data: &[u8], offset: usize) -> u32 {
    assert!(offset + 4 <= data.len(), "header read out of bounds");
    // SAFETY: We checked offset + 4 <= data.len() above.
    unsafe { LittleEndianReader::new(data.as_ptr()).read_u32_at(offset as isize) }
}

/// Parses the header of a DDS file.
///
/// # Errors
///
/// - [`DdsError::NotADds`] if the magic or a full header is missing
/// - [`DdsError::InvalidHeader`] for a malformed header, including dimensions too large to address
/// - [`DdsError::ZeroDimensions`] if width or height is zero
/// - [`DdsError::UnsupportedFormat`] for layouts other than BC1-BC3 and bit-mask layouts
/// - [`DdsError::InputTooShortForStatedTextureSize`] if the top mip level is truncated
///
/// # Notes
///
/// For DX10 headers, the `DXGI_FORMAT` field determines the format.
pub fn parse_dds(data: &[u8]) -> Result<DdsInfo, DdsError> {
    if !likely_dds(data) {
        return Err(DdsError::NotADds);
    }

    if read_u32(data, DDS_SIZE_OFFSET) != DDS_HEADER_STRUCT_SIZE {
        return Err(DdsError::InvalidHeader("header size is not 124"));
    }

    let flags = read_u32(data, DDS_FLAGS_OFFSET);
    let height = read_u32(data, DDS_HEIGHT_OFFSET);
    let width = read_u32(data, DDS_WIDTH_OFFSET);
    let raw_mipmap_count = read_u32(data, DDS_MIPMAP_COUNT_OFFSET);
    if width == 0 || height == 0 {
        return Err(DdsError::ZeroDimensions);
    }

    let fourcc = read_u32(data, FOURCC_OFFSET);
    let (format, data_offset) = if fourcc == FOURCC_DX10 {
        // DX10 header present, ensure the data is long enough.
        if data.len() < DDS_HEADER_SIZE + DX10_HEADER_SIZE {
            return Err(DdsError::InputTooShortForStatedTextureSize {
                needed: DDS_HEADER_SIZE + DX10_HEADER_SIZE,
                actual: data.len(),
            });
        }
        let format = parse_dxgi_format(read_u32(data, DX10_FORMAT_OFFSET))?;

        // 148 bytes: 128 byte header + 20 byte DX10 header
        (format, DDS_HEADER_SIZE + DX10_HEADER_SIZE)
    } else {
        (parse_legacy_format(data, fourcc)?, DDS_HEADER_SIZE)
    };

    let mipmap_count = if (flags & DDSD_MIPMAPCOUNT) != 0 {
        raw_mipmap_count.max(1)
    } else {
        1
    };

    let data_length = format
        .surface_size(width, height)
        .ok_or(DdsError::InvalidHeader("texture size overflows"))?;
    let needed = data_offset
        .checked_add(data_length)
        .ok_or(DdsError::InvalidHeader("texture size overflows"))?;
    if data.len() < needed {
        return Err(DdsError::InputTooShortForStatedTextureSize {
            needed,
            actual: data.len(),
        });
    }

    Ok(DdsInfo {
        format,
        width,
        height,
        mipmap_count,
        data_offset,
        data_length,
    })
}

fn parse_dxgi_format(dxgi_format: u32) -> Result<DdsFormat, DdsError> {
    let format = match dxgi_format {
        DXGI_FORMAT_BC1_TYPELESS | DXGI_FORMAT_BC1_UNORM | DXGI_FORMAT_BC1_UNORM_SRGB => {
            DdsFormat::Block(BlockFormat::Bc1)
        }
        DXGI_FORMAT_BC2_TYPELESS | DXGI_FORMAT_BC2_UNORM | DXGI_FORMAT_BC2_UNORM_SRGB => {
            DdsFormat::Block(BlockFormat::Bc2)
        }
        DXGI_FORMAT_BC3_TYPELESS | DXGI_FORMAT_BC3_UNORM | DXGI_FORMAT_BC3_UNORM_SRGB => {
            DdsFormat::Block(BlockFormat::Bc3)
        }
        DXGI_FORMAT_R8G8B8A8_TYPELESS
        | DXGI_FORMAT_R8G8B8A8_UNORM
        | DXGI_FORMAT_R8G8B8A8_UNORM_SRGB => DdsFormat::Uncompressed(PixelLayout::R8G8B8A8),
        DXGI_FORMAT_B8G8R8A8_UNORM
        | DXGI_FORMAT_B8G8R8A8_TYPELESS
        | DXGI_FORMAT_B8G8R8A8_UNORM_SRGB => DdsFormat::Uncompressed(PixelLayout::B8G8R8A8),
        other => return Err(DdsError::UnsupportedFormat(format!("DXGI format {other}"))),
    };
    Ok(format)
}

/// Legacy header - check pixel format flags to determine format type
fn parse_legacy_format(data: &[u8], fourcc: u32) -> Result<DdsFormat, DdsError> {
    let pixel_flags = read_u32(data, DDS_PIXELFORMAT_FLAGS_OFFSET);

    if (pixel_flags & DDPF_FOURCC) != 0 {
        return match fourcc {
            FOURCC_DXT1 => Ok(DdsFormat::Block(BlockFormat::Bc1)),
            FOURCC_DXT2 | FOURCC_DXT3 => Ok(DdsFormat::Block(BlockFormat::Bc2)),
            FOURCC_DXT4 | FOURCC_DXT5 => Ok(DdsFormat::Block(BlockFormat::Bc3)),
            _ => Err(DdsError::UnsupportedFormat(format!(
                "FourCC '{}'",
                String::from_utf8_lossy(&data[FOURCC_OFFSET..FOURCC_OFFSET + 4])
            ))),
        };
    }

    if (pixel_flags & DDPF_YUV) != 0 {
        return Err(DdsError::UnsupportedFormat("YUV".to_string()));
    }

    let kind = if (pixel_flags & DDPF_RGB) != 0 {
        LayoutKind::Rgb
    } else if (pixel_flags & DDPF_LUMINANCE) != 0 {
        LayoutKind::Luminance
    } else if (pixel_flags & DDPF_ALPHA) != 0 {
        LayoutKind::AlphaOnly
    } else {
        return Err(DdsError::InvalidHeader("pixel format flags name no layout"));
    };

    let bits_per_pixel = read_u32(data, DDS_PIXELFORMAT_RGBBITCOUNT_OFFSET);
    if !matches!(bits_per_pixel, 8 | 16 | 24 | 32) {
        return Err(DdsError::UnsupportedFormat(format!(
            "{bits_per_pixel}-bit pixels"
        )));
    }

    let has_alpha = kind == LayoutKind::AlphaOnly || (pixel_flags & DDPF_ALPHAPIXELS) != 0;
    let (r_mask, g_mask, b_mask) = match kind {
        LayoutKind::Rgb => (
            read_u32(data, DDS_PIXELFORMAT_RBITMASK_OFFSET),
            read_u32(data, DDS_PIXELFORMAT_GBITMASK_OFFSET),
            read_u32(data, DDS_PIXELFORMAT_BBITMASK_OFFSET),
        ),
        LayoutKind::Luminance => (read_u32(data, DDS_PIXELFORMAT_RBITMASK_OFFSET), 0, 0),
        LayoutKind::AlphaOnly => (0, 0, 0),
    };
    let a_mask = if has_alpha {
        read_u32(data, DDS_PIXELFORMAT_ABITMASK_OFFSET)
    } else {
        0
    };

    Ok(DdsFormat::Uncompressed(PixelLayout {
        kind,
        bits_per_pixel,
        r_mask,
        g_mask,
        b_mask,
        a_mask,
    }))
}
