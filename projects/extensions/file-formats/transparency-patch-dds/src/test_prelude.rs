//! Common test imports and utilities for DDS tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

// External crates commonly used in tests
pub use rstest::rstest;

use crate::dds::constants::*;
use crate::dds::parse_dds::{LayoutKind, PixelLayout};
use endian_writer::{EndianWriter, LittleEndianWriter};

/// Total size of DDS header + DX10 header (used in tests)
pub const DDS_DX10_TOTAL_HEADER_SIZE: usize = DDS_HEADER_SIZE + DX10_HEADER_SIZE;

#[derive(Debug, Clone, Copy)]
enum PixelFormatSpec {
    FourCC([u8; 4]),
    Dx10(u32),
    Layout(PixelLayout),
}

/// Builds DDS files for tests, field by field.
#[derive(Debug, Clone, Copy)]
pub struct DdsBuilder {
    width: u32,
    height: u32,
    mipmaps: u32,
    pixel_format: PixelFormatSpec,
}

impl DdsBuilder {
    /// A `DXT1` file of the given size with no mipmaps.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mipmaps: 1,
            pixel_format: PixelFormatSpec::FourCC(*b"DXT1"),
        }
    }

    pub fn fourcc(mut self, fourcc: &[u8; 4]) -> Self {
        self.pixel_format = PixelFormatSpec::FourCC(*fourcc);
        self
    }

    pub fn dx10(mut self, dxgi_format: u32) -> Self {
        self.pixel_format = PixelFormatSpec::Dx10(dxgi_format);
        self
    }

    pub fn layout(mut self, layout: PixelLayout) -> Self {
        self.pixel_format = PixelFormatSpec::Layout(layout);
        self
    }

    pub fn mipmaps(mut self, count: u32) -> Self {
        self.mipmaps = count;
        self
    }

    /// Builds the file with `data_len` bytes of patterned texture data.
    pub fn build_with_data(self, data_len: usize) -> Vec<u8> {
        let payload: Vec<u8> = (0..data_len).map(|x| (x % 256) as u8).collect();
        self.build(&payload)
    }

    /// Builds the file with `payload` as the texture data.
    pub fn build(self, payload: &[u8]) -> Vec<u8> {
        let header_size = match self.pixel_format {
            PixelFormatSpec::Dx10(_) => DDS_DX10_TOTAL_HEADER_SIZE,
            _ => DDS_HEADER_SIZE,
        };
        let mut data = vec![0u8; header_size];

        let mut flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_LINEARSIZE;
        if self.mipmaps > 1 {
            flags |= DDSD_MIPMAPCOUNT;
        }

        // SAFETY: Every offset written below lies within the header allocated above.
        unsafe {
            let mut writer = LittleEndianWriter::new(data.as_mut_ptr());
            writer.write_u32_at(DDS_MAGIC, 0);
            writer.write_u32_at(DDS_HEADER_STRUCT_SIZE, DDS_SIZE_OFFSET as isize);
            writer.write_u32_at(flags, DDS_FLAGS_OFFSET as isize);
            writer.write_u32_at(self.height, DDS_HEIGHT_OFFSET as isize);
            writer.write_u32_at(self.width, DDS_WIDTH_OFFSET as isize);
            if self.mipmaps > 1 {
                writer.write_u32_at(self.mipmaps, DDS_MIPMAP_COUNT_OFFSET as isize);
            }
            writer.write_u32_at(DDS_PIXELFORMAT_STRUCT_SIZE, DDS_PIXELFORMAT_OFFSET as isize);

            match self.pixel_format {
                PixelFormatSpec::FourCC(fourcc) => {
                    writer.write_u32_at(DDPF_FOURCC, DDS_PIXELFORMAT_FLAGS_OFFSET as isize);
                    writer.write_u32_at(u32::from_le_bytes(fourcc), FOURCC_OFFSET as isize);
                }
                PixelFormatSpec::Dx10(dxgi_format) => {
                    writer.write_u32_at(DDPF_FOURCC, DDS_PIXELFORMAT_FLAGS_OFFSET as isize);
                    writer.write_u32_at(FOURCC_DX10, FOURCC_OFFSET as isize);
                    writer.write_u32_at(dxgi_format, DX10_FORMAT_OFFSET as isize);
                }
                PixelFormatSpec::Layout(layout) => {
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

            writer.write_u32_at(DDSCAPS_TEXTURE, DDS_CAPS_OFFSET as isize);
        }

        data.extend_from_slice(payload);
        data
    }
}
