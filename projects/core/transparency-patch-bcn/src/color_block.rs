//! The 8-byte colour half shared by BC1, BC2 and BC3 blocks.

use transparency_patch_common::{color_565::Color565, color_8888::Color8888};

/// Whether a colour half may switch to three-colour + transparent mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColourMode {
    /// BC1: `c0 <= c1` selects three colours plus transparent black.
    Bc1,
    /// BC2/BC3: always four colours, regardless of endpoint order.
    FourColourOnly,
}

/// Decoded colour half: the 4-entry palette and the 32 bits of 2-bit indices.
pub(crate) struct ColourHalf {
    pub palette: [Color8888; 4],
    pub indices: u32,
}

impl ColourHalf {
    /// Reads the colour half from the first 8 bytes of `src`.
    ///
    /// `src` must be at least 8 bytes long.
    #[inline(always)]
    pub fn read(src: &[u8], mode: ColourMode) -> Self {
        let c0_raw = u16::from_le_bytes([src[0], src[1]]);
        let c1_raw = u16::from_le_bytes([src[2], src[3]]);
        let indices = u32::from_le_bytes([src[4], src[5], src[6], src[7]]);

        let c0 = Color565::from_raw(c0_raw);
        let c1 = Color565::from_raw(c1_raw);
        let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
        let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);

        let mut palette = [
            c0.to_color_8888(),
            c1.to_color_8888(),
            Color8888::default(),
            Color8888::default(),
        ];

        if mode == ColourMode::FourColourOnly || c0.raw_value() > c1.raw_value() {
            // Four-color block
            palette[2] = Color8888::new(
                ((2 * r0 + r1) / 3) as u8,
                ((2 * g0 + g1) / 3) as u8,
                ((2 * b0 + b1) / 3) as u8,
                255,
            );
            palette[3] = Color8888::new(
                ((r0 + 2 * r1) / 3) as u8,
                ((g0 + 2 * g1) / 3) as u8,
                ((b0 + 2 * b1) / 3) as u8,
                255,
            );
        } else {
            // Three-color block
            palette[2] = Color8888::new(
                ((r0 + r1) / 2) as u8,
                ((g0 + g1) / 2) as u8,
                ((b0 + b1) / 2) as u8,
                255,
            );
            palette[3] = Color8888::new(0, 0, 0, 0); // Transparent black
        }

        Self { palette, indices }
    }

    /// Palette entry for the pixel at `pixel_index` (0-15, row-major).
    #[inline(always)]
    pub fn pixel(&self, pixel_index: usize) -> Color8888 {
        let idx = (self.indices >> (pixel_index * 2)) & 0x3;
        self.palette[idx as usize]
    }
}
