//! Decoded texture images.
//!
//! A [`Surface`] is a width x height grid of [`Color8888`] pixels stored in row-major
//! order. Decoders produce one, the alpha normalizer derives new ones from it, and the
//! encoders consume it. A surface is never mutated after construction by the pipeline;
//! transforms always build a new buffer.

use crate::color_8888::Color8888;
use crate::decoded_4x4_block::Decoded4x4Block;
use thiserror::Error;

/// Errors raised when building a [`Surface`] from raw data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// The pixel buffer does not hold exactly `width * height` pixels.
    #[error("Pixel buffer holds {actual} pixels, expected {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// Either dimension is zero.
    #[error("Surface dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
}

/// A decoded texture image with 8-bit RGBA channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Color8888>,
}

impl Surface {
    /// Creates a surface from row-major pixels.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::ZeroDimensions`] if either dimension is zero,
    /// [`SurfaceError::SizeMismatch`] if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Color8888>) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroDimensions { width, height });
        }
        if pixels.len() != width as usize * height as usize {
            return Err(SurfaceError::SizeMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a surface where every pixel has the same colour.
    ///
    /// ```
    /// use transparency_patch_common::color_8888::Color8888;
    /// use transparency_patch_common::surface::Surface;
    ///
    /// let surface = Surface::filled(2, 3, Color8888::new(1, 2, 3, 4)).unwrap();
    /// assert_eq!(surface.pixels().len(), 6);
    /// ```
    pub fn filled(width: u32, height: u32, pixel: Color8888) -> Result<Self, SurfaceError> {
        Self::new(width, height, vec![pixel; width as usize * height as usize])
    }

    /// Creates a surface from tightly packed RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, SurfaceError> {
        if bytes.len() % 4 != 0 {
            return Err(SurfaceError::SizeMismatch {
                width,
                height,
                actual: bytes.len() / 4,
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| Color8888::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels.
    #[inline]
    pub fn pixels(&self) -> &[Color8888] {
        &self.pixels
    }

    /// Gets the pixel at `(x, y)`, or [`None`] when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color8888> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Returns a new surface with `f` applied to every alpha value; RGB is kept.
    pub fn map_alpha(&self, mut f: impl FnMut(u8) -> u8) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self
                .pixels
                .iter()
                .map(|p| p.with_alpha(f(p.a)))
                .collect(),
        }
    }

    /// Copies a decoded 4x4 block into the surface with its top-left corner at
    /// block coordinates `(block_x, block_y)`. Pixels past the surface edge are dropped,
    /// as happens for textures whose dimensions are not multiples of four.
    pub fn write_block(&mut self, block_x: u32, block_y: u32, block: &Decoded4x4Block) {
        for y in 0..4u32 {
            let py = block_y * 4 + y;
            if py >= self.height {
                break;
            }
            for x in 0..4u32 {
                let px = block_x * 4 + x;
                if px >= self.width {
                    break;
                }
                let index = py as usize * self.width as usize + px as usize;
                self.pixels[index] = block.get_pixel(x as usize, y as usize);
            }
        }
    }

    /// Tightly packed RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .collect()
    }

    /// Tightly packed RGB8 bytes (alpha dropped).
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }
}
