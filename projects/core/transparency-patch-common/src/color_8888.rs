/// Represents a single RGBA8888 pixel colour of a decoded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// Each parameter represents the intensity of its corresponding colour channel (0–255).
    ///
    /// # Examples
    ///
    /// ```
    /// use transparency_patch_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.g, 0);
    /// assert_eq!(pixel.b, 0);
    /// assert_eq!(pixel.a, 255);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns a copy of this pixel with the alpha component replaced.
    ///
    /// ```
    /// use transparency_patch_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(10, 20, 30, 40).with_alpha(255);
    /// assert_eq!(pixel, Color8888::new(10, 20, 30, 255));
    /// ```
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Returns `true` if the pixel is fully opaque (alpha == 255).
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Returns the pixel with alpha cleared, for colour-only comparisons.
    #[inline]
    pub const fn without_alpha(self) -> Self {
        self.with_alpha(0)
    }

    /// Rec. 601 luma of the pixel, as written to luminance surfaces.
    ///
    /// ```
    /// use transparency_patch_common::color_8888::Color8888;
    ///
    /// assert_eq!(Color8888::new(255, 255, 255, 0).luminance(), 255);
    /// assert_eq!(Color8888::new(0, 0, 0, 255).luminance(), 0);
    /// ```
    #[inline]
    pub fn luminance(&self) -> u8 {
        let luma = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        ((luma + 500) / 1000) as u8
    }
}
