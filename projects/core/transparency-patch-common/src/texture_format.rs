//! Output texture formats.
//!
//! A [`TextureFormat`] names the layout a patched texture is written in. Four of the
//! formats carry no alpha channel; each has an alpha-capable sibling that is used when a
//! texture must keep a transparency gradient.
//!
//! | nominal            | alpha-capable sibling    |
//! |--------------------|--------------------------|
//! | [`TextureFormat::Dxt1`]      | [`TextureFormat::Dxt5`]            |
//! | [`TextureFormat::Luminance`] | [`TextureFormat::LuminanceAlpha`]  |
//! | [`TextureFormat::Rgb565`]    | [`TextureFormat::Rgba4444`]        |
//! | [`TextureFormat::Rgb`]       | [`TextureFormat::Rgba`]            |

use core::fmt;
use derive_enum_all_values::AllValues;

/// The formats a patched texture can be encoded in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum TextureFormat {
    /// BC1 block compression, 1-bit alpha at most (treated as opaque).
    Dxt1,
    /// BC3 block compression with interpolated alpha.
    Dxt5,
    /// 8-bit luminance (`L8`).
    Luminance,
    /// 8-bit luminance with 8-bit alpha (`A8L8`).
    LuminanceAlpha,
    /// 16-bit `R5G6B5`.
    Rgb565,
    /// 16-bit `A4R4G4B4`.
    Rgba4444,
    /// 32-bit `X8R8G8B8`.
    Rgb,
    /// 32-bit `A8R8G8B8`.
    Rgba,
}

impl TextureFormat {
    /// Parses a format token as written in rule files.
    ///
    /// Tokens are trimmed and compared case-insensitively. Unknown tokens yield [`None`]
    /// so callers fall back to their default format.
    ///
    /// ```
    /// use transparency_patch_common::texture_format::TextureFormat;
    ///
    /// assert_eq!(TextureFormat::from_token(" DXT1 "), Some(TextureFormat::Dxt1));
    /// assert_eq!(TextureFormat::from_token("8880"), Some(TextureFormat::Rgb));
    /// assert_eq!(TextureFormat::from_token("bc7"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        let format = match token.as_str() {
            "dxt1" => Self::Dxt1,
            "dxt" | "dxt5" => Self::Dxt5,
            "l" | "lum" | "luminance" => Self::Luminance,
            "la" | "lumalpha" | "luminancealpha" => Self::LuminanceAlpha,
            "rgb565" | "rgb5650" | "565" | "5650" => Self::Rgb565,
            "rgba4444" | "4444" => Self::Rgba4444,
            "rgba" | "rgba8888" | "8888" => Self::Rgba,
            "rgb" | "rgb888" | "rgba8880" | "888" | "8880" => Self::Rgb,
            _ => return None,
        };
        Some(format)
    }

    /// Returns `true` if the format stores an alpha channel that can hold a gradient.
    pub fn is_alpha_capable(self) -> bool {
        matches!(
            self,
            Self::Dxt5 | Self::LuminanceAlpha | Self::Rgba4444 | Self::Rgba
        )
    }

    /// The alpha-capable counterpart of this format.
    ///
    /// Alpha-capable formats map to themselves. [`None`] means the format has no sibling.
    pub fn alpha_sibling(self) -> Option<Self> {
        match self {
            Self::Dxt1 => Some(Self::Dxt5),
            Self::Luminance => Some(Self::LuminanceAlpha),
            Self::Rgb565 => Some(Self::Rgba4444),
            Self::Rgb => Some(Self::Rgba),
            other if other.is_alpha_capable() => Some(other),
            _ => None,
        }
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dxt1 => "DXT1",
            Self::Dxt5 => "DXT5",
            Self::Luminance => "L8",
            Self::LuminanceAlpha => "A8L8",
            Self::Rgb565 => "R5G6B5",
            Self::Rgba4444 => "A4R4G4B4",
            Self::Rgb => "X8R8G8B8",
            Self::Rgba => "A8R8G8B8",
        };
        f.write_str(name)
    }
}
