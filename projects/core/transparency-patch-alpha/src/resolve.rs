//! Output format resolution.

use crate::error::FormatResolveError;
use transparency_patch_common::texture_format::TextureFormat;

/// Picks the format a texture is written in.
///
/// When `needs_alpha` is set, non-alpha formats are swapped for their alpha-capable
/// sibling; alpha-capable formats are returned as-is, so the lookup is idempotent.
///
/// # Errors
///
/// [`FormatResolveError::NoAlphaSibling`] when an alpha channel is needed but `nominal`
/// has no alpha-capable counterpart.
pub fn resolve_format(
    nominal: TextureFormat,
    needs_alpha: bool,
) -> Result<TextureFormat, FormatResolveError> {
    if !needs_alpha || nominal.is_alpha_capable() {
        return Ok(nominal);
    }
    nominal
        .alpha_sibling()
        .ok_or(FormatResolveError::NoAlphaSibling(nominal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TextureFormat::Dxt1, TextureFormat::Dxt5)]
    #[case(TextureFormat::Luminance, TextureFormat::LuminanceAlpha)]
    #[case(TextureFormat::Rgb565, TextureFormat::Rgba4444)]
    #[case(TextureFormat::Rgb, TextureFormat::Rgba)]
    fn upgrades_when_alpha_is_needed(#[case] nominal: TextureFormat, #[case] expected: TextureFormat) {
        assert_eq!(resolve_format(nominal, true), Ok(expected));
    }

    #[test]
    fn keeps_format_when_alpha_is_not_needed() {
        for format in TextureFormat::all_values() {
            assert_eq!(resolve_format(*format, false), Ok(*format));
        }
    }

    #[test]
    fn is_idempotent() {
        for format in TextureFormat::all_values() {
            let once = resolve_format(*format, true).unwrap();
            assert_eq!(resolve_format(once, true), Ok(once));
        }
    }
}
