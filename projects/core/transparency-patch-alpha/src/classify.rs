//! Alpha channel scan.

use crate::policy::AlphaPolicy;
use transparency_patch_common::surface::Surface;

/// What the alpha channel of a surface calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaClass {
    /// Every pixel is fully opaque.
    Opaque,

    /// Some pixels are translucent but none fall below the policy cutoff;
    /// the transparency is negligible and can be dropped.
    Flatten,

    /// At least one pixel falls below the policy cutoff; the gradient must be kept.
    Stretch,
}

/// Scans every pixel of `surface` and classifies its alpha channel against `policy`.
///
/// A pixel is "below threshold" when `alpha < threshold * 255`, using the policy's
/// effective threshold. With gradients disabled that is `0`, so [`AlphaClass::Stretch`]
/// cannot be returned.
pub fn classify_alpha(surface: &Surface, policy: &AlphaPolicy) -> AlphaClass {
    let cutoff = policy.alpha_cutoff();
    let mut any_non_opaque = false;

    for pixel in surface.pixels() {
        if (pixel.a as f64) < cutoff {
            return AlphaClass::Stretch;
        }
        any_non_opaque |= !pixel.is_opaque();
    }

    if any_non_opaque {
        AlphaClass::Flatten
    } else {
        AlphaClass::Opaque
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use transparency_patch_common::color_8888::Color8888;

    fn surface_with_alphas(alphas: &[u8]) -> Surface {
        let pixels = alphas
            .iter()
            .map(|&a| Color8888::new(10, 20, 30, a))
            .collect();
        Surface::new(alphas.len() as u32, 1, pixels).unwrap()
    }

    #[rstest]
    #[case(&[255, 255, 255], AlphaClass::Opaque)]
    #[case(&[255, 200, 255], AlphaClass::Flatten)]
    #[case(&[102, 254], AlphaClass::Flatten)] // 102 == 0.4 * 255, not below
    #[case(&[255, 101], AlphaClass::Stretch)]
    #[case(&[0, 255], AlphaClass::Stretch)]
    #[case(&[200, 50, 255], AlphaClass::Stretch)]
    fn classifies_against_default_threshold(#[case] alphas: &[u8], #[case] expected: AlphaClass) {
        let policy = AlphaPolicy::default();
        assert_eq!(classify_alpha(&surface_with_alphas(alphas), &policy), expected);
    }

    #[rstest]
    #[case(&[255, 255], AlphaClass::Opaque)]
    #[case(&[0, 255], AlphaClass::Flatten)]
    #[case(&[50, 200], AlphaClass::Flatten)]
    fn disabled_gradients_never_stretch(#[case] alphas: &[u8], #[case] expected: AlphaClass) {
        let policy = AlphaPolicy::new(false, 0.4).unwrap();
        assert_eq!(classify_alpha(&surface_with_alphas(alphas), &policy), expected);
    }

    #[test]
    fn threshold_of_one_stretches_any_translucency() {
        let policy = AlphaPolicy::new(true, 1.0).unwrap();
        assert_eq!(
            classify_alpha(&surface_with_alphas(&[254]), &policy),
            AlphaClass::Stretch
        );
    }
}
