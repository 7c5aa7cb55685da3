//! Alpha flattening and stretching.
//!
//! Both transforms build a new [`Surface`]; the source is never modified. RGB channels are
//! carried over untouched.

use crate::classify::{classify_alpha, AlphaClass};
use crate::policy::AlphaPolicy;
use transparency_patch_common::surface::Surface;

/// Result of [`normalize_alpha`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlphaOutcome {
    /// Nothing to do; the original texture bytes can be reused.
    Unchanged,
    /// Transparency was negligible; every alpha is now 255.
    Flattened(Surface),
    /// Transparency was significant; alpha was stretched and must be stored.
    Stretched(Surface),
}

impl AlphaOutcome {
    /// Whether the result keeps a gradient and so needs an alpha-capable output format.
    #[inline]
    pub fn needs_alpha(&self) -> bool {
        matches!(self, Self::Stretched(_))
    }

    /// The transformed surface, or [`None`] for [`AlphaOutcome::Unchanged`].
    pub fn surface(&self) -> Option<&Surface> {
        match self {
            Self::Unchanged => None,
            Self::Flattened(surface) | Self::Stretched(surface) => Some(surface),
        }
    }

    /// Consumes the outcome, returning the transformed surface if any.
    pub fn into_surface(self) -> Option<Surface> {
        match self {
            Self::Unchanged => None,
            Self::Flattened(surface) | Self::Stretched(surface) => Some(surface),
        }
    }
}

/// Returns a copy of `surface` with every alpha set to 255.
pub fn flatten_alpha(surface: &Surface) -> Surface {
    surface.map_alpha(|_| u8::MAX)
}

/// Stretched value of a single alpha: `clamp(round(alpha / threshold), 0, 255)`.
///
/// ```
/// use transparency_patch_alpha::stretched_alpha_value;
///
/// assert_eq!(stretched_alpha_value(50, 0.4), 125);
/// assert_eq!(stretched_alpha_value(200, 0.4), 255);
/// ```
#[inline]
pub fn stretched_alpha_value(alpha: u8, threshold: f64) -> u8 {
    (alpha as f64 / threshold).round().clamp(0.0, 255.0) as u8
}

/// Returns a copy of `surface` with every alpha divided by `threshold`, rounded and
/// clamped to 255.
///
/// Alphas at or above `threshold * 255` become fully opaque; lower alphas keep their
/// relative gradient.
pub fn stretch_alpha(surface: &Surface, threshold: f64) -> Surface {
    // 256-entry table; textures are far larger than that.
    let table: [u8; 256] = core::array::from_fn(|a| stretched_alpha_value(a as u8, threshold));
    surface.map_alpha(|a| table[a as usize])
}

/// Classifies `surface` under `policy` and applies the matching transform.
///
/// A stretch that reproduces the source exactly (every alpha already 0 or 255, or a
/// threshold of 1) is reported as [`AlphaOutcome::Unchanged`].
pub fn normalize_alpha(surface: &Surface, policy: &AlphaPolicy) -> AlphaOutcome {
    match classify_alpha(surface, policy) {
        AlphaClass::Opaque => AlphaOutcome::Unchanged,
        AlphaClass::Flatten => AlphaOutcome::Flattened(flatten_alpha(surface)),
        AlphaClass::Stretch => {
            let stretched = stretch_alpha(surface, policy.effective_threshold());
            if stretched == *surface {
                AlphaOutcome::Unchanged
            } else {
                AlphaOutcome::Stretched(stretched)
            }
        }
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
            .enumerate()
            .map(|(i, &a)| Color8888::new(i as u8, 100, 200, a))
            .collect();
        Surface::new(alphas.len() as u32, 1, pixels).unwrap()
    }

    fn alphas(surface: &Surface) -> Vec<u8> {
        surface.pixels().iter().map(|p| p.a).collect()
    }

    #[test]
    fn opaque_surface_is_unchanged() {
        let surface = surface_with_alphas(&[255; 16]);
        assert_eq!(
            normalize_alpha(&surface, &AlphaPolicy::default()),
            AlphaOutcome::Unchanged
        );
    }

    #[test]
    fn negligible_transparency_is_flattened() {
        let surface = surface_with_alphas(&[255, 200, 102, 254]);
        let outcome = normalize_alpha(&surface, &AlphaPolicy::default());

        assert!(!outcome.needs_alpha());
        let AlphaOutcome::Flattened(flat) = outcome else {
            panic!("expected flattened outcome, got {outcome:?}");
        };
        assert_eq!(alphas(&flat), [255, 255, 255, 255]);
        for (before, after) in surface.pixels().iter().zip(flat.pixels()) {
            assert_eq!(before.without_alpha(), after.without_alpha());
        }
    }

    #[test]
    fn significant_transparency_is_stretched() {
        let surface = surface_with_alphas(&[50, 200, 0, 255, 101]);
        let outcome = normalize_alpha(&surface, &AlphaPolicy::default());

        assert!(outcome.needs_alpha());
        let stretched = outcome.into_surface().unwrap();
        assert_eq!(alphas(&stretched), [125, 255, 0, 255, 253]);
        for (before, after) in surface.pixels().iter().zip(stretched.pixels()) {
            assert_eq!(before.without_alpha(), after.without_alpha());
        }
    }

    #[test]
    fn binary_alpha_stretch_is_unchanged() {
        let surface = surface_with_alphas(&[0, 255, 0, 255]);
        assert_eq!(
            normalize_alpha(&surface, &AlphaPolicy::default()),
            AlphaOutcome::Unchanged
        );
    }

    #[test]
    fn threshold_of_one_leaves_gradients_alone() {
        let surface = surface_with_alphas(&[10, 128, 255]);
        let policy = AlphaPolicy::new(true, 1.0).unwrap();
        assert_eq!(normalize_alpha(&surface, &policy), AlphaOutcome::Unchanged);
    }

    #[test]
    fn disabled_gradients_flatten_everything_translucent() {
        let surface = surface_with_alphas(&[0, 50, 255]);
        let policy = AlphaPolicy::new(false, 0.4).unwrap();
        let outcome = normalize_alpha(&surface, &policy);

        assert!(!outcome.needs_alpha());
        assert_eq!(alphas(outcome.surface().unwrap()), [255, 255, 255]);
    }

    #[test]
    fn source_is_not_modified() {
        let surface = surface_with_alphas(&[50, 200]);
        let copy = surface.clone();
        let _ = normalize_alpha(&surface, &AlphaPolicy::default());
        assert_eq!(surface, copy);
    }

    #[rstest]
    #[case(0, 0.4, 0)]
    #[case(50, 0.4, 125)]
    #[case(101, 0.4, 253)]
    #[case(102, 0.4, 255)]
    #[case(255, 0.4, 255)]
    #[case(1, 0.4, 3)] // 2.5 rounds away from zero
    #[case(64, 0.5, 128)]
    #[case(200, 1.0, 200)]
    fn stretched_values(#[case] alpha: u8, #[case] threshold: f64, #[case] expected: u8) {
        assert_eq!(stretched_alpha_value(alpha, threshold), expected);
    }

    #[test]
    fn stretch_matches_formula_for_every_alpha() {
        let all: Vec<u8> = (0..=255).collect();
        let surface = surface_with_alphas(&all);
        let stretched = stretch_alpha(&surface, 0.4);
        for (a, out) in all.iter().zip(alphas(&stretched)) {
            let expected = (*a as f64 / 0.4).round().min(255.0) as u8;
            assert_eq!(out, expected, "alpha {a}");
        }
    }
}
