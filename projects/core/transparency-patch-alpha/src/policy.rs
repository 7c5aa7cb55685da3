use crate::error::AlphaError;

/// How transparency is treated across a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaPolicy {
    preserve_gradients: bool,
    threshold: f64,
}

impl AlphaPolicy {
    /// Threshold used when none is configured.
    pub const DEFAULT_THRESHOLD: f64 = 0.4;

    /// Creates a policy.
    ///
    /// # Parameters
    ///
    /// - `preserve_gradients`: keep significant transparency by stretching alpha instead of flattening it
    /// - `threshold`: divides negligible from significant transparency, in `(0, 1]`
    ///
    /// # Errors
    ///
    /// [`AlphaError::InvalidThreshold`] if `threshold` is not in `(0, 1]` (NaN included).
    pub fn new(preserve_gradients: bool, threshold: f64) -> Result<Self, AlphaError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(AlphaError::InvalidThreshold(threshold));
        }
        Ok(Self {
            preserve_gradients,
            threshold,
        })
    }

    /// Whether gradient preservation is enabled.
    #[inline]
    pub fn preserve_gradients(&self) -> bool {
        self.preserve_gradients
    }

    /// The configured threshold, regardless of [`Self::preserve_gradients`].
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The threshold the classifier compares against: the configured one when
    /// gradients are preserved, `0` otherwise.
    #[inline]
    pub fn effective_threshold(&self) -> f64 {
        if self.preserve_gradients {
            self.threshold
        } else {
            0.0
        }
    }

    /// Alpha values strictly below this are "significant" transparency.
    #[inline]
    pub fn alpha_cutoff(&self) -> f64 {
        self.effective_threshold() * 255.0
    }
}

impl Default for AlphaPolicy {
    fn default() -> Self {
        Self {
            preserve_gradients: true,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}
