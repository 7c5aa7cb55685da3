//! Run-wide settings, fixed before the first car is processed.

use crate::error::PatchError;
use transparency_patch_alpha::{resolve_format, AlphaPolicy};
use transparency_patch_bcn::EncodeQuality;
use transparency_patch_common::texture_format::TextureFormat;
use transparency_patch_dds::dds::DdsEncodeOptions;

/// Settings shared by every texture of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchConfig {
    alpha: AlphaPolicy,
    default_format: TextureFormat,
    quality: EncodeQuality,
    mipmaps: bool,
    pack_as_mod: bool,
}

impl PatchConfig {
    pub fn builder() -> PatchConfigBuilder {
        PatchConfigBuilder::new()
    }

    pub fn alpha(&self) -> &AlphaPolicy {
        &self.alpha
    }

    /// Format for DDS textures whose rule names none.
    pub fn default_format(&self) -> TextureFormat {
        self.default_format
    }

    /// Whether output is laid out as a JSGME mod.
    pub fn pack_as_mod(&self) -> bool {
        self.pack_as_mod
    }

    /// DDS encoder settings for a texture written as `format`.
    pub fn encode_options(&self, format: TextureFormat) -> DdsEncodeOptions {
        DdsEncodeOptions {
            format,
            mipmaps: self.mipmaps,
            quality: self.quality,
        }
    }
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            alpha: AlphaPolicy::default(),
            default_format: TextureFormat::Rgb,
            quality: EncodeQuality::Normal,
            mipmaps: true,
            pack_as_mod: true,
        }
    }
}

/// Builder for [`PatchConfig`]; unset values take the defaults of [`PatchConfig::default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchConfigBuilder {
    preserve_gradients: Option<bool>,
    gradient_threshold: Option<f64>,
    dxt1: Option<bool>,
    production_quality: Option<bool>,
    mipmaps: Option<bool>,
    pack_as_mod: Option<bool>,
}

impl PatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep significant transparency by stretching alpha instead of flattening it.
    pub fn preserve_gradients(mut self, preserve: bool) -> Self {
        self.preserve_gradients = Some(preserve);
        self
    }

    /// Alpha threshold in `(0, 1]`; validated by [`Self::build`].
    pub fn gradient_threshold(mut self, threshold: f64) -> Self {
        self.gradient_threshold = Some(threshold);
        self
    }

    /// Use `DXT1` rather than uncompressed RGB as the default DDS format.
    pub fn dxt1(mut self, dxt1: bool) -> Self {
        self.dxt1 = Some(dxt1);
        self
    }

    /// Use the slower iterative block fit.
    pub fn production_quality(mut self, production: bool) -> Self {
        self.production_quality = Some(production);
        self
    }

    pub fn mipmaps(mut self, mipmaps: bool) -> Self {
        self.mipmaps = Some(mipmaps);
        self
    }

    pub fn pack_as_mod(mut self, pack_as_mod: bool) -> Self {
        self.pack_as_mod = Some(pack_as_mod);
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// - [`PatchError::Config`] for a threshold outside `(0, 1]`
    /// - [`PatchError::FormatResolve`] if gradients are kept but the default format has no
    ///   alpha-capable counterpart
    pub fn build(self) -> Result<PatchConfig, PatchError> {
        let alpha = AlphaPolicy::new(
            self.preserve_gradients.unwrap_or(true),
            self.gradient_threshold
                .unwrap_or(AlphaPolicy::DEFAULT_THRESHOLD),
        )?;
        let default_format = if self.dxt1.unwrap_or(false) {
            TextureFormat::Dxt1
        } else {
            TextureFormat::Rgb
        };
        if alpha.preserve_gradients() {
            resolve_format(default_format, true)?;
        }

        Ok(PatchConfig {
            alpha,
            default_format,
            quality: if self.production_quality.unwrap_or(false) {
                EncodeQuality::Production
            } else {
                EncodeQuality::Normal
            },
            mipmaps: self.mipmaps.unwrap_or(true),
            pack_as_mod: self.pack_as_mod.unwrap_or(true),
        })
    }
}
