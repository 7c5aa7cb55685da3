//! Per-texture work: decode, fix alpha, re-encode.

use crate::config::PatchConfig;
use crate::error::TextureError;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;
use transparency_patch_alpha::{normalize_alpha, resolve_format, AlphaOutcome};
use transparency_patch_common::{surface::Surface, texture_format::TextureFormat};
use transparency_patch_dds::dds::{decode_dds, encode_dds, likely_dds};

/// Fixes the transparency of one texture file.
///
/// DDS input is written back as DDS in `preferred_format` (or the run default), upgraded to
/// an alpha-capable format when a gradient is kept. Anything else is decoded as a bitmap and
/// written back as PNG.
///
/// Returns [`None`] when the texture needs no change.
///
/// # Errors
///
/// Undecodable input, or a format with no alpha-capable counterpart.
pub fn normalize_texture(
    bytes: &[u8],
    preferred_format: Option<TextureFormat>,
    config: &PatchConfig,
) -> Result<Option<Vec<u8>>, TextureError> {
    if likely_dds(bytes) {
        let surface = decode_dds(bytes)?;
        let outcome = normalize_alpha(&surface, config.alpha());
        let Some(result) = outcome.surface() else {
            return Ok(None);
        };

        let nominal = preferred_format.unwrap_or(config.default_format());
        let format = resolve_format(nominal, outcome.needs_alpha())?;
        debug!(
            "DDS {}x{}: {} as {format}",
            surface.width(),
            surface.height(),
            describe(&outcome)
        );
        Ok(Some(encode_dds(result, &config.encode_options(format))?))
    } else {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let surface = Surface::from_rgba8(decoded.width(), decoded.height(), decoded.as_raw())?;
        let outcome = normalize_alpha(&surface, config.alpha());
        let Some(result) = outcome.surface() else {
            return Ok(None);
        };

        debug!(
            "Bitmap {}x{}: {} as PNG",
            surface.width(),
            surface.height(),
            describe(&outcome)
        );
        Ok(Some(encode_png(result, outcome.needs_alpha())?))
    }
}

fn describe(outcome: &AlphaOutcome) -> &'static str {
    match outcome {
        AlphaOutcome::Unchanged => "unchanged",
        AlphaOutcome::Flattened(_) => "flattened",
        AlphaOutcome::Stretched(_) => "stretched",
    }
}

/// Encodes `surface` as PNG, as RGBA when `with_alpha` is set and RGB otherwise.
pub fn encode_png(surface: &Surface, with_alpha: bool) -> Result<Vec<u8>, TextureError> {
    let (bytes, color_type) = if with_alpha {
        (surface.to_rgba8(), ExtendedColorType::Rgba8)
    } else {
        (surface.to_rgb8(), ExtendedColorType::Rgb8)
    };

    let mut output = Vec::new();
    PngEncoder::new(&mut output).write_image(
        &bytes,
        surface.width(),
        surface.height(),
        color_type,
    )?;
    Ok(output)
}
