//! Walks one car's skins and writes the fixed textures into the archive.

use crate::archive::PatchArchive;
use crate::cache::ContainerTextures;
use crate::car::main_kn5_path;
use crate::config::PatchConfig;
use crate::error::{PatchError, TextureError};
use crate::rules::TextureRule;
use crate::texture::normalize_texture;
use log::debug;
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;

/// What happened to one car.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarOutcome {
    pub skins: usize,
    /// Textures written to the archive.
    pub fixed: usize,
    /// Textures that needed no change.
    pub skipped: usize,
    /// Textures read out of the KN5 and decoded.
    pub container_decodes: usize,
}

fn texture_error(car_id: &str, source: impl Into<TextureError>) -> PatchError {
    PatchError::Texture {
        car_id: car_id.to_owned(),
        source: source.into(),
    }
}

/// Skin directory names, sorted.
fn list_skins(skins_dir: &Path) -> std::io::Result<Vec<String>> {
    let mut skins = Vec::new();
    for entry in fs::read_dir(skins_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            skins.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    skins.sort();
    Ok(skins)
}

/// Applies `rules` to every skin of `car_id`.
///
/// A texture in the skin directory overrides the KN5 one and is handled on its own; KN5
/// textures are handled once per car and reused across skins.
///
/// # Errors
///
/// [`PatchError::Texture`] if a texture fails, which ends this car only. Any other error
/// comes from writing the archive.
pub fn process_car<W: Write + Seek>(
    car_id: &str,
    cars_dir: &Path,
    rules: &[TextureRule],
    config: &PatchConfig,
    archive: &mut PatchArchive<W>,
) -> Result<CarOutcome, PatchError> {
    let car_dir = cars_dir.join(car_id);
    let mut outcome = CarOutcome::default();

    let kn5_path = main_kn5_path(&car_dir, car_id);
    if kn5_path.is_none() {
        eprintln!("    {car_id}: main KN5-file not found");
    }

    let skins_dir = car_dir.join("skins");
    if !skins_dir.is_dir() {
        eprintln!("    {car_id}: skins directory not found");
        return Ok(outcome);
    }

    let mut container = ContainerTextures::new(kn5_path);
    let skins = list_skins(&skins_dir).map_err(|e| texture_error(car_id, e))?;

    for skin in &skins {
        println!("Skin: {skin}");
        outcome.skins += 1;

        for rule in rules {
            println!("  Texture: {}", rule.texture);

            let override_path = skins_dir.join(skin).join(&rule.texture);
            let fixed = if override_path.is_file() {
                let bytes = fs::read(&override_path).map_err(|e| texture_error(car_id, e))?;
                match normalize_texture(&bytes, rule.preferred_format, config)
                    .map_err(|e| texture_error(car_id, e))?
                {
                    Some(data) => {
                        archive.add_texture(car_id, skin, &rule.texture, &data)?;
                        true
                    }
                    None => false,
                }
            } else {
                match container
                    .normalized(rule, config)
                    .map_err(|e| texture_error(car_id, e))?
                {
                    Some(data) => {
                        archive.add_texture(car_id, skin, &rule.texture, data)?;
                        true
                    }
                    None => false,
                }
            };

            if fixed {
                println!("    Fixed and saved within patch file");
                outcome.fixed += 1;
            } else {
                println!("    Either not a semi-transparent or fully transparent texture, skip");
                outcome.skipped += 1;
            }
        }
    }

    outcome.container_decodes = container.decode_count();
    debug!(
        "{car_id}: KN5 opened {} time(s), {} texture(s) decoded",
        container.open_count(),
        outcome.container_decodes
    );
    Ok(outcome)
}
