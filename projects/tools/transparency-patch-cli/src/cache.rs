//! Results for textures read from a car's KN5, computed at most once per car.

use crate::config::PatchConfig;
use crate::error::TextureError;
use crate::rules::TextureRule;
use crate::texture::normalize_texture;
use log::debug;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use transparency_patch_kn5::Kn5Textures;

type Kn5File = Kn5Textures<BufReader<File>>;

/// Lazily opened KN5 plus the normalized result of each texture taken from it.
///
/// The KN5 is only opened on the first lookup. Without a KN5 every lookup yields "no change".
#[derive(Debug)]
pub struct ContainerTextures {
    path: Option<PathBuf>,
    container: OnceCell<Option<Kn5File>>,
    /// `None` values mean the texture needs no change.
    results: HashMap<String, Option<Vec<u8>>>,
    open_count: usize,
    decode_count: usize,
}

impl ContainerTextures {
    /// Textures of the KN5 at `path`, or of no KN5 at all.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            container: OnceCell::new(),
            results: HashMap::new(),
            open_count: 0,
            decode_count: 0,
        }
    }

    /// The normalized bytes of `rule`'s texture, or [`None`] when unchanged.
    ///
    /// # Errors
    ///
    /// The KN5 cannot be read, does not contain the texture, or the texture cannot be decoded.
    pub fn normalized(
        &mut self,
        rule: &TextureRule,
        config: &PatchConfig,
    ) -> Result<Option<&[u8]>, TextureError> {
        if !self.results.contains_key(&rule.texture) {
            let result = match self.container()? {
                Some(container) => {
                    let data = container.texture_data(&rule.texture)?;
                    self.decode_count += 1;
                    normalize_texture(&data, rule.preferred_format, config)?
                }
                None => None,
            };
            self.results.insert(rule.texture.clone(), result);
        }

        Ok(self
            .results
            .get(&rule.texture)
            .and_then(|result| result.as_deref()))
    }

    fn container(&mut self) -> Result<Option<&mut Kn5File>, TextureError> {
        if self.container.get().is_none() {
            let opened = match &self.path {
                Some(path) => {
                    self.open_count += 1;
                    let textures = Kn5Textures::open(path)?;
                    debug!(
                        "Opened {} (version {}, {} textures)",
                        path.display(),
                        textures.version(),
                        textures.entries().len()
                    );
                    Some(textures)
                }
                None => None,
            };
            let _ = self.container.set(opened);
        }
        Ok(self.container.get_mut().and_then(Option::as_mut))
    }

    /// How many times the KN5 was opened.
    pub fn open_count(&self) -> usize {
        self.open_count
    }

    /// How many textures were read out of the KN5 and decoded.
    pub fn decode_count(&self) -> usize {
        self.decode_count
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::texture::encode_png;
    use transparency_patch_common::{color_8888::Color8888, surface::Surface};

    /// Builds a version 5 KN5 holding `textures`.
    pub(crate) fn build_kn5(textures: &[(&str, &[u8])]) -> Vec<u8> {
        let mut data = b"sc6969".to_vec();
        data.extend_from_slice(&5i32.to_le_bytes());
        data.extend_from_slice(&(textures.len() as i32).to_le_bytes());
        for (name, blob) in textures {
            data.extend_from_slice(&1i32.to_le_bytes());
            data.extend_from_slice(&(name.len() as i32).to_le_bytes());
            data.extend_from_slice(name.as_bytes());
            data.extend_from_slice(&(blob.len() as i32).to_le_bytes());
            data.extend_from_slice(blob);
        }
        data
    }

    pub(crate) fn png_with_alpha(alpha: u8) -> Vec<u8> {
        let surface = Surface::filled(2, 2, Color8888::new(10, 20, 30, alpha)).unwrap();
        encode_png(&surface, true).unwrap()
    }

    fn rule(texture: &str) -> TextureRule {
        TextureRule {
            texture: texture.to_owned(),
            preferred_format: None,
        }
    }

    fn kn5_file(textures: &[(&str, &[u8])]) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), build_kn5(textures)).unwrap();
        file
    }

    #[test]
    fn decodes_each_texture_once() {
        let semi = png_with_alpha(200);
        let opaque = png_with_alpha(255);
        let file = kn5_file(&[("semi.png", &semi), ("opaque.png", &opaque)]);
        let mut cache = ContainerTextures::new(Some(file.path().to_path_buf()));
        let config = PatchConfig::default();

        for _ in 0..3 {
            assert!(cache.normalized(&rule("semi.png"), &config).unwrap().is_some());
            assert!(cache.normalized(&rule("opaque.png"), &config).unwrap().is_none());
        }

        assert_eq!(cache.open_count(), 1);
        assert_eq!(cache.decode_count(), 2);
    }

    #[test]
    fn missing_container_means_no_change() {
        let mut cache = ContainerTextures::new(None);
        let result = cache.normalized(&rule("semi.png"), &PatchConfig::default());
        assert!(result.unwrap().is_none());
        assert_eq!(cache.open_count(), 0);
    }

    #[test]
    fn missing_texture_is_an_error() {
        let file = kn5_file(&[]);
        let mut cache = ContainerTextures::new(Some(file.path().to_path_buf()));
        let result = cache.normalized(&rule("semi.png"), &PatchConfig::default());
        assert!(matches!(result, Err(TextureError::Kn5(_))));
    }
}
