//! Rules files: which textures of which cars to patch.
//!
//! One rule per line, `carId: textureFileName[: preferredFormat]`. Text after `#` is a
//! comment; lines with other than two or three `:` separated fields are ignored.

use crate::error::PatchError;
use log::debug;
use std::fs;
use std::path::Path;
use transparency_patch_common::texture_format::TextureFormat;

/// One texture to patch for a car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRule {
    /// File name within the skin directory and the car's KN5.
    pub texture: String,
    /// Output format for DDS textures; [`None`] uses the run default.
    pub preferred_format: Option<TextureFormat>,
}

/// Parses one line into a car id and its rule.
pub fn parse_rule_line(line: &str) -> Option<(String, TextureRule)> {
    let content = line.split('#').next().unwrap_or_default();
    let fields: Vec<&str> = content.split(':').collect();
    if fields.len() != 2 && fields.len() != 3 {
        return None;
    }

    let car_id = fields[0].trim();
    let texture = fields[1].trim();
    if car_id.is_empty() || texture.is_empty() {
        return None;
    }

    Some((
        car_id.to_owned(),
        TextureRule {
            texture: texture.to_owned(),
            preferred_format: fields.get(2).and_then(|token| TextureFormat::from_token(token)),
        },
    ))
}

/// Rules grouped by car, both in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    cars: Vec<(String, Vec<TextureRule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and merges every file in `paths`.
    ///
    /// # Errors
    ///
    /// [`PatchError::Rules`] if a file cannot be read.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, PatchError> {
        let mut rules = Self::new();
        for path in paths {
            let path = path.as_ref();
            let text = fs::read_to_string(path).map_err(|source| PatchError::Rules {
                path: path.to_path_buf(),
                source,
            })?;
            rules.extend_from_str(&text);
        }
        Ok(rules)
    }

    /// Adds the rules in `text` after the existing ones.
    pub fn extend_from_str(&mut self, text: &str) {
        for (car_id, rule) in text.lines().filter_map(parse_rule_line) {
            self.push(car_id, rule);
        }
    }

    /// Adds `rule` for `car_id`. A texture the car already has a rule for is ignored, so the
    /// first rule for a texture wins.
    pub fn push(&mut self, car_id: String, rule: TextureRule) {
        match self.cars.iter_mut().find(|(id, _)| *id == car_id) {
            Some((_, rules)) if rules.iter().any(|r| r.texture == rule.texture) => {
                debug!("{car_id}: duplicate rule for {} ignored", rule.texture);
            }
            Some((_, rules)) => rules.push(rule),
            None => self.cars.push((car_id, vec![rule])),
        }
    }

    /// Car ids in order of first appearance.
    pub fn car_ids(&self) -> impl Iterator<Item = &str> {
        self.cars.iter().map(|(id, _)| id.as_str())
    }

    pub fn rules_for(&self, car_id: &str) -> Option<&[TextureRule]> {
        self.cars
            .iter()
            .find(|(id, _)| id == car_id)
            .map(|(_, rules)| rules.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}
