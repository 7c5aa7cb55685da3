//! Car directory lookups: the main KN5 and the display name.

use std::fs;
use std::path::{Path, PathBuf};

/// Reads `key` from `[section]` of INI text. Empty values count as missing.
pub fn ini_value(text: &str, section: &str, key: &str) -> Option<String> {
    let mut in_section = false;
    for line in text.lines() {
        let line = line.split(';').next().unwrap_or_default().trim();
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim().eq_ignore_ascii_case(section);
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((name, value)) = line.split_once('=') {
            if name.trim().eq_ignore_ascii_case(key) {
                let value = value.trim();
                return (!value.is_empty()).then(|| value.to_owned());
            }
        }
    }
    None
}

fn read_data_ini(car_dir: &Path, file_name: &str) -> Option<String> {
    fs::read_to_string(car_dir.join("data").join(file_name)).ok()
}

/// Finds the KN5 holding the car's full detail model.
///
/// Tried in order: `FILE` of `[LOD_0]` in `data/lods.ini`, `{car_id}.kn5`, then the first
/// `.kn5` by name that is not a LOD. Returns [`None`] if nothing exists.
pub fn main_kn5_path(car_dir: &Path, car_id: &str) -> Option<PathBuf> {
    if let Some(file) = read_data_ini(car_dir, "lods.ini")
        .and_then(|text| ini_value(&text, "LOD_0", "FILE"))
    {
        let path = car_dir.join(file);
        if path.is_file() {
            return Some(path);
        }
    }

    let by_id = car_dir.join(format!("{car_id}.kn5"));
    if by_id.is_file() {
        return Some(by_id);
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(car_dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|extension| extension.eq_ignore_ascii_case("kn5"))
                && path
                    .file_name()
                    .is_some_and(|name| !name.to_string_lossy().to_lowercase().contains("_lod"))
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// `SCREEN_NAME` from `data/car.ini`, or the id.
pub fn car_screen_name(car_dir: &Path, car_id: &str) -> String {
    read_data_ini(car_dir, "car.ini")
        .and_then(|text| ini_value(&text, "INFO", "SCREEN_NAME"))
        .unwrap_or_else(|| car_id.to_owned())
}
