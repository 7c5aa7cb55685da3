//! Locating the game through Steam when no cars directory is given.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Install directory name under `steamapps/common`.
const AC_INSTALL_DIR: &str = "assettocorsa";

/// Steam installs to try, in order.
pub fn default_steam_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if cfg!(windows) {
        roots.push(PathBuf::from(r"C:\Program Files (x86)\Steam"));
        roots.push(PathBuf::from(r"C:\Program Files\Steam"));
    } else if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".steam").join("steam"));
        roots.push(home.join(".local").join("share").join("Steam"));
    }
    roots
}

/// Extracts every `"path"` value from a `libraryfolders.vdf` file.
pub fn parse_library_paths(vdf: &str) -> Vec<PathBuf> {
    vdf.lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("\"path\"")?;
            let value = rest.trim().strip_prefix('"')?.strip_suffix('"')?;
            Some(PathBuf::from(value.replace("\\\\", "\\")))
        })
        .collect()
}

/// The Steam root itself followed by every extra library it lists.
pub fn library_folders(steam_root: &Path) -> Vec<PathBuf> {
    let mut folders = vec![steam_root.to_path_buf()];
    let vdf = steam_root.join("steamapps").join("libraryfolders.vdf");
    if let Ok(text) = fs::read_to_string(&vdf) {
        for path in parse_library_paths(&text) {
            if !folders.contains(&path) {
                folders.push(path);
            }
        }
    }
    folders
}

/// First `steamapps/common/assettocorsa` with a `content/cars` directory.
pub fn find_ac_root(steam_roots: &[PathBuf]) -> Option<PathBuf> {
    steam_roots
        .iter()
        .flat_map(|root| library_folders(root))
        .map(|library| library.join("steamapps").join("common").join(AC_INSTALL_DIR))
        .inspect(|candidate| debug!("Looking for AC in {}", candidate.display()))
        .find(|candidate| cars_directory(candidate).is_dir())
}

/// `content/cars` of an install.
pub fn cars_directory(ac_root: &Path) -> PathBuf {
    ac_root.join("content").join("cars")
}
