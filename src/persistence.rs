//! File I/O for saving and loading levels.
//!
//! Each level is one pretty-printed JSON file named `<levelName>.json`.
//! Loaded records are validated before they are handed out, so a level
//! that comes back from disk always rebuilds into a board and state.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::catalog::LevelCatalog;
use crate::error::PersistenceError;
use crate::level::LevelData;

/// Extension used for level files.
pub const LEVEL_EXTENSION: &str = "json";

/// Path of the file a level is stored in.
pub fn level_path(dir: &Path, level_name: &str) -> PathBuf {
    dir.join(format!("{level_name}.{LEVEL_EXTENSION}"))
}

/// Writes a level to `dir`, creating the directory if needed.
///
/// An existing file with the same name is replaced.
pub fn save(level: &LevelData, dir: &Path) -> Result<PathBuf, PersistenceError> {
    level.validate()?;
    fs::create_dir_all(dir)?;
    let path = level_path(dir, &level.level_name);
    let json = serde_json::to_string_pretty(level)?;
    fs::write(&path, json)?;
    debug!("wrote {}", path.display());
    Ok(path)
}

/// Reads and validates one level file.
pub fn load(path: &Path) -> Result<LevelData, PersistenceError> {
    let text = fs::read_to_string(path)?;
    let level: LevelData = serde_json::from_str(&text)?;
    level.validate()?;
    Ok(level)
}

/// Loads every level in `dir` in catalog order.
pub fn load_all(dir: &Path) -> Result<Vec<LevelData>, PersistenceError> {
    let catalog = LevelCatalog::from_dir(dir)?;
    catalog
        .names()
        .iter()
        .map(|name| load(&level_path(dir, name)))
        .collect()
}
