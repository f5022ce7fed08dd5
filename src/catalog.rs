//! Level ordering and naming.
//!
//! Levels are ordered by the number embedded in their name
//! (`Level_07` is level 7). The catalog is an ordinary value owned by the
//! caller and rebuilt whenever the level directory changes.

use std::fs;
use std::io;
use std::path::Path;

use crate::persistence::LEVEL_EXTENSION;

/// Returns the first run of ASCII digits in `name` as a number.
pub fn level_number(name: &str) -> Option<u32> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits = &name[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Formats the canonical name for a level number, e.g. `Level_03`.
pub fn level_name(number: u32) -> String {
    format!("Level_{number:02}")
}

/// Ordered list of level names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCatalog {
    names: Vec<String>,
}

impl LevelCatalog {
    /// Sorts by level number; names without a number go last. Ties keep
    /// alphabetical order.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let mut names: Vec<String> = names.into_iter().collect();
        names.sort_by(|a, b| {
            let key_a = level_number(a).unwrap_or(u32::MAX);
            let key_b = level_number(b).unwrap_or(u32::MAX);
            key_a.cmp(&key_b).then_with(|| a.cmp(b))
        });
        names.dedup();
        Self { names }
    }

    /// Lists the level files in `dir`. A missing directory is an empty catalog.
    pub fn from_dir(dir: &Path) -> io::Result<Self> {
        if !dir.exists() {
            return Ok(Self::default());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEVEL_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        Ok(Self::new(names))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Zero-based display position of `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    /// The level that follows `name`, if both exist.
    pub fn next_after(&self, name: &str) -> Option<&str> {
        let index = self.position(name)?;
        self.names.get(index + 1).map(String::as_str)
    }

    /// Highest level number in the catalog, or 0 when there is none.
    pub fn highest_number(&self) -> u32 {
        self.names
            .iter()
            .filter_map(|name| level_number(name))
            .max()
            .unwrap_or(0)
    }
}

/// Suggests the name for the next level to add to `dir`.
pub fn next_level_name(dir: &Path) -> io::Result<String> {
    let catalog = LevelCatalog::from_dir(dir)?;
    Ok(level_name(catalog.highest_number() + 1))
}
