//! Durable key-value preferences
//!
//! A flat string→string map persisted as JSON. The pinned shortcut lives
//! under two keys that are always written and cleared together.
//! File location: ~/.local/share/meshmapper/MeshMapperPrefs.json

use crate::types::PinnedShortcut;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Namespace of the preference file
pub const PREFS_NAMESPACE: &str = "MeshMapperPrefs";

pub const KEY_PINNED_CODE: &str = "pinned_code";
pub const KEY_PINNED_NAME: &str = "pinned_name";

/// String key-value store, optionally backed by a file
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl Preferences {
    /// Get the default preferences file path
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join("meshmapper");
        Ok(data_dir.join(format!("{}.json", PREFS_NAMESPACE)))
    }

    /// Open the store at the default location
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open a store backed by `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences from {:?}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse preferences from {:?}", path))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    /// A store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Apply `edit` and persist the result.
    ///
    /// The edit runs on a copy; the in-memory values are replaced only once
    /// the copy has been written, so a failed write leaves the store as it was.
    pub fn update<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut next = self.values.clone();
        edit(&mut next);

        if let Some(path) = &self.path {
            write_atomically(path, &next)?;
        }

        self.values = next;
        Ok(())
    }

    /// Read the pinned shortcut; a half-written pair counts as no pin
    pub fn load_pin(&self) -> Option<PinnedShortcut> {
        match (self.get(KEY_PINNED_CODE), self.get(KEY_PINNED_NAME)) {
            (Some(code), Some(name)) => Some(PinnedShortcut::new(code, name)),
            _ => None,
        }
    }

    /// Overwrite the pinned shortcut
    pub fn save_pin(&mut self, pin: &PinnedShortcut) -> Result<()> {
        self.update(|values| {
            values.insert(KEY_PINNED_CODE.into(), pin.code.clone());
            values.insert(KEY_PINNED_NAME.into(), pin.name.clone());
        })
    }

    /// Remove the pinned shortcut, leaving any other keys alone
    pub fn clear_pin(&mut self) -> Result<()> {
        self.update(|values| {
            values.remove(KEY_PINNED_CODE);
            values.remove(KEY_PINNED_NAME);
        })
    }
}

/// Write to a sibling temp file, then rename over the target
fn write_atomically(path: &Path, values: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create preferences directory {:?}", parent))?;
    }

    let content = serde_json::to_string_pretty(values)
        .context("Failed to serialize preferences")?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)
        .with_context(|| format!("Failed to write preferences to {:?}", tmp))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move preferences into place at {:?}", path))?;

    Ok(())
}
