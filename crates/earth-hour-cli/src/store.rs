//! Reminder bookkeeping: the last year each reminder fired, keyed by string.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

/// Get/set store for "last year this reminder fired" markers.
pub trait ReminderStore {
    fn get(&self, key: &str) -> Result<Option<i32>>;
    fn set(&mut self, key: &str, year: i32) -> Result<()>;
}

/// Markers that live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i32>,
}

impl ReminderStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<i32>> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, year: i32) -> Result<()> {
        self.values.insert(key.to_string(), year);
        Ok(())
    }
}

/// Markers persisted as a flat JSON object, `{"notifications.oneDayBeforeYear": 2025}`.
///
/// The whole file is rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, i32>,
}

impl JsonFileStore {
    /// Load the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read state file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parse state file {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.values).context("serialize state")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("write state file {}", self.path.display()))
    }
}

impl ReminderStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<i32>> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, year: i32) -> Result<()> {
        self.values.insert(key.to_string(), year);
        debug!("Recorded {} = {} in {}", key, year, self.path.display());
        self.save()
    }
}
