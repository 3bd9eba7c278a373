//! Q-table persistence
//!
//! The table is stored as a JSON document holding a flat list of
//! `(observation, action, value)` entries. Writes go to a temporary file in
//! the destination directory which is then renamed over the old table, so a
//! crash mid-save never leaves a truncated file behind.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::observation::Observation;
use super::q_table::QTable;
use crate::game::Action;

/// Bumped whenever the on-disk layout changes
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TableEntry {
    observation: Observation,
    action: Action,
    value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    version: u32,
    entries: Vec<TableEntry>,
}

impl TableFile {
    fn from_table(table: &QTable) -> Self {
        let mut entries: Vec<TableEntry> = table
            .entries()
            .map(|(obs, action, value)| TableEntry {
                observation: *obs,
                action,
                value,
            })
            .collect();
        entries.sort_by(|a, b| (a.observation, a.action).cmp(&(b.observation, b.action)));

        Self {
            version: FORMAT_VERSION,
            entries,
        }
    }

    fn into_table(self) -> Result<QTable> {
        if self.version != FORMAT_VERSION {
            bail!(
                "unsupported table format version {} (expected {})",
                self.version,
                FORMAT_VERSION
            );
        }

        let mut table = QTable::new();
        for entry in self.entries {
            if !entry.value.is_finite() {
                bail!("non-finite value for {:?}", (entry.observation, entry.action));
            }
            if table
                .insert(entry.observation, entry.action, entry.value)
                .is_some()
            {
                bail!(
                    "duplicate entry for {:?}",
                    (entry.observation, entry.action)
                );
            }
        }
        Ok(table)
    }
}

/// Durable storage for the Q-table at a fixed path
#[derive(Debug, Clone)]
pub struct TableStore {
    path: PathBuf,
}

impl TableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored table
    ///
    /// Returns `Ok(None)` when no table has been saved yet and an error when
    /// the file exists but cannot be read or parsed.
    pub fn try_load(&self) -> Result<Option<QTable>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read Q-table from {:?}", self.path))?;
        let file: TableFile = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse Q-table in {:?}", self.path))?;

        file.into_table().map(Some)
    }

    /// Read the stored table, falling back to an empty one
    ///
    /// A missing or corrupt file is not fatal: learning simply starts over.
    pub fn load(&self) -> QTable {
        match self.try_load() {
            Ok(Some(table)) => {
                info!(path = ?self.path, entries = table.len(), "loaded Q-table");
                table
            }
            Ok(None) => {
                info!(path = ?self.path, "no saved Q-table, starting empty");
                QTable::new()
            }
            Err(err) => {
                warn!(path = ?self.path, error = %format!("{err:#}"), "ignoring unreadable Q-table, starting empty");
                QTable::new()
            }
        }
    }

    /// Atomically replace the stored table
    pub fn save(&self, table: &QTable) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {:?}", dir))?;

        let json = serde_json::to_string(&TableFile::from_table(table))
            .context("Failed to serialize Q-table")?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
        tmp.write_all(json.as_bytes())
            .context("Failed to write Q-table")?;
        tmp.as_file()
            .sync_all()
            .context("Failed to flush Q-table")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace {:?}", self.path))?;

        debug!(path = ?self.path, entries = table.len(), "saved Q-table");
        Ok(())
    }

    /// Save, retrying once before giving up
    pub fn save_with_retry(&self, table: &QTable) -> Result<()> {
        match self.save(table) {
            Ok(()) => Ok(()),
            Err(first) => {
                warn!(path = ?self.path, error = %format!("{first:#}"), "Q-table save failed, retrying");
                self.save(table).context("Q-table save failed after retry")
            }
        }
    }
}
