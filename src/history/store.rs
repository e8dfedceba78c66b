//! Plain-text lookup history.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only list of creature names, one per line, first-seen order.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<String>,
    seen: HashSet<String>,
}

impl HistoryStore {
    /// Open the history at `path`. A missing file is an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut store = Self {
            path,
            entries: Vec::new(),
            seen: HashSet::new(),
        };

        match fs::read_to_string(&store.path) {
            Ok(text) => {
                for line in text.lines() {
                    store.remember(line);
                }
                tracing::debug!(
                    path = %store.path.display(),
                    entries = store.entries.len(),
                    "Loaded history"
                );
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %store.path.display(), "No history file yet");
            }
            Err(e) => {
                return Err(Error::history(format!(
                    "Failed to read {}: {}",
                    store.path.display(),
                    e
                )));
            }
        }

        Ok(store)
    }

    /// An empty history that appends to `path`, without reading it.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All names in first-seen order.
    pub fn list_all(&self) -> &[String] {
        &self.entries
    }

    /// Number of stored names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `name` unless it is already stored.
    ///
    /// Returns whether the name was added. On a write failure the in-memory
    /// list is left unchanged.
    pub fn record_if_absent(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() || self.seen.contains(name) {
            return Ok(false);
        }

        self.append_line(name).map_err(|e| {
            Error::history(format!("Cannot write {}: {}", self.path.display(), e))
        })?;

        self.remember(name);
        tracing::info!(name, path = %self.path.display(), "Recorded history entry");
        Ok(true)
    }

    fn append_line(&self, name: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{}", name)?;
        out.flush()
    }

    fn remember(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() && self.seen.insert(name.to_string()) {
            self.entries.push(name.to_string());
        }
    }
}

/// Names in `entries` starting with `prefix` (case-insensitive), in stored
/// order. A name equal to the prefix is not suggested.
pub fn suggest(entries: &[String], prefix: &str, limit: usize) -> Vec<String> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|entry| {
            let lower = entry.to_lowercase();
            lower.starts_with(&prefix) && lower != prefix
        })
        .take(limit)
        .cloned()
        .collect()
}
