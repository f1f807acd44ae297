use crate::dlog;
use crate::error::AppError;
use crate::workout::Workout;
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Synchronous string store scoped to one user (the browser's local storage
/// in the web build).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All keys in one JSON object on disk. Each write replaces the file
/// atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let display = self.path.display();
        let text =
            fs::read_to_string(&self.path).with_context(|| format!("Reading store: {display}"))?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).with_context(|| format!("Parsing store: {display}"))
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).with_context(|| format!("creating dir: {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut tmp, entries).context("Serializing store")?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Replacing store: {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

pub fn save_workouts(store: &mut dyn KeyValueStore, key: &str, workouts: &[Workout]) -> Result<()> {
    let json = serde_json::to_string(workouts).context("Serializing workouts")?;
    store.set(key, &json)?;
    dlog!("stored workouts key={key} count={}", workouts.len());
    Ok(())
}

/// Reads the list back. Missing or unreadable data yields an empty list;
/// array elements that do not rehydrate are skipped.
pub fn load_workouts(store: &dyn KeyValueStore, key: &str) -> Vec<Workout> {
    match try_load_workouts(store, key) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(err = %e, "ignoring stored workouts");
            Vec::new()
        }
    }
}

fn try_load_workouts(store: &dyn KeyValueStore, key: &str) -> Result<Vec<Workout>, AppError> {
    let raw = store
        .get(key)
        .map_err(|e| AppError::PersistenceRead(format!("{e:#}")))?;
    let Some(raw) = raw else {
        dlog!("no stored workouts key={key}");
        return Ok(Vec::new());
    };

    let items: Vec<JsonValue> =
        serde_json::from_str(&raw).map_err(|e| AppError::PersistenceRead(e.to_string()))?;

    let total = items.len();
    let mut out = Vec::with_capacity(total);
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Workout>(item) {
            Ok(w) => out.push(w),
            Err(e) => tracing::warn!(index = i, err = %e, "skipping stored workout"),
        }
    }

    tracing::info!(loaded = out.len(), stored = total, "restored workouts");
    Ok(out)
}
