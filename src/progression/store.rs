//! Flat key-value persistence for progression and gallery data.
//!
//! Values are integers or floats only. Files are pretty-printed JSON
//! objects so they stay hand-editable.

use crate::core::error::StoreResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A persisted scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreValue {
    Int(i64),
    Float(f64),
}

impl StoreValue {
    /// Integer view. Floats convert only when they hold a whole number.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            StoreValue::Int(v) => Some(v),
            StoreValue::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    Some(v as i64)
                } else {
                    None
                }
            }
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            StoreValue::Int(v) => Some(v as f64),
            StoreValue::Float(v) if v.is_finite() => Some(v),
            StoreValue::Float(_) => None,
        }
    }
}

impl From<i64> for StoreValue {
    fn from(v: i64) -> Self {
        StoreValue::Int(v)
    }
}

impl From<u32> for StoreValue {
    fn from(v: u32) -> Self {
        StoreValue::Int(v as i64)
    }
}

impl From<f64> for StoreValue {
    fn from(v: f64) -> Self {
        StoreValue::Float(v)
    }
}

pub type StoreMap = BTreeMap<String, StoreValue>;

/// Backing store behind the ledger and gallery.
pub trait KeyValueStore {
    /// Merge `entries` into the stored map and flush.
    fn save(&mut self, entries: &StoreMap) -> StoreResult<()>;

    /// Everything stored, or an empty map when nothing was saved yet.
    fn load(&self) -> StoreResult<StoreMap>;

    fn exists(&self) -> bool;

    /// Forget everything.
    fn clear(&mut self) -> StoreResult<()>;
}

/// Keep the scalar entries of a raw JSON object, warning about the rest.
fn scalar_entries(raw: BTreeMap<String, serde_json::Value>, source: &Path) -> StoreMap {
    let mut map = StoreMap::new();
    for (key, value) in raw {
        let parsed = match &value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(StoreValue::Int)
                .or_else(|| n.as_f64().map(StoreValue::Float)),
            _ => None,
        };
        match parsed {
            Some(v) => {
                map.insert(key, v);
            }
            None => {
                tracing::warn!(path = %source.display(), key = %key, %value, "skipping non-numeric entry");
            }
        }
    }
    map
}

/// A JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `dir/file_name`.
    pub fn in_dir(dir: &Path, file_name: &str) -> Self {
        Self::new(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn save(&mut self, entries: &StoreMap) -> StoreResult<()> {
        let mut merged = match self.load() {
            Ok(existing) => existing,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "overwriting unreadable store");
                StoreMap::new()
            }
        };
        merged.extend(entries.iter().map(|(k, v)| (k.clone(), *v)));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&merged)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> StoreResult<StoreMap> {
        if !self.path.exists() {
            return Ok(StoreMap::new());
        }
        let json = fs::read_to_string(&self.path)?;
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&json)?;
        Ok(scalar_entries(raw, &self.path))
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn clear(&mut self) -> StoreResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Option<StoreMap>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `entries`.
    pub fn with_entries(entries: StoreMap) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Some(entries))),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<StoreMap>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&mut self, entries: &StoreMap) -> StoreResult<()> {
        let mut guard = self.lock();
        let map = guard.get_or_insert_with(StoreMap::new);
        map.extend(entries.iter().map(|(k, v)| (k.clone(), *v)));
        Ok(())
    }

    fn load(&self) -> StoreResult<StoreMap> {
        Ok(self.lock().clone().unwrap_or_default())
    }

    fn exists(&self) -> bool {
        self.lock().is_some()
    }

    fn clear(&mut self) -> StoreResult<()> {
        *self.lock() = None;
        Ok(())
    }
}
