//! Persistent store for the compare selection
//!
//! The selection is kept as a JSON array of product ids in a single file.
//! Unreadable or corrupt data loads as an empty selection.

use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use xetai_types::{Result, StorageError};

/// Fixed storage key (file name) for the compare selection
pub const COMPARE_STORE_FILE: &str = "xetaiviet_compare_items.json";

/// File-backed compare selection store
#[derive(Debug)]
pub struct CompareStore {
    store_path: PathBuf,
}

impl CompareStore {
    /// Create the store directory if needed
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir).map_err(|e| {
            StorageError::Unavailable(format!("{}: {}", store_dir.display(), e))
        })?;
        let store_path = store_dir.join(COMPARE_STORE_FILE);
        Ok(Self { store_path })
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Load stored ids. Missing or corrupt data yields an empty list.
    pub fn load_ids(&self) -> Vec<String> {
        if !self.store_path.exists() {
            return Vec::new();
        }
        let parsed: std::result::Result<Vec<Value>, String> = File::open(&self.store_path)
            .map_err(|e| e.to_string())
            .and_then(|file| serde_json::from_reader(BufReader::new(file)).map_err(|e| e.to_string()));

        match parsed {
            Ok(values) => values.iter().filter_map(stored_id).collect(),
            Err(e) => {
                tracing::warn!(
                    path = %self.store_path.display(),
                    error = %e,
                    "compare store unreadable, starting with empty selection"
                );
                Vec::new()
            }
        }
    }

    /// Overwrite stored ids
    pub fn save_ids(&self, ids: &[String]) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, ids)?;
        Ok(())
    }

    /// Delete stored data
    pub fn reset(&self) -> Result<()> {
        if self.store_path.exists() {
            fs::remove_file(&self.store_path)?;
        }
        Ok(())
    }
}

/// Accept a bare id or a full product record (older format) carrying `id`
fn stored_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Object(map) => map.get("id").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
