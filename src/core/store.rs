//! Identity store accessor.
//!
//! The identity store is a JSON object document holding machine/device/session
//! identifiers alongside arbitrary application-cached keys. Unknown keys are
//! never dropped on write; only targeted keys are mutated or removed.
//!
//! Loads capture the file's modification time as an optimistic-concurrency
//! fingerprint. The host application may rewrite the store while Molt runs;
//! a save whose fingerprint no longer matches the on-disk state fails with
//! `ConcurrentModification` instead of silently overwriting.

use crate::core::error::MoltError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// In-memory identity store document plus its load-time fingerprint.
#[derive(Debug, Clone)]
pub struct IdentityRecord {
    fields: Map<String, Value>,
    /// Modification time of the backing file at load, when it existed.
    fingerprint: Option<SystemTime>,
}

impl IdentityRecord {
    /// Fresh empty record, not yet tied to any on-disk state.
    pub fn new() -> IdentityRecord {
        IdentityRecord {
            fields: Map::new(),
            fingerprint: None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// String value for `key`; `None` when absent or not a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    /// Remove `key`; true when an entry was actually dropped.
    pub fn remove(&mut self, key: &str) -> bool {
        self.fields.remove(key).is_some()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Default for IdentityRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the identity store at `path`.
///
/// `Ok(None)` when the file does not exist; callers treat that as an
/// explicit no-op, never as a failure. Malformed JSON is a `ParseError`.
pub fn load(path: &Path) -> Result<Option<IdentityRecord>, MoltError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(MoltError::IoError)?;
    let fields: Map<String, Value> = serde_json::from_str(&content)
        .map_err(|e| MoltError::ParseError(format!("{}: {}", path.display(), e)))?;
    let fingerprint = fs::metadata(path).and_then(|m| m.modified()).ok();
    Ok(Some(IdentityRecord {
        fields,
        fingerprint,
    }))
}

/// Persist the full record to `path`, replacing the previous document.
///
/// The document is pretty-printed and written to a sibling temp file, then
/// renamed over the target, so readers never observe a torn write. Fails
/// with `ConcurrentModification` when the on-disk file was rewritten after
/// `record` was loaded.
pub fn save(path: &Path, record: &IdentityRecord) -> Result<(), MoltError> {
    if let Some(loaded_at) = record.fingerprint {
        let current = fs::metadata(path).and_then(|m| m.modified()).ok();
        if current != Some(loaded_at) {
            return Err(MoltError::ConcurrentModification(
                path.display().to_string(),
            ));
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(MoltError::IoError)?;
    }

    let json = serde_json::to_string_pretty(&record.fields)
        .map_err(|e| MoltError::ParseError(format!("serialize {}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| MoltError::PathError(format!("not a file path: {}", path.display())))?;
    let tmp = path.with_file_name(format!("{}.tmp", file_name));

    fs::write(&tmp, json).map_err(MoltError::IoError)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(MoltError::IoError(e));
    }
    Ok(())
}
