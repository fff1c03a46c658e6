//! Cached score-entry removal from the identity store.

use crate::core::error::MoltError;
use crate::core::store;
use std::path::Path;

/// Key prefix for per-user cached score entries.
pub const CACHE_KEY_PREFIX: &str = "scoreInfo_";

/// Result of a cache-entry removal.
#[derive(Debug, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Entry removed and store rewritten.
    Removed,
    /// No entry for this user id (or no user id given).
    NotPresent,
    /// No identity store on disk.
    NoStore,
}

/// Drop the `scoreInfo_<user_id>` entry and persist the store. Empty user
/// ids, absent keys, and absent stores are all explicit no-ops.
pub fn clear_cache_entry(storage_json: &Path, user_id: &str) -> Result<CacheOutcome, MoltError> {
    if user_id.is_empty() {
        return Ok(CacheOutcome::NotPresent);
    }
    let Some(mut record) = store::load(storage_json)? else {
        return Ok(CacheOutcome::NoStore);
    };

    let key = format!("{CACHE_KEY_PREFIX}{user_id}");
    if !record.remove(&key) {
        return Ok(CacheOutcome::NotPresent);
    }

    store::save(storage_json, &record)?;
    Ok(CacheOutcome::Removed)
}
