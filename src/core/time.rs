//! Timestamp helpers for backup artifact naming.

use std::path::{Path, PathBuf};

/// Returns unix-epoch milliseconds.
pub fn now_epoch_millis() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Sibling backup path for `original`: `<original>.backup.<unix-millis>`.
pub fn backup_path(original: &Path) -> PathBuf {
    let file_name = original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "backup".to_string());
    original.with_file_name(format!("{}.backup.{}", file_name, now_epoch_millis()))
}
