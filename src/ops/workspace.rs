//! Per-workspace cached-state removal.

use crate::core::error::MoltError;
use crate::core::variant::ConfigPaths;
use std::fs;

/// Aggregate result of a workspace-storage clear.
#[derive(Debug, Default)]
pub struct WorkspaceClearReport {
    /// Workspace subdirectories removed.
    pub removed: usize,
    /// Entries that could not be removed. Removal is best-effort per entry;
    /// one failure never aborts the rest.
    pub failures: Vec<String>,
}

/// Remove every immediate subdirectory of the workspace-storage directory.
/// Plain files at that level are left alone. An absent directory is a no-op.
pub fn clear_workspace_storage(paths: &ConfigPaths) -> Result<WorkspaceClearReport, MoltError> {
    let dir = &paths.workspace_storage;
    let mut report = WorkspaceClearReport::default();
    if !dir.exists() {
        return Ok(report);
    }

    for entry in fs::read_dir(dir).map_err(MoltError::IoError)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.failures.push(format!("unreadable entry: {e}"));
                continue;
            }
        };
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match fs::remove_dir_all(&path) {
            Ok(()) => report.removed += 1,
            Err(e) => report.failures.push(format!("{}: {e}", path.display())),
        }
    }

    Ok(report)
}
