//! Telemetry database purge with verified backup.
//!
//! The telemetry database is an opaque blob: it is copied and deleted, never
//! parsed. The original is only removed once the backup is confirmed
//! byte-identical, so a failed copy can never lose data.

use crate::core::error::MoltError;
use crate::core::time;
use crate::core::variant::ConfigPaths;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of a telemetry purge.
#[derive(Debug)]
pub enum TelemetryOutcome {
    /// Database copied to `backup`, then removed.
    Cleared { backup: PathBuf },
    /// No telemetry database on disk; nothing to do.
    NoDatabase,
}

fn file_digest(path: &Path) -> Result<String, MoltError> {
    let bytes = fs::read(path).map_err(MoltError::IoError)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Back up the telemetry database to a millisecond-suffixed sibling and
/// delete the original.
pub fn clean_telemetry(paths: &ConfigPaths) -> Result<TelemetryOutcome, MoltError> {
    let source = &paths.state_db;
    if !source.exists() {
        return Ok(TelemetryOutcome::NoDatabase);
    }

    let backup = time::backup_path(source);
    if let Err(e) = fs::copy(source, &backup) {
        // A failed copy may leave a partial backup behind; drop it so the
        // only surviving artifact is the intact original.
        let _ = fs::remove_file(&backup);
        return Err(MoltError::IoError(e));
    }

    let source_digest = file_digest(source)?;
    let backup_digest = file_digest(&backup)?;
    if source_digest != backup_digest {
        let _ = fs::remove_file(&backup);
        return Err(MoltError::ValidationError(format!(
            "backup verification failed for {}",
            source.display()
        )));
    }

    fs::remove_file(source).map_err(MoltError::IoError)?;
    Ok(TelemetryOutcome::Cleared { backup })
}
