//! Read-only identity report.

use crate::core::error::MoltError;
use crate::core::store::{self, IdentityRecord};
use crate::core::variant::{ConfigPaths, Variant};
use serde::Serialize;
use std::path::PathBuf;

/// Current identifier values for one variant's identity store.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityInfo {
    pub variant: String,
    pub storage_path: PathBuf,
    pub machine_id: Option<String>,
    pub device_id: Option<String>,
    pub session_id: Option<String>,
}

/// Result of an info lookup.
#[derive(Debug)]
pub enum InfoOutcome {
    Found(IdentityInfo),
    /// Store file absent. Expected on fresh installs; not an error.
    NoStore { storage_path: PathBuf },
}

/// Telemetry-prefixed keys win over their bare counterparts when both exist.
fn preferred<'a>(record: &'a IdentityRecord, prefixed: &str, bare: &str) -> Option<&'a str> {
    record.get_str(prefixed).or_else(|| record.get_str(bare))
}

/// Load the store read-only and report the current identifier values.
pub fn current_info(paths: &ConfigPaths, variant: Variant) -> Result<InfoOutcome, MoltError> {
    let Some(record) = store::load(&paths.storage_json)? else {
        return Ok(InfoOutcome::NoStore {
            storage_path: paths.storage_json.clone(),
        });
    };

    Ok(InfoOutcome::Found(IdentityInfo {
        variant: variant.name().to_string(),
        storage_path: paths.storage_json.clone(),
        machine_id: preferred(&record, "telemetry.machineId", "machineId").map(str::to_string),
        device_id: preferred(&record, "telemetry.devDeviceId", "deviceId").map(str::to_string),
        session_id: preferred(&record, "telemetry.sessionId", "sessionId").map(str::to_string),
    }))
}
