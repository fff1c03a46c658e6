//! Identifier reset over the identity store.

use crate::core::error::MoltError;
use crate::core::ident::IdentityTriple;
use crate::core::store;
use crate::core::variant::ConfigPaths;

/// Identifier keys recognized across supported variants.
///
/// Only keys already present in a store are overwritten; absent keys are
/// left absent, and every other key survives the rewrite untouched.
pub const IDENTIFIER_KEYS: [&str; 6] = [
    "telemetry.machineId",
    "telemetry.devDeviceId",
    "telemetry.sessionId",
    "machineId",
    "deviceId",
    "sessionId",
];

/// Result of an identifier reset.
#[derive(Debug)]
pub enum ResetOutcome {
    /// Store rewritten with this freshly minted triple.
    Reset(IdentityTriple),
    /// No identity store on disk; nothing to rewrite.
    NoStore,
}

/// Mint a fresh identifier triple and rewrite every recognized key present
/// in the store: machine keys get the machine id, device keys the device id,
/// the remaining recognized keys the session id.
pub fn reset_identifiers(paths: &ConfigPaths) -> Result<ResetOutcome, MoltError> {
    let Some(mut record) = store::load(&paths.storage_json)? else {
        return Ok(ResetOutcome::NoStore);
    };

    let triple = IdentityTriple::fresh();
    for key in IDENTIFIER_KEYS {
        if !record.contains_key(key) {
            continue;
        }
        let lower = key.to_ascii_lowercase();
        let value = if lower.contains("machine") {
            &triple.machine_id
        } else if lower.contains("device") {
            &triple.device_id
        } else {
            &triple.session_id
        };
        record.set_string(key, value);
    }

    store::save(&paths.storage_json, &record)?;
    Ok(ResetOutcome::Reset(triple))
}
