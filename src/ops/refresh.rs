//! Orchestrated refresh across the mutation operations.
//!
//! Sub-operations run in a fixed order: reset identifiers, clean telemetry,
//! clear workspace storage, clear the cache entry. A failing step lands in
//! the summary's error list and never aborts the steps after it.

use crate::core::ident::IdentityTriple;
use crate::core::variant::ConfigPaths;
use crate::ops::cache::{self, CacheOutcome};
use crate::ops::reset::{self, ResetOutcome};
use crate::ops::telemetry::{self, TelemetryOutcome};
use crate::ops::workspace;
use serde::Serialize;
use std::path::PathBuf;

/// Which sub-operations a refresh runs.
///
/// Defaults mirror the stock behavior: identifiers and the cache entry are
/// refreshed, telemetry is cleaned, workspace storage is kept.
#[derive(Debug, Clone)]
pub struct RefreshOptions {
    pub reset_identifiers: bool,
    pub clean_telemetry: bool,
    pub clear_workspace: bool,
    pub clear_cache: bool,
    /// User id whose `scoreInfo_` entry is dropped when `clear_cache` is set.
    /// `None` makes the cache step a no-op.
    pub user_id: Option<String>,
}

impl Default for RefreshOptions {
    fn default() -> RefreshOptions {
        RefreshOptions {
            reset_identifiers: true,
            clean_telemetry: true,
            clear_workspace: false,
            clear_cache: true,
            user_id: None,
        }
    }
}

/// Aggregate outcome of one refresh run.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    /// Freshly minted identifiers, when the reset step rewrote a store.
    pub identifiers: Option<IdentityTriple>,
    /// True when the reset step ran but found no identity store.
    pub store_missing: bool,
    /// Telemetry step outcome: `Some(true)` removed, `Some(false)` absent.
    pub telemetry_cleared: Option<bool>,
    /// Backup artifact produced by the telemetry step.
    pub telemetry_backup: Option<PathBuf>,
    /// Workspace subdirectories removed, when that step ran.
    pub workspace_cleared: Option<usize>,
    /// Cache step outcome: `Some(true)` when an entry was removed.
    pub cache_cleared: Option<bool>,
    /// Non-fatal sub-operation failures, in execution order.
    pub errors: Vec<String>,
}

/// Run the enabled sub-operations in fixed order and aggregate the results.
pub fn refresh(paths: &ConfigPaths, options: &RefreshOptions) -> RefreshSummary {
    let mut summary = RefreshSummary::default();

    if options.reset_identifiers {
        match reset::reset_identifiers(paths) {
            Ok(ResetOutcome::Reset(triple)) => summary.identifiers = Some(triple),
            Ok(ResetOutcome::NoStore) => summary.store_missing = true,
            Err(e) => summary.errors.push(format!("reset identifiers: {e}")),
        }
    }

    if options.clean_telemetry {
        match telemetry::clean_telemetry(paths) {
            Ok(TelemetryOutcome::Cleared { backup }) => {
                summary.telemetry_cleared = Some(true);
                summary.telemetry_backup = Some(backup);
            }
            Ok(TelemetryOutcome::NoDatabase) => summary.telemetry_cleared = Some(false),
            Err(e) => summary.errors.push(format!("clean telemetry: {e}")),
        }
    }

    if options.clear_workspace {
        match workspace::clear_workspace_storage(paths) {
            Ok(report) => {
                summary.workspace_cleared = Some(report.removed);
                for failure in report.failures {
                    summary.errors.push(format!("clear workspace: {failure}"));
                }
            }
            Err(e) => summary.errors.push(format!("clear workspace: {e}")),
        }
    }

    if options.clear_cache {
        let user_id = options.user_id.as_deref().unwrap_or("");
        match cache::clear_cache_entry(&paths.storage_json, user_id) {
            Ok(outcome) => summary.cache_cleared = Some(outcome == CacheOutcome::Removed),
            Err(e) => summary.errors.push(format!("clear cache: {e}")),
        }
    }

    summary
}
