//! Molt: shed and regrow editor identity state.
//!
//! **Molt is a local identity-store editor for VS Code-family installs.**
//!
//! Editor applications persist machine/device/session identifiers, a
//! telemetry database, and per-workspace cached state under their per-user
//! configuration tree. Molt locates the tree for the active variant and
//! rewrites that state on demand:
//!
//! - **Reset identifiers**: every recognized identifier key present in the
//!   JSON identity store gets a freshly minted value; unknown keys survive
//!   untouched, absent keys stay absent.
//! - **Clean telemetry**: the opaque telemetry database is copied to a
//!   timestamped backup, verified byte-for-byte, then removed.
//! - **Clear workspace storage**: per-workspace cache subdirectories are
//!   removed best-effort; plain files are left alone.
//! - **Clear cache entry**: one `scoreInfo_<user>` key is dropped.
//!
//! All paths are computed fresh per invocation from `(home, variant)`;
//! nothing is cached across runs. The host application may rewrite the
//! identity store concurrently. Saves detect that via a modification-time
//! fingerprint and fail with `ConcurrentModification` rather than silently
//! overwriting, but the load-modify-save window itself is inherent to the
//! file contract.
//!
//! # Crate Structure
//!
//! - [`core`]: fundamental types (variant locator, store accessor,
//!   identifier minting, rendering helpers)
//! - [`ops`]: mutation operations and the refresh orchestrator

pub mod core;
pub mod ops;

use crate::core::error::MoltError;
use crate::core::ident;
use crate::core::output;
use crate::core::variant::{ConfigPaths, Variant};
use crate::ops::info::{self, InfoOutcome};
use crate::ops::refresh::{self, RefreshOptions, RefreshSummary};

use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "molt",
    version = env!("CARGO_PKG_VERSION"),
    about = "Shed and regrow editor identity state: reset machine/device/session identifiers, purge telemetry with verified backups, clear workspace caches. 🦀"
)]
struct Cli {
    /// Reset machine/device/session identifiers (runs the refresh pipeline).
    #[clap(long, short = 'r')]
    reset: bool,
    /// Show the current identifiers and the resolved storage path.
    #[clap(long, short = 'i')]
    info: bool,
    /// With --reset: back up and remove the telemetry database.
    #[clap(long)]
    telemetry: bool,
    /// With --reset: remove per-workspace cached state directories.
    #[clap(long)]
    workspace: bool,
    /// With --reset: drop the cached score entry for this user id.
    #[clap(long, value_name = "USER_ID")]
    user: Option<String>,
    /// Target variant: 'code', 'code-insiders', 'code-oss', 'codium' or
    /// 'cursor'. Defaults to environment detection.
    #[clap(long)]
    variant: Option<String>,
    /// Home directory to operate on (defaults to the current user's home).
    #[clap(long)]
    home: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    format: String,
}

pub fn run() -> Result<(), MoltError> {
    let cli = Cli::parse();

    if !cli.reset && !cli.info {
        // Bare invocation is a usage request, not a failure.
        let mut command = Cli::command();
        command.print_help().map_err(MoltError::IoError)?;
        println!();
        return Ok(());
    }

    let variant = match &cli.variant {
        Some(name) => Variant::from_name(name).ok_or_else(|| {
            MoltError::ValidationError(format!(
                "unknown variant '{}'; expected one of: {}",
                name,
                Variant::all()
                    .iter()
                    .map(|v| v.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?,
        None => Variant::detect_from_env(),
    };

    let home = match cli.home {
        Some(dir) => dir,
        None => dirs::home_dir().ok_or_else(|| {
            MoltError::PathError("could not determine the current home directory".to_string())
        })?,
    };
    let paths = ConfigPaths::resolve(&home, variant);

    if cli.info {
        let outcome = info::current_info(&paths, variant)?;
        render_info(&outcome, &cli.format);
        return Ok(());
    }

    let options = RefreshOptions {
        clean_telemetry: cli.telemetry,
        clear_workspace: cli.workspace,
        user_id: cli.user.clone(),
        ..RefreshOptions::default()
    };
    let summary = refresh::refresh(&paths, &options);
    render_summary(variant, &summary, &cli.format);
    Ok(())
}

/// One identifier line for the info report, annotated when the stored value
/// does not match the canonical shape.
fn ident_line(label: &str, value: &Option<String>) -> String {
    match value {
        Some(value) if ident::is_canonical(value) => {
            format!("  {} {:<12} {}", "▸".bright_cyan(), label, value)
        }
        Some(value) => format!(
            "  {} {:<12} {} {}",
            "▸".bright_cyan(),
            label,
            value,
            "(non-canonical)".yellow()
        ),
        None => format!("  {} {:<12} {}", "▸".bright_cyan(), label, "absent".dimmed()),
    }
}

fn render_info(outcome: &InfoOutcome, format: &str) {
    if format == "json" {
        let payload = match outcome {
            InfoOutcome::Found(info) => serde_json::json!({ "found": true, "info": info }),
            InfoOutcome::NoStore { storage_path } => {
                serde_json::json!({ "found": false, "storagePath": storage_path })
            }
        };
        println!("{}", serde_json::to_string_pretty(&payload).unwrap());
        return;
    }

    match outcome {
        InfoOutcome::Found(info) => {
            println!("{} {}", "Variant:".bold(), info.variant);
            println!("{} {}", "Identity store:".bold(), info.storage_path.display());
            println!("{}", ident_line("machineId", &info.machine_id));
            println!("{}", ident_line("deviceId", &info.device_id));
            println!("{}", ident_line("sessionId", &info.session_id));
        }
        InfoOutcome::NoStore { storage_path } => {
            println!(
                "{} no identity store at {}",
                "Not found:".yellow().bold(),
                storage_path.display()
            );
        }
    }
}

fn render_summary(variant: Variant, summary: &RefreshSummary, format: &str) {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(summary).unwrap());
        return;
    }

    println!("{} variant '{}'", "Refreshed".bright_green().bold(), variant.name());

    if let Some(triple) = &summary.identifiers {
        println!("  {} machineId    {}", "▸".bright_cyan(), triple.machine_id);
        println!("  {} deviceId     {}", "▸".bright_cyan(), triple.device_id);
        println!("  {} sessionId    {}", "▸".bright_cyan(), triple.session_id);
    } else if summary.store_missing {
        println!(
            "  {} no identity store found; identifiers left as-is",
            "▸".bright_yellow()
        );
    }

    match (summary.telemetry_cleared, &summary.telemetry_backup) {
        (Some(true), Some(backup)) => println!(
            "  {} telemetry database backed up to {} and removed",
            "▸".bright_cyan(),
            backup.display()
        ),
        (Some(false), _) => println!(
            "  {} no telemetry database found",
            "▸".bright_yellow()
        ),
        _ => {}
    }

    if let Some(count) = summary.workspace_cleared {
        println!(
            "  {} workspace storage: {} entries removed",
            "▸".bright_cyan(),
            count
        );
    }

    if let Some(removed) = summary.cache_cleared {
        let note = if removed { "removed" } else { "not present" };
        println!("  {} cache entry: {}", "▸".bright_cyan(), note);
    }

    if !summary.errors.is_empty() {
        eprintln!("{}", "Some steps failed:".red().bold());
        for line in output::bullet_lines(&summary.errors, 5, 120) {
            eprintln!("{}", line);
        }
    }
}
