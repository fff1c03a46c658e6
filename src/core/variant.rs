//! Application locator: variant detection and config-tree path resolution.
//!
//! Every supported install shares one configuration-tree shape under the
//! per-user config root; only the variant's directory name differs. Detection
//! inspects environment markers (presence, not value); path resolution is a
//! pure join over `(home, variant)` with no existence checks.

use std::path::{Path, PathBuf};

/// Supported editor-application distributions.
///
/// Immutable once resolved for a run. `Code` is the fallback when no
/// environment marker matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Stock build (default)
    Code,
    /// Insiders channel
    CodeInsiders,
    /// OSS build
    CodeOss,
    /// VSCodium distribution
    Codium,
    /// Cursor fork
    Cursor,
}

/// Environment markers consulted during detection, in priority order.
/// First present marker wins.
const VARIANT_MARKERS: &[(&str, Variant)] = &[
    ("CURSOR_TRACE_ID", Variant::Cursor),
    ("VSCODIUM", Variant::Codium),
    ("VSCODE_OSS", Variant::CodeOss),
    ("VSCODE_INSIDERS", Variant::CodeInsiders),
];

impl Variant {
    /// Resolve the active variant through an injected marker lookup.
    ///
    /// Pure: the lookup is the only source of environment state, which keeps
    /// detection deterministic under test.
    pub fn detect(has_marker: impl Fn(&str) -> bool) -> Variant {
        for (marker, variant) in VARIANT_MARKERS {
            if has_marker(marker) {
                return *variant;
            }
        }
        Variant::Code
    }

    /// Resolve the active variant from the process environment.
    pub fn detect_from_env() -> Variant {
        Self::detect(|marker| std::env::var_os(marker).is_some())
    }

    /// Configuration-directory name under the per-user config root.
    pub fn config_dir(&self) -> &'static str {
        match self {
            Variant::Code => "Code",
            Variant::CodeInsiders => "Code - Insiders",
            Variant::CodeOss => "Code - OSS",
            Variant::Codium => "VSCodium",
            Variant::Cursor => "Cursor",
        }
    }

    /// Stable CLI-facing name.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Code => "code",
            Variant::CodeInsiders => "code-insiders",
            Variant::CodeOss => "code-oss",
            Variant::Codium => "codium",
            Variant::Cursor => "cursor",
        }
    }

    /// Parse a CLI-facing name back into a variant.
    pub fn from_name(name: &str) -> Option<Variant> {
        Variant::all().iter().find(|v| v.name() == name).copied()
    }

    pub fn all() -> &'static [Variant] {
        &[
            Variant::Code,
            Variant::CodeInsiders,
            Variant::CodeOss,
            Variant::Codium,
            Variant::Cursor,
        ]
    }
}

const USER_DIR: &str = "User";
const GLOBAL_STORAGE_DIR: &str = "globalStorage";
const WORKSPACE_STORAGE_DIR: &str = "workspaceStorage";
const STORAGE_FILE: &str = "storage.json";
const STATE_DB_FILE: &str = "state.vscdb";

/// Absolute paths into one variant's per-user configuration tree.
///
/// Existence is the caller's concern; resolution never touches the
/// filesystem.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// JSON identity store (identifiers plus application-cached keys)
    pub storage_json: PathBuf,
    /// Telemetry database; an opaque blob, only ever copied or deleted
    pub state_db: PathBuf,
    /// One cached-state subdirectory per previously opened workspace
    pub workspace_storage: PathBuf,
}

impl ConfigPaths {
    /// Derive the path bundle for `variant` under `home`. Deterministic and
    /// pure given the same inputs.
    pub fn resolve(home: &Path, variant: Variant) -> ConfigPaths {
        let user_dir = config_root(home).join(variant.config_dir()).join(USER_DIR);
        let global_storage = user_dir.join(GLOBAL_STORAGE_DIR);
        ConfigPaths {
            storage_json: global_storage.join(STORAGE_FILE),
            state_db: global_storage.join(STATE_DB_FILE),
            workspace_storage: user_dir.join(WORKSPACE_STORAGE_DIR),
        }
    }
}

/// Per-user configuration root under `home`, following platform conventions.
fn config_root(home: &Path) -> PathBuf {
    if cfg!(target_os = "macos") {
        home.join("Library").join("Application Support")
    } else if cfg!(target_os = "windows") {
        home.join("AppData").join("Roaming")
    } else {
        home.join(".config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_first_marker_wins() {
        let variant = Variant::detect(|m| m == "CURSOR_TRACE_ID" || m == "VSCODE_INSIDERS");
        assert_eq!(variant, Variant::Cursor);
    }

    #[test]
    fn test_detection_falls_back_to_code() {
        assert_eq!(Variant::detect(|_| false), Variant::Code);
    }

    #[test]
    fn test_marker_value_is_irrelevant() {
        // Detection only asks whether a marker exists; the closure stands in
        // for any presence check.
        assert_eq!(Variant::detect(|m| m == "VSCODIUM"), Variant::Codium);
    }

    #[test]
    fn test_names_round_trip() {
        for variant in Variant::all() {
            assert_eq!(Variant::from_name(variant.name()), Some(*variant));
        }
        assert_eq!(Variant::from_name("emacs"), None);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let home = Path::new("/home/crab");
        for variant in Variant::all() {
            let a = ConfigPaths::resolve(home, *variant);
            let b = ConfigPaths::resolve(home, *variant);
            assert_eq!(a.storage_json, b.storage_json);
            assert_eq!(a.state_db, b.state_db);
            assert_eq!(a.workspace_storage, b.workspace_storage);
            assert!(a.storage_json.starts_with(home));
        }
    }

    #[test]
    fn test_resolve_places_stores_in_global_storage() {
        let paths = ConfigPaths::resolve(Path::new("/home/crab"), Variant::Code);
        assert!(paths.storage_json.ends_with("User/globalStorage/storage.json"));
        assert!(paths.state_db.ends_with("User/globalStorage/state.vscdb"));
        assert!(paths.workspace_storage.ends_with("User/workspaceStorage"));
    }

    #[test]
    fn test_variants_resolve_to_distinct_trees() {
        let home = Path::new("/home/crab");
        let code = ConfigPaths::resolve(home, Variant::Code);
        let cursor = ConfigPaths::resolve(home, Variant::Cursor);
        assert_ne!(code.storage_json, cursor.storage_json);
    }
}
