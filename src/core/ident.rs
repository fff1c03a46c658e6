//! Identifier minting and shape checks.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use uuid::Uuid;

/// Canonical 8-4-4-4-12 hyphenated hex shape: version nibble `4`, variant
/// nibble in `{8,9,a,b}`.
static CANONICAL_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("canonical identifier pattern compiles")
});

/// Mint a fresh identifier in the canonical hyphenated form.
///
/// Uniqueness across calls is the only functional requirement; the v4
/// collision bound covers that at any human-invocation scale.
pub fn new_identifier() -> String {
    Uuid::new_v4().to_string()
}

/// Whether `value` matches the canonical identifier shape.
pub fn is_canonical(value: &str) -> bool {
    CANONICAL_V4.is_match(value)
}

/// One freshly minted machine/device/session identifier set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityTriple {
    pub machine_id: String,
    pub device_id: String,
    pub session_id: String,
}

impl IdentityTriple {
    pub fn fresh() -> IdentityTriple {
        IdentityTriple {
            machine_id: new_identifier(),
            device_id: new_identifier(),
            session_id: new_identifier(),
        }
    }
}
