//! Node.js runtime version value object

use std::fmt;

use serde::Serialize;

/// Node.js major versions the function runtime can execute the server bundle on
pub const SUPPORTED_NODE_VERSIONS: &[&str] = &["14", "16", "18", "20", "22"];

/// A supported Node.js major version, normalized to the bare number ("20").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RuntimeVersion(String);

impl RuntimeVersion {
    /// Normalize a declaration and accept it only if supported.
    ///
    /// Understands platform runtimes (`nodejs18`) and package engine ranges
    /// (`18`, `18.x`, `>=18`, `^18.2.0`).
    pub fn parse(declared: &str) -> Option<Self> {
        let major = normalize_version(declared)?;
        SUPPORTED_NODE_VERSIONS
            .contains(&major.as_str())
            .then_some(Self(major))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduce a runtime or engine declaration to its leading major version.
pub fn normalize_version(declared: &str) -> Option<String> {
    let trimmed = declared.trim();
    let trimmed = trimmed.strip_prefix("nodejs").unwrap_or(trimmed);
    let digits: String = trimmed
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
