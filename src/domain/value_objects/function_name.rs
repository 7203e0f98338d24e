//! Cloud Function name value object

use std::fmt;

use serde::Serialize;

/// Longest function name accepted for a Hosting rewrite
pub const MAX_FUNCTION_NAME_LEN: usize = 62;

/// A function name made of ASCII word characters, 1 to 62 long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FunctionName(String);

impl FunctionName {
    pub fn parse(raw: &str) -> Option<Self> {
        valid_cloud_function_name(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier used for the generated lazy-initialized server binding.
    pub fn server_binding(&self) -> String {
        format!("{}Server", self.0)
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check `raw` against `^\w{1,62}$` (ASCII word characters only).
pub fn valid_cloud_function_name(raw: &str) -> bool {
    (1..=MAX_FUNCTION_NAME_LEN).contains(&raw.len())
        && raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
