//! Function runtime compatibility

use crate::domain::value_objects::{RuntimeVersion, SUPPORTED_NODE_VERSIONS};
use crate::error::ConfigError;

/// Pick the Node.js major version the function will run on.
///
/// The platform runtime (`functions.runtime` in `firebase.json`) wins over the
/// package engine (`engines.node`), matching how the deploy tool chooses.
/// Whichever is declared must normalize to a supported version.
pub fn ensure_compatible_runtime(
    package_engine: Option<&str>,
    platform_runtime: Option<&str>,
) -> Result<RuntimeVersion, ConfigError> {
    let declared = platform_runtime.or(package_engine);

    declared
        .and_then(RuntimeVersion::parse)
        .ok_or_else(|| ConfigError::UnsupportedRuntime {
            declared: declared.map(str::to_string),
            supported: SUPPORTED_NODE_VERSIONS.iter().map(|v| v.to_string()).collect(),
        })
}
