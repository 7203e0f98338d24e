//! Domain Services
//!
//! Resolution of the hosting configuration and the cross-field checks the
//! stager runs before touching disk. File access goes through ports only.

mod asset_dirs;
mod config_resolver;
mod runtime;
pub mod suggest;

pub use asset_dirs::{
    ensure_erase_spares_inputs, ensure_static_resource_dirs_differ, normalize_lexically,
};
pub use config_resolver::{resolve_document, resolve_parsed, ConfigResolver, ResolveOptions};
pub use runtime::ensure_compatible_runtime;
pub use suggest::{closest_match, levenshtein};
