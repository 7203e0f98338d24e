//! Adapter options
//!
//! Options are layered, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (FIREBASE_ADAPTER_*)
//! 3. Project config (firebase-adapter.toml)
//! 4. Built-in defaults

mod env_validator;
mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use env_validator::EnvVarValidator;
pub use loader::{apply_env, load_or_default, load_with_warnings, with_env_overrides, ENV_PREFIX};
pub use types::{AdapterOptions, BundlerOptions, BUNDLER_PLATFORMS, CONFIG_FILE_NAME};
