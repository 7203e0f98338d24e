//! Adapter option types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::ResolveOptions;
use crate::error::AdapterResult;

use super::loader::{self, ConfigWarning};

/// Project config file name, looked up in the project root
pub const CONFIG_FILE_NAME: &str = "firebase-adapter.toml";

/// Options for one adapt run
///
/// ```toml
/// firebase_json = "firebase.json"
/// target = "app"
/// source_rewrite_match = "**"
///
/// [bundler]
/// command = "esbuild"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterOptions {
    /// Hosting configuration document
    #[serde(alias = "firebaseJson")]
    pub firebase_json: PathBuf,

    /// Hosting entry to deploy when several are declared
    #[serde(alias = "hosting_site", alias = "hostingSite")]
    pub target: Option<String>,

    /// Rewrite `source` that routes to the server
    #[serde(alias = "sourceRewriteMatch")]
    pub source_rewrite_match: String,

    /// Cloud Run staging directory (defaults to `.<serviceId>`)
    #[serde(alias = "cloudRunBuildDir")]
    pub cloud_run_build_dir: Option<PathBuf>,

    /// Project static asset source directory
    pub static_dir: PathBuf,

    /// Framework build output directory
    pub output_dir: PathBuf,

    pub bundler: BundlerOptions,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            firebase_json: PathBuf::from("firebase.json"),
            target: None,
            source_rewrite_match: "**".to_string(),
            cloud_run_build_dir: None,
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from(".svelte-kit/output"),
            bundler: BundlerOptions::default(),
        }
    }
}

impl AdapterOptions {
    /// Load options from a TOML file, dropping any warnings
    pub fn load(path: &Path) -> AdapterResult<Self> {
        let (options, _warnings) = loader::load_with_warnings(path)?;
        Ok(options)
    }

    /// Load options from a TOML file and collect non-fatal warnings
    pub fn load_with_warnings(path: &Path) -> AdapterResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Selection inputs for the resolver, with paths anchored at `project_root`
    pub fn resolve_options(&self, project_root: &Path) -> ResolveOptions {
        ResolveOptions {
            firebase_json_path: project_root.join(&self.firebase_json),
            target: self.target.clone(),
            source_rewrite_match: self.source_rewrite_match.clone(),
        }
    }
}

/// External bundler invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlerOptions {
    /// Executable to run
    pub command: String,

    /// esbuild `--platform` value
    pub platform: String,

    /// Extra arguments appended after the generated ones
    pub extra_args: Vec<String>,
}

impl Default for BundlerOptions {
    fn default() -> Self {
        Self {
            command: "esbuild".to_string(),
            platform: "node".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// Values accepted for the bundler platform
pub const BUNDLER_PLATFORMS: &[&str] = &["node", "neutral", "browser"];
