//! Bundler port
//!
//! Produces the single server entrypoint file. Bundling is an external
//! tool's job; its failures are surfaced unchanged.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Options handed to the bundler, mirroring the usual
/// `{entryPoints, outfile, bundle, platform, target}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleOptions {
    pub entry_points: Vec<PathBuf>,
    pub outfile: PathBuf,
    pub bundle: bool,
    pub platform: String,
    pub target: String,
}

impl BundleOptions {
    /// Bundle a single entry for Node.js at the given major version.
    pub fn node(entry: impl Into<PathBuf>, outfile: impl Into<PathBuf>, version: &str) -> Self {
        Self {
            entry_points: vec![entry.into()],
            outfile: outfile.into(),
            bundle: true,
            platform: "node".to_string(),
            target: format!("node{}", version),
        }
    }
}

/// Bundler failures
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("bundler `{command}` could not be started: {message}")]
    Spawn { command: String, message: String },

    #[error("bundler `{command}` failed with exit code {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// External bundler invocation
pub trait Bundler {
    /// Short identifier for logs
    fn name(&self) -> &str;

    /// Bundle `options.entry_points` into `options.outfile`
    fn bundle(&self, options: &BundleOptions) -> Result<(), BundleError>;
}
