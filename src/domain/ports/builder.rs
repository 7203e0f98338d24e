//! Builder port - the framework build tool's side of the adapter contract
//!
//! The framework's build pipeline owns the compiled output. The stager only
//! asks it to place files and to report progress.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Result type for builder operations
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Failure reported by a builder operation.
#[derive(Error, Debug)]
#[error("{operation} failed for {path}: {message}")]
pub struct BuilderError {
    pub operation: &'static str,
    pub path: PathBuf,
    pub message: String,
}

impl BuilderError {
    pub fn new(operation: &'static str, path: &Path, message: impl Into<String>) -> Self {
        Self {
            operation,
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Severity of an operator-facing log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Low-importance progress detail
    Minor,
    Info,
    Warn,
}

/// Collaborator supplied by the surrounding build tool.
///
/// Copy operations return the files they wrote so the stager can report them.
pub trait Builder {
    /// Copy the project's static assets into `dest`
    fn copy_static_files(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>>;

    /// Copy the compiled client bundle into `dest`
    fn copy_client_files(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>>;

    /// Copy the compiled server bundle into `dest`
    fn copy_server_files(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>>;

    /// Remove `dir` and everything below it; a missing directory is not an error
    fn erase_directory(&self, dir: &Path) -> BuilderResult<()>;

    /// Write prerendered pages into `dest`
    fn prerender(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>>;

    /// Render the server manifest module, importing server code from `relative_path`
    fn generate_manifest(&self, relative_path: &str) -> BuilderResult<String>;

    /// The project's static asset source directory
    fn static_assets_dir(&self) -> &Path;

    /// The framework's compiled output directory
    fn build_output_dir(&self) -> &Path;

    /// Emit an operator-facing log line
    fn log(&self, level: LogLevel, message: &str);
}
