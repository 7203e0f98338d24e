//! Error types for the adapter
//!
//! Library errors use `thiserror`. Configuration failures are tagged variants
//! carrying structured context; the human-readable text is rendered by
//! `Display` at the boundary, never assembled inside the resolver.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{BuilderError, BundleError, FsError};

/// Result type alias for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Main error type for adapter operations
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Invalid or inconsistent hosting configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Staging the deployment failed
    #[error(transparent)]
    Stage(#[from] StageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Adapter options file could not be parsed
    #[error("invalid adapter options in {file}: {message}")]
    InvalidOptions { file: PathBuf, message: String },
}

/// A violated hosting-configuration invariant.
///
/// Each variant maps to one stable code (see [`ConfigError::code`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the adapter requires a \"firebase.json\" file, \"{path}\" does not exist")]
    FileNotFound { path: PathBuf },

    #[error("failure while parsing {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("\"hosting\" config missing from {path}")]
    MissingHostingField { path: PathBuf },

    #[error(
        "multiple \"hosting\" configurations found in {path}, each requires either a \"site\" or \"target\" field; entry {index} has neither"
    )]
    SiteIdentifierMissing { path: PathBuf, index: usize },

    #[error(
        "multiple \"hosting\" configurations found in {path}, but no \"target\" was specified in the adapter options; choose one of [{}]",
        candidates.join(", ")
    )]
    AmbiguousSiteSelection {
        path: PathBuf,
        candidates: Vec<String>,
    },

    #[error(
        "multiple \"hosting\" configurations found in {path} but no match for \"{requested}\"; \"hosting[].site\" & \"hosting[].target\" values: [{}]{}",
        candidates.join(", "),
        suggestion.as_ref().map(|s| format!(". Did you mean '{}'?", s)).unwrap_or_default()
    )]
    NoMatchingSite {
        path: PathBuf,
        requested: String,
        candidates: Vec<String>,
        suggestion: Option<String>,
    },

    #[error("required \"hosting.public\" field not found for hosting configuration in {path}")]
    MissingPublicDir { path: PathBuf },

    #[error("required \"hosting.public\" field in {path} is an empty string, a directory is required")]
    EmptyPublicDir { path: PathBuf },

    #[error(
        "required \"hosting[].rewrites\" field not found (or empty) for the matched hosting configuration in {path}; add a rewrite rule matching \"source\":\"{source_match}\""
    )]
    MissingRewrites { path: PathBuf, source_match: String },

    #[error(
        "\"hosting[].rewrites[]\" in {path} does not contain a rule with \"source\":\"{source_match}\" and either \"function\":\"<name>\" or \"run\":{{...}}"
    )]
    NoMatchingRewrite { path: PathBuf, source_match: String },

    #[error("required \"serviceId\" field not found for the Cloud Run rewrite rule in {path}")]
    MissingServiceId { path: PathBuf },

    #[error(
        "Cloud Run \"serviceId\":\"{service_id}\" must use only lowercase alphanumeric characters and dashes, cannot begin or end with a dash, and cannot be longer than 63 characters"
    )]
    InvalidServiceId { path: PathBuf, service_id: String },

    #[error(
        "Cloud Run \"region\":\"{region}\" is not supported by Hosting rewrites, it should be \"{expected}\""
    )]
    InvalidRegion {
        path: PathBuf,
        region: String,
        expected: String,
    },

    #[error(
        "Cloud Function name \"{name}\" must use only alphanumeric characters and underscores and cannot be longer than 62 characters"
    )]
    InvalidFunctionName { path: PathBuf, name: String },

    #[error("required \"functions.source\" field is missing from {path}")]
    MissingFunctionsSource { path: PathBuf },

    #[error(
        "Node.js runtime not supported: requires either \"firebase.json:functions.runtime\" with one of {} or \"package.json:engines.node\" with one of {}",
        supported.iter().map(|v| format!("nodejs{}", v)).collect::<Vec<_>>().join(","),
        supported.join(",")
    )]
    UnsupportedRuntime {
        declared: Option<String>,
        supported: Vec<String>,
    },

    #[error(
        "\"firebase.json:hosting.public\" ({dest}) must be a different directory to the static assets directory ({source_dir})"
    )]
    IdenticalAssetDirs { source_dir: PathBuf, dest: PathBuf },

    #[error(
        "output directory {dir} overlaps project input {input}; staging erases its output directories, choose one outside the project sources"
    )]
    OverlappingOutputDir { dir: PathBuf, input: PathBuf },
}

impl ConfigError {
    /// Stable identifying code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "FileNotFound",
            ConfigError::ParseError { .. } => "ParseError",
            ConfigError::MissingHostingField { .. } => "MissingHostingField",
            ConfigError::SiteIdentifierMissing { .. } => "SiteIdentifierMissing",
            ConfigError::AmbiguousSiteSelection { .. } => "AmbiguousSiteSelection",
            ConfigError::NoMatchingSite { .. } => "NoMatchingSite",
            ConfigError::MissingPublicDir { .. } => "MissingPublicDir",
            ConfigError::EmptyPublicDir { .. } => "EmptyPublicDir",
            ConfigError::MissingRewrites { .. } => "MissingRewrites",
            ConfigError::NoMatchingRewrite { .. } => "NoMatchingRewrite",
            ConfigError::MissingServiceId { .. } => "MissingServiceId",
            ConfigError::InvalidServiceId { .. } => "InvalidServiceId",
            ConfigError::InvalidRegion { .. } => "InvalidRegion",
            ConfigError::InvalidFunctionName { .. } => "InvalidFunctionName",
            ConfigError::MissingFunctionsSource { .. } => "MissingFunctionsSource",
            ConfigError::UnsupportedRuntime { .. } => "UnsupportedRuntime",
            ConfigError::IdenticalAssetDirs { .. } => "IdenticalAssetDirs",
            ConfigError::OverlappingOutputDir { .. } => "OverlappingOutputDir",
        }
    }
}

/// Failures while staging a resolved plan.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Functions package manifest could not be read or parsed
    #[error("error reading {path}: {message}")]
    FunctionsPackage { path: PathBuf, message: String },

    /// Functions package manifest has no `main` entry
    #[error("error reading {path}: required field \"main\" missing")]
    MissingFunctionsMain { path: PathBuf },

    /// Project package manifest could not be read or rewritten
    #[error("error preparing {path}: {message}")]
    ProjectPackage { path: PathBuf, message: String },

    /// File system collaborator failed
    #[error("{operation} failed for {path}: {message}")]
    FileSystem {
        operation: &'static str,
        path: PathBuf,
        message: String,
    },

    /// Bundler failures pass through untouched
    #[error(transparent)]
    Bundler(#[from] BundleError),
}

impl From<BuilderError> for StageError {
    fn from(err: BuilderError) -> Self {
        StageError::FileSystem {
            operation: err.operation,
            path: err.path,
            message: err.message,
        }
    }
}

impl StageError {
    /// Wrap a file system failure with the operation and path it happened on.
    pub fn fs(operation: &'static str, path: &std::path::Path, err: FsError) -> Self {
        StageError::FileSystem {
            operation,
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Stable identifying code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            StageError::Config(err) => err.code(),
            StageError::FunctionsPackage { .. } => "FunctionsPackage",
            StageError::MissingFunctionsMain { .. } => "MissingFunctionsMain",
            StageError::ProjectPackage { .. } => "ProjectPackage",
            StageError::FileSystem { .. } => "FileSystem",
            StageError::Bundler(_) => "Bundler",
        }
    }
}

impl AdapterError {
    /// Stable identifying code, when the failure has one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AdapterError::Config(err) => Some(err.code()),
            AdapterError::Stage(err) => Some(err.code()),
            AdapterError::InvalidOptions { .. } => Some("InvalidOptions"),
            AdapterError::Io(_) | AdapterError::Json(_) => None,
        }
    }
}
