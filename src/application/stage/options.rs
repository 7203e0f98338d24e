//! Stage Options

use std::path::PathBuf;

/// Options for the stage use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOptions {
    /// Project root (where the project `package.json` and lockfiles live)
    pub project_root: PathBuf,
    /// Cloud Run staging directory override, relative to the project root
    pub cloud_run_build_dir: Option<PathBuf>,
    /// Rewrite source the server is routed from, recorded in `routes.json`
    pub source_rewrite_match: String,
    /// Bundler `--platform` value
    pub bundler_platform: String,
}

impl StageOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            cloud_run_build_dir: None,
            source_rewrite_match: "**".to_string(),
            bundler_platform: "node".to_string(),
        }
    }

    pub fn with_cloud_run_build_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.cloud_run_build_dir = dir;
        self
    }

    pub fn with_source_rewrite_match(mut self, source: impl Into<String>) -> Self {
        self.source_rewrite_match = source.into();
        self
    }

    pub fn with_bundler_platform(mut self, platform: impl Into<String>) -> Self {
        self.bundler_platform = platform.into();
        self
    }
}

impl Default for StageOptions {
    fn default() -> Self {
        Self::new(".")
    }
}
