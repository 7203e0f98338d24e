//! Stage Result
//!
//! What the stager did and what the operator still has to do.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::ContentHash;

/// Which platform the staged server targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StagedTarget {
    Function,
    CloudRun,
}

/// A file the stager wrote itself, with its content hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub hash: ContentHash,
}

/// Operator-facing follow-up produced by a successful stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployInstructions {
    pub target: StagedTarget,
    /// Static hosting output directory
    pub public_dir: PathBuf,
    /// Server output directory
    pub server_dir: PathBuf,
    /// Node.js major version the server was bundled for
    pub node_version: String,
    /// Commands to run, in order
    pub commands: Vec<String>,
    /// Non-fatal problems the operator should fix
    pub warnings: Vec<String>,
    /// Code to paste into the functions entrypoint, when it is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Files generated by the stager
    pub written: Vec<WrittenFile>,
    /// Files copied by the build tool
    pub copied: Vec<PathBuf>,
}

impl DeployInstructions {
    pub fn new(
        target: StagedTarget,
        public_dir: impl Into<PathBuf>,
        server_dir: impl Into<PathBuf>,
        node_version: impl Into<String>,
    ) -> Self {
        Self {
            target,
            public_dir: public_dir.into(),
            server_dir: server_dir.into(),
            node_version: node_version.into(),
            commands: Vec::new(),
            warnings: Vec::new(),
            snippet: None,
            written: Vec::new(),
            copied: Vec::new(),
        }
    }

    /// True when nothing needs the operator's attention besides running commands
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.snippet.is_none()
    }

    pub fn written_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.written.iter().map(|f| &f.path)
    }
}
