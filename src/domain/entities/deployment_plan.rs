//! Deployment plan entity
//!
//! The resolver's output: one validated deploy target plus resolved paths.
//! Built fresh per run and handed straight to the stager.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::value_objects::{CloudRunServiceId, FunctionName};

/// The only region Hosting rewrites can route to
pub const SUPPORTED_REGION: &str = "us-central1";

/// Function deployment target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionTarget {
    pub name: FunctionName,
    /// `functions.source`, joined onto the config directory
    pub source_path: PathBuf,
    /// `functions.runtime` as declared, e.g. `nodejs20`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

/// Container deployment target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudRunTarget {
    pub service_id: CloudRunServiceId,
    pub region: String,
}

/// Exactly one deploy target per plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployTarget {
    Function(FunctionTarget),
    CloudRun(CloudRunTarget),
}

/// Normalized, validated result of configuration resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentPlan {
    pub target: DeployTarget,
    /// `hosting.public`, joined onto the config directory
    pub public_dir: PathBuf,
    /// Directory containing the configuration document
    pub config_dir: PathBuf,
    /// Identifier of the selected hosting entry, if it had one
    pub hosting_site: Option<String>,
}

impl DeploymentPlan {
    pub fn functions_target(&self) -> Option<&FunctionTarget> {
        match &self.target {
            DeployTarget::Function(target) => Some(target),
            DeployTarget::CloudRun(_) => None,
        }
    }

    pub fn cloud_run_target(&self) -> Option<&CloudRunTarget> {
        match &self.target {
            DeployTarget::CloudRun(target) => Some(target),
            DeployTarget::Function(_) => None,
        }
    }

    /// JSON view with `functionsTarget` / `cloudRunTarget`, the unused one `false`.
    pub fn to_json(&self) -> Value {
        let functions = self
            .functions_target()
            .map(|t| json!(t))
            .unwrap_or(Value::Bool(false));
        let cloud_run = self
            .cloud_run_target()
            .map(|t| json!(t))
            .unwrap_or(Value::Bool(false));

        json!({
            "functionsTarget": functions,
            "cloudRunTarget": cloud_run,
            "publicDir": self.public_dir,
            "configDir": self.config_dir,
            "hostingSite": self.hosting_site,
        })
    }
}
