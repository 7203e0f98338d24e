//! Domain Entities
//!
//! - `HostingConfigDocument` - the parsed `firebase.json`
//! - `DeploymentPlan` - the resolved deploy target and paths

mod deployment_plan;
mod hosting;

pub use deployment_plan::{
    CloudRunTarget, DeployTarget, DeploymentPlan, FunctionTarget, SUPPORTED_REGION,
};
pub use hosting::{
    CloudRunSelector, FunctionsConfig, HostingConfigDocument, HostingSiteEntry, RewriteKind,
    RewriteRule,
};
