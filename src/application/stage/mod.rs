//! Stage Module
//!
//! Writes the deployable layout for a resolved plan.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`StageOptions`)
//! - `result` - Result types (`DeployInstructions`)
//! - `templates` - Generated JavaScript sources
//! - `use_case` - Core use case logic (`DeployStager`)
//!
//! ## Usage
//!
//! ```ignore
//! use firebase_ssr_adapter::application::stage::{DeployStager, StageOptions};
//!
//! let stager = DeployStager::new(builder, bundler, fs);
//! let instructions = stager.stage(&plan, &StageOptions::new(project_root))?;
//! ```

mod options;
mod result;
mod templates;
mod use_case;

pub use options::StageOptions;
pub use result::{DeployInstructions, StagedTarget, WrittenFile};
pub use templates::{declares_export, function_snippet, HANDLER_ENTRY};
pub use use_case::{cloud_run_package, DeployStager, FUNCTIONS_FRAMEWORK, LOCKFILES};

#[cfg(test)]
mod tests;
