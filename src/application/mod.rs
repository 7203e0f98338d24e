//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployStager` - Stages a resolved plan into the platform's layout

pub mod stage;

pub use stage::{DeployInstructions, DeployStager, StageOptions, StagedTarget, WrittenFile};
