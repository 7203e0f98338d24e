//! firebase-ssr-adapter - deploy server-side rendered builds to Firebase Hosting
//!
//! Reads a project's `firebase.json`, picks the hosting entry and the rewrite
//! that routes to the server, and stages the build for either a Cloud
//! Function or a Cloud Run service.
//!
//! ## Layers
//!
//! - `domain` - hosting config model, validation rules, the resolver, ports
//! - `application` - the staging use case
//! - `infrastructure` - local disk, framework build output, bundler process
//! - `request` - request-time header and URL translation
//! - `presentation` - CLI definition and output views

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod request;

pub use application::{DeployInstructions, DeployStager, StageOptions};
pub use config::AdapterOptions;
pub use domain::entities::{DeployTarget, DeploymentPlan};
pub use domain::services::{ConfigResolver, ResolveOptions};
pub use error::{AdapterError, AdapterResult, ConfigError, StageError};
