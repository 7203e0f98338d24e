//! Domain Layer
//!
//! The adapter's core: the hosting configuration model and the rules that turn
//! it into a deployment plan.
//!
//! ## Structure
//!
//! - `entities/` - Hosting document, site entries, rewrites, DeploymentPlan
//! - `value_objects/` - Validated identifiers (service id, function name, runtime)
//! - `policies/` - Declarative field-rule tables
//! - `services/` - ConfigResolver and cross-field checks
//! - `ports/` - Interface definitions for the build tool, bundler and file system
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
