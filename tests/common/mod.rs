//! Common test utilities for CLI integration tests.
//!
//! - `TestEnv`: isolated project directory plus CLI runner
//! - Fixtures: reusable `firebase.json` and build output content

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
