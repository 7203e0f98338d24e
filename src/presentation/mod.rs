//! Presentation Layer
//!
//! - `cli` - argument parsing (clap)
//! - `output` - text views
//! - `json` - NDJSON events for `--json`

pub mod cli;
pub mod json;
pub mod output;

pub use cli::{Cli, Commands, ResolveArgs};
