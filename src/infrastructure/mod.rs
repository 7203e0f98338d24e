//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `builder/` - Framework build output on disk
//! - `bundler/` - External bundler process

pub mod builder;
pub mod bundler;
pub mod fs;

// Re-export for convenience
pub use builder::{KitLayout, KitOutputBuilder};
pub use bundler::EsbuildBundler;
pub use fs::LocalFs;
