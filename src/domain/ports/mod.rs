//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure provides the concrete implementations; the surrounding
//! build tool supplies the rest.

pub mod builder;
pub mod bundler;
pub mod file_system;

pub use builder::{Builder, BuilderError, BuilderResult, LogLevel};
pub use bundler::{BundleError, BundleOptions, Bundler};
pub use file_system::{FileSystem, FsError, FsResult};

#[cfg(test)]
pub use file_system::MockFileSystem;
