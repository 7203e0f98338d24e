//! Bundler Implementations

mod esbuild;

pub use esbuild::EsbuildBundler;
