//! esbuild invoked as an external process

use std::process::{Command, Stdio};

use crate::config::BundlerOptions;
use crate::domain::ports::{BundleError, BundleOptions, Bundler};

/// Runs an esbuild-compatible command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsbuildBundler {
    command: String,
    extra_args: Vec<String>,
}

impl EsbuildBundler {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn from_options(options: &BundlerOptions) -> Self {
        Self {
            command: options.command.clone(),
            extra_args: options.extra_args.clone(),
        }
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Command-line arguments for one bundle run
    pub fn args(&self, options: &BundleOptions) -> Vec<String> {
        let mut args: Vec<String> = options
            .entry_points
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        if options.bundle {
            args.push("--bundle".to_string());
        }
        args.push(format!("--outfile={}", options.outfile.display()));
        args.push(format!("--platform={}", options.platform));
        args.push(format!("--target={}", options.target));
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

impl Default for EsbuildBundler {
    fn default() -> Self {
        Self::new("esbuild")
    }
}

impl Bundler for EsbuildBundler {
    fn name(&self) -> &str {
        &self.command
    }

    fn bundle(&self, options: &BundleOptions) -> Result<(), BundleError> {
        let args = self.args(options);
        tracing::debug!(command = %self.command, ?args, "running bundler");

        let output = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| BundleError::Spawn {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(BundleError::Failed {
                command: self.command.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
