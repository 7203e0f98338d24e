//! CLI Argument Parsing
//!
//! Global flags (`--json`, `--verbose`) are inherited by every subcommand.
//! Flags layer on top of the options file and environment overrides.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::AdapterOptions;

/// Stage SSR builds for Firebase Hosting rewrites
#[derive(Parser, Debug)]
#[command(name = "firebase-ssr-adapter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the hosting config and stage the deployable layout
    Adapt {
        #[command(flatten)]
        resolve: ResolveArgs,

        /// Framework build output directory
        #[arg(long, value_name = "DIR")]
        build_dir: Option<PathBuf>,

        /// Project static assets directory
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,

        /// Cloud Run staging directory (default: .<serviceId>)
        #[arg(long, value_name = "DIR")]
        cloud_run_build_dir: Option<PathBuf>,

        /// Bundler executable
        #[arg(long, value_name = "COMMAND")]
        bundler: Option<String>,
    },

    /// Resolve the hosting config and print the deployment plan
    Check {
        #[command(flatten)]
        resolve: ResolveArgs,
    },
}

/// Flags shared by every command that resolves the hosting config
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Project root
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub project_root: PathBuf,

    /// Hosting configuration file, relative to the project root
    #[arg(long, value_name = "FILE")]
    pub firebase_json: Option<PathBuf>,

    /// Hosting `target` or `site` to deploy
    #[arg(long, visible_alias = "hosting-site")]
    pub target: Option<String>,

    /// Rewrite `source` routed to the server
    #[arg(long, value_name = "GLOB")]
    pub source_rewrite_match: Option<String>,
}

impl ResolveArgs {
    /// Layer the flags over already-loaded options.
    pub fn apply(&self, mut options: AdapterOptions) -> AdapterOptions {
        if let Some(path) = &self.firebase_json {
            options.firebase_json = path.clone();
        }
        if let Some(target) = &self.target {
            options.target = Some(target.clone());
        }
        if let Some(source) = &self.source_rewrite_match {
            options.source_rewrite_match = source.clone();
        }
        options
    }
}
