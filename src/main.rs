//! firebase-ssr-adapter CLI
//!
//! Usage: firebase-ssr-adapter [--json] [-v...] <COMMAND>
//!
//! Commands:
//!   adapt   Resolve firebase.json and stage the deployable layout
//!   check   Resolve firebase.json and print the deployment plan

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use firebase_ssr_adapter::error::AdapterError;
use firebase_ssr_adapter::presentation::json::{emit_event, ErrorEvent};
use firebase_ssr_adapter::presentation::output::render_error;
use firebase_ssr_adapter::presentation::{Cli, Commands};

/// Filter directive override, e.g. `FIREBASE_ADAPTER_LOG=debug`
const LOG_ENV: &str = "FIREBASE_ADAPTER_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command, cli.json, cli.verbose) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, json: bool, verbose: u8) -> Result<()> {
    match command {
        Commands::Adapt {
            resolve,
            build_dir,
            static_dir,
            cloud_run_build_dir,
            bundler,
        } => {
            let overrides = commands::AdaptOverrides {
                build_dir,
                static_dir,
                cloud_run_build_dir,
                bundler,
            };
            commands::cmd_adapt(&resolve, &overrides, json, verbose)?;
        }
        Commands::Check { resolve } => commands::cmd_check(&resolve, json)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn report(err: &anyhow::Error, json: bool) {
    let code = err.downcast_ref::<AdapterError>().and_then(AdapterError::code);
    let message = format!("{:#}", err);

    if json {
        if emit_event(&ErrorEvent::new(code, message.as_str())).is_ok() {
            return;
        }
    }
    eprintln!("{}", render_error(code, &message));
}
