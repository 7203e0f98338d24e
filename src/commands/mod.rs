//! Subcommand runners
//!
//! Each runner layers the options (file, environment, flags), wires the
//! concrete collaborators and renders the outcome as text or NDJSON.

mod adapt;
mod check;

use std::path::{Path, PathBuf};

use firebase_ssr_adapter::config::{load_or_default, AdapterOptions};
use firebase_ssr_adapter::error::AdapterResult;
use firebase_ssr_adapter::presentation::json::{emit_event, WarningEvent};
use firebase_ssr_adapter::presentation::output::render_warnings;
use firebase_ssr_adapter::presentation::ResolveArgs;

pub use adapt::{cmd_adapt, AdaptOverrides};
pub use check::cmd_check;

/// Absolute project root, so every derived path is absolute too.
fn project_root(dir: &Path) -> AdapterResult<PathBuf> {
    Ok(std::path::absolute(dir)?)
}

/// Options file + environment, then the resolve flags on top.
fn load_options(
    project_root: &Path,
    resolve: &ResolveArgs,
    json: bool,
) -> AdapterResult<AdapterOptions> {
    let (options, warnings) = load_or_default(project_root)?;

    if json {
        for warning in &warnings {
            emit_event(&WarningEvent::new(warning))?;
        }
    } else if !warnings.is_empty() {
        eprint!("{}", render_warnings(&warnings));
    }

    Ok(resolve.apply(options))
}
