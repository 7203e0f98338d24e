//! Output Rendering
//!
//! Text views for plans, staging results and option warnings. Each view
//! returns a `String`; callers decide where it goes.

use std::fmt::Write as _;

use crate::application::{DeployInstructions, StagedTarget};
use crate::domain::entities::{DeployTarget, DeploymentPlan};
use crate::domain::value_objects::ConfigWarning;

const CHECK: &str = "✓";
const WARN: &str = "⚠";
const CROSS: &str = "✗";
const WRITE: &str = "→";

/// Render a resolved plan.
pub fn render_plan(plan: &DeploymentPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Deployment plan", CHECK);
    let _ = writeln!(out);
    if let Some(site) = &plan.hosting_site {
        let _ = writeln!(out, "  Site:    {}", site);
    }
    match &plan.target {
        DeployTarget::Function(target) => {
            let _ = writeln!(out, "  Target:  Cloud Function \"{}\"", target.name);
            let _ = writeln!(out, "  Source:  {}", target.source_path.display());
            if let Some(runtime) = &target.runtime {
                let _ = writeln!(out, "  Runtime: {}", runtime);
            }
        }
        DeployTarget::CloudRun(target) => {
            let _ = writeln!(
                out,
                "  Target:  Cloud Run service \"{}\" ({})",
                target.service_id, target.region
            );
        }
    }
    let _ = writeln!(out, "  Public:  {}", plan.public_dir.display());
    out
}

/// Render what staging produced and the commands still to run.
pub fn render_instructions(instructions: &DeployInstructions, verbose: u8) -> String {
    let mut out = String::new();
    let what = match instructions.target {
        StagedTarget::Function => "Cloud Function",
        StagedTarget::CloudRun => "Cloud Run service",
    };
    let _ = writeln!(out, "{} Staged {}", CHECK, what);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Public:  {}", instructions.public_dir.display());
    let _ = writeln!(out, "  Server:  {}", instructions.server_dir.display());
    let _ = writeln!(out, "  Node.js: {}", instructions.node_version);

    if !instructions.written.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Written ({}):", instructions.written.len());
        for file in &instructions.written {
            if verbose > 0 {
                let _ = writeln!(out, "    {} {}  {}", WRITE, file.path.display(), file.hash);
            } else {
                let _ = writeln!(out, "    {} {}", WRITE, file.path.display());
            }
        }
    }
    if !instructions.copied.is_empty() {
        let _ = writeln!(out, "  Copied:  {} files", instructions.copied.len());
    }

    if !instructions.warnings.is_empty() {
        let _ = writeln!(out);
        for warning in &instructions.warnings {
            let _ = writeln!(out, "  {} {}", WARN, warning);
        }
    }
    if let Some(snippet) = &instructions.snippet {
        let _ = writeln!(out);
        for line in snippet.lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }

    if !instructions.commands.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Next:");
        for command in &instructions.commands {
            let _ = writeln!(out, "    $ {}", command);
        }
    }
    out
}

/// Render options-file warnings with their "did you mean" hints.
pub fn render_warnings(warnings: &[ConfigWarning]) -> String {
    let mut out = String::new();
    for warning in warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        let _ = write!(out, "{} {}: unknown key '{}'", WARN, location, warning.key);
        if let Some(suggestion) = &warning.suggestion {
            let _ = write!(out, " (did you mean '{}'?)", suggestion);
        }
        let _ = writeln!(out);
    }
    out
}

/// Render a failure line, tagged with its code when it has one.
pub fn render_error(code: Option<&str>, message: &str) -> String {
    match code {
        Some(code) => format!("{} [{}] {}", CROSS, code, message),
        None => format!("{} {}", CROSS, message),
    }
}
