//! `adapt` - resolve the hosting config and stage the deployable layout

use std::path::PathBuf;

use firebase_ssr_adapter::application::{DeployStager, StageOptions};
use firebase_ssr_adapter::config::AdapterOptions;
use firebase_ssr_adapter::domain::services::ConfigResolver;
use firebase_ssr_adapter::error::AdapterResult;
use firebase_ssr_adapter::infrastructure::{EsbuildBundler, KitLayout, KitOutputBuilder, LocalFs};
use firebase_ssr_adapter::presentation::json::{emit_event, PlanEvent, StagedEvent, StartEvent};
use firebase_ssr_adapter::presentation::output::render_instructions;
use firebase_ssr_adapter::presentation::ResolveArgs;

/// `adapt`-only flags
#[derive(Debug, Clone, Default)]
pub struct AdaptOverrides {
    pub build_dir: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub cloud_run_build_dir: Option<PathBuf>,
    pub bundler: Option<String>,
}

impl AdaptOverrides {
    fn apply(&self, mut options: AdapterOptions) -> AdapterOptions {
        if let Some(dir) = &self.build_dir {
            options.output_dir = dir.clone();
        }
        if let Some(dir) = &self.static_dir {
            options.static_dir = dir.clone();
        }
        if let Some(dir) = &self.cloud_run_build_dir {
            options.cloud_run_build_dir = Some(dir.clone());
        }
        if let Some(command) = &self.bundler {
            options.bundler.command = command.clone();
        }
        options
    }
}

pub fn cmd_adapt(
    resolve: &ResolveArgs,
    overrides: &AdaptOverrides,
    json: bool,
    verbose: u8,
) -> AdapterResult<()> {
    let project_root = super::project_root(&resolve.project_root)?;

    if json {
        emit_event(&StartEvent::new("adapt"))?;
    }

    let options = overrides.apply(super::load_options(&project_root, resolve, json)?);
    let plan = ConfigResolver::new(LocalFs::new()).resolve(&options.resolve_options(&project_root))?;

    if json {
        emit_event(&PlanEvent::new(&plan))?;
    }

    let layout = KitLayout::new(
        project_root.join(&options.output_dir),
        project_root.join(&options.static_dir),
    );
    let stager = DeployStager::new(
        KitOutputBuilder::new(layout),
        EsbuildBundler::from_options(&options.bundler),
        LocalFs::new(),
    );
    let stage_options = StageOptions::new(&project_root)
        .with_cloud_run_build_dir(options.cloud_run_build_dir.clone())
        .with_source_rewrite_match(options.source_rewrite_match.clone())
        .with_bundler_platform(options.bundler.platform.clone());

    let instructions = stager.stage(&plan, &stage_options)?;

    if json {
        emit_event(&StagedEvent::new(&instructions))?;
    } else {
        print!("{}", render_instructions(&instructions, verbose));
    }
    Ok(())
}
