//! `check` - resolve the hosting config and print the plan

use firebase_ssr_adapter::domain::services::ConfigResolver;
use firebase_ssr_adapter::error::AdapterResult;
use firebase_ssr_adapter::infrastructure::LocalFs;
use firebase_ssr_adapter::presentation::json::{emit_event, PlanEvent, StartEvent};
use firebase_ssr_adapter::presentation::output::render_plan;
use firebase_ssr_adapter::presentation::ResolveArgs;

pub fn cmd_check(resolve: &ResolveArgs, json: bool) -> AdapterResult<()> {
    let project_root = super::project_root(&resolve.project_root)?;

    if json {
        emit_event(&StartEvent::new("check"))?;
    }

    let options = super::load_options(&project_root, resolve, json)?;
    let plan = ConfigResolver::new(LocalFs::new()).resolve(&options.resolve_options(&project_root))?;

    if json {
        emit_event(&PlanEvent::new(&plan))?;
    } else {
        print!("{}", render_plan(&plan));
    }
    Ok(())
}
