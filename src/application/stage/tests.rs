//! Tests for the stage use case

use super::*;
use crate::domain::entities::{
    CloudRunTarget, DeployTarget, DeploymentPlan, FunctionTarget, SUPPORTED_REGION,
};
use crate::domain::ports::{
    BundleError, BundleOptions, Builder, BuilderResult, Bundler, LogLevel, MockFileSystem,
};
use crate::domain::value_objects::{CloudRunServiceId, FunctionName};
use crate::error::{ConfigError, StageError};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// === Mocks ===

#[derive(Clone)]
struct MockBuilder {
    static_dir: PathBuf,
    output_dir: PathBuf,
    calls: Arc<Mutex<Vec<String>>>,
    logs: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl MockBuilder {
    fn new() -> Self {
        Self {
            static_dir: PathBuf::from("/p/static"),
            output_dir: PathBuf::from("/p/.svelte-kit/output"),
            calls: Arc::default(),
            logs: Arc::default(),
        }
    }

    fn with_static_dir(mut self, dir: &str) -> Self {
        self.static_dir = PathBuf::from(dir);
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn warnings(&self) -> Vec<String> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == LogLevel::Warn)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl Builder for MockBuilder {
    fn copy_static_files(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>> {
        self.record(format!("copy_static {}", dest.display()));
        Ok(vec![dest.join("favicon.png")])
    }

    fn copy_client_files(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>> {
        self.record(format!("copy_client {}", dest.display()));
        Ok(vec![dest.join("_app/start.js")])
    }

    fn copy_server_files(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>> {
        self.record(format!("copy_server {}", dest.display()));
        Ok(vec![dest.join("index.js")])
    }

    fn erase_directory(&self, dir: &Path) -> BuilderResult<()> {
        self.record(format!("erase {}", dir.display()));
        Ok(())
    }

    fn prerender(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>> {
        self.record(format!("prerender {}", dest.display()));
        Ok(vec![dest.join("about/index.html")])
    }

    fn generate_manifest(&self, relative_path: &str) -> BuilderResult<String> {
        self.record(format!("manifest {}", relative_path));
        Ok(format!("export const manifest = {{ base: '{}' }};\n", relative_path))
    }

    fn static_assets_dir(&self) -> &Path {
        &self.static_dir
    }

    fn build_output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.logs.lock().unwrap().push((level, message.to_string()));
    }
}

#[derive(Clone)]
struct MockBundler {
    fs: MockFileSystem,
    fail: bool,
    runs: Arc<Mutex<Vec<BundleOptions>>>,
}

impl MockBundler {
    fn new(fs: &MockFileSystem) -> Self {
        Self {
            fs: fs.clone(),
            fail: false,
            runs: Arc::default(),
        }
    }

    fn failing(fs: &MockFileSystem) -> Self {
        Self {
            fail: true,
            ..Self::new(fs)
        }
    }

    fn runs(&self) -> Vec<BundleOptions> {
        self.runs.lock().unwrap().clone()
    }
}

impl Bundler for MockBundler {
    fn name(&self) -> &str {
        "mock"
    }

    fn bundle(&self, options: &BundleOptions) -> Result<(), BundleError> {
        self.runs.lock().unwrap().push(options.clone());
        if self.fail {
            return Err(BundleError::Failed {
                command: "mock".to_string(),
                code: Some(1),
                stderr: "Could not resolve './server/index.js'".to_string(),
            });
        }
        use crate::domain::ports::FileSystem;
        self.fs
            .write(&options.outfile, "module.exports = {};")
            .map_err(|e| BundleError::Spawn {
                command: "mock".to_string(),
                message: e.to_string(),
            })
    }
}

// === Fixtures ===

fn function_plan(runtime: Option<&str>) -> DeploymentPlan {
    DeploymentPlan {
        target: DeployTarget::Function(FunctionTarget {
            name: FunctionName::parse("ssr").unwrap(),
            source_path: PathBuf::from("/p/functions"),
            runtime: runtime.map(str::to_string),
        }),
        public_dir: PathBuf::from("/p/public"),
        config_dir: PathBuf::from("/p"),
        hosting_site: None,
    }
}

fn cloud_run_plan() -> DeploymentPlan {
    DeploymentPlan {
        target: DeployTarget::CloudRun(CloudRunTarget {
            service_id: CloudRunServiceId::parse("svc").unwrap(),
            region: SUPPORTED_REGION.to_string(),
        }),
        public_dir: PathBuf::from("/p/public"),
        config_dir: PathBuf::from("/p"),
        hosting_site: Some("app".to_string()),
    }
}

fn functions_fs(package: Value) -> MockFileSystem {
    MockFileSystem::new().with_file("/p/functions/package.json", &package.to_string())
}

fn options() -> StageOptions {
    StageOptions::new("/p")
}

struct Harness {
    builder: MockBuilder,
    bundler: MockBundler,
    fs: MockFileSystem,
}

impl Harness {
    fn new(fs: MockFileSystem) -> Self {
        Self {
            builder: MockBuilder::new(),
            bundler: MockBundler::new(&fs),
            fs,
        }
    }

    fn stage(&self, plan: &DeploymentPlan) -> Result<DeployInstructions, StageError> {
        self.stage_with(plan, &options())
    }

    fn stage_with(
        &self,
        plan: &DeploymentPlan,
        options: &StageOptions,
    ) -> Result<DeployInstructions, StageError> {
        DeployStager::new(self.builder.clone(), self.bundler.clone(), self.fs.clone())
            .stage(plan, options)
    }
}

// === Function target ===

#[test]
fn function_target_stages_server_next_to_functions_main() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "20"}}))
        .with_file("/p/functions/index.js", "const functions = require('firebase-functions');\n");
    let harness = Harness::new(fs);

    let instructions = harness.stage(&function_plan(None)).unwrap();

    assert_eq!(instructions.target, StagedTarget::Function);
    assert_eq!(instructions.server_dir, PathBuf::from("/p/functions/ssr"));
    assert_eq!(instructions.node_version, "20");
    assert_eq!(
        instructions.commands,
        vec!["firebase deploy --only functions:ssr,hosting".to_string()]
    );

    let written: Vec<&PathBuf> = instructions.written_paths().collect();
    assert!(written.contains(&&PathBuf::from("/p/functions/ssr/manifest.js")));
    assert!(written.contains(&&PathBuf::from("/p/functions/ssr/handler.js")));
    assert!(written.contains(&&PathBuf::from("/p/functions/ssr/routes.json")));
    assert!(written.contains(&&PathBuf::from("/p/functions/ssr/index.js")));
    assert!(instructions
        .written
        .iter()
        .all(|f| f.hash.as_str().starts_with("sha256:")));
}

#[test]
fn function_target_nested_main_dir() {
    let fs = functions_fs(json!({"main": "lib/index.js", "engines": {"node": "18"}}));
    let harness = Harness::new(fs);

    let instructions = harness.stage(&function_plan(None)).unwrap();

    assert_eq!(instructions.server_dir, PathBuf::from("/p/functions/lib/ssr"));
}

#[test]
fn function_target_bundles_for_declared_runtime() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "18"}}));
    let harness = Harness::new(fs);

    harness.stage(&function_plan(Some("nodejs22"))).unwrap();

    let runs = harness.bundler.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].target, "node22");
    assert_eq!(runs[0].platform, "node");
    assert_eq!(
        runs[0].entry_points,
        vec![PathBuf::from("/p/functions/ssr/handler.js")]
    );
    assert_eq!(runs[0].outfile, PathBuf::from("/p/functions/ssr/index.js"));
}

#[test]
fn function_target_writes_routes() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "20"}}));
    let harness = Harness::new(fs);

    harness.stage(&function_plan(None)).unwrap();

    let routes: Value = serde_json::from_str(
        &harness
            .fs
            .get(Path::new("/p/functions/ssr/routes.json"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(routes["rewrite"], json!({"source": "**", "function": "ssr"}));
    assert_eq!(routes["prerendered"], json!(["/about/index.html"]));
}

#[test]
fn missing_export_emits_snippet_warning() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "20"}}))
        .with_file("/p/functions/index.js", "exports.other = 1;\n");
    let harness = Harness::new(fs);

    let instructions = harness.stage(&function_plan(None)).unwrap();

    assert!(!instructions.is_clean());
    assert_eq!(instructions.warnings.len(), 1);
    assert!(instructions.warnings[0].contains("/p/functions/index.js"));
    let snippet = instructions.snippet.unwrap();
    assert!(snippet.contains("exports.ssr = functions.https.onRequest"));
    assert_eq!(harness.builder.warnings().len(), 1);
}

#[test]
fn existing_export_needs_no_snippet() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "20"}}))
        .with_file("/p/functions/index.js", "exports.ssr = functions.https.onRequest(h);\n");
    let harness = Harness::new(fs);

    let instructions = harness.stage(&function_plan(None)).unwrap();

    assert!(instructions.is_clean());
    assert!(harness.builder.warnings().is_empty());
}

#[test]
fn unreadable_entrypoint_is_only_a_warning() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "20"}}));
    let harness = Harness::new(fs);

    let instructions = harness.stage(&function_plan(None)).unwrap();

    assert!(instructions.snippet.is_some());
}

#[test]
fn missing_functions_package_fails_before_erasing() {
    let harness = Harness::new(MockFileSystem::new());

    let err = harness.stage(&function_plan(None)).unwrap_err();

    assert!(matches!(err, StageError::FunctionsPackage { ref path, .. } if path == Path::new("/p/functions/package.json")));
    assert!(harness.builder.calls().is_empty());
}

#[test]
fn missing_main_fails() {
    let harness = Harness::new(functions_fs(json!({"engines": {"node": "20"}})));

    let err = harness.stage(&function_plan(None)).unwrap_err();

    assert_eq!(err.code(), "MissingFunctionsMain");
    assert!(harness.builder.calls().is_empty());
}

#[test]
fn unsupported_runtime_fails() {
    let harness = Harness::new(functions_fs(json!({"main": "index.js", "engines": {"node": "10"}})));

    let err = harness.stage(&function_plan(None)).unwrap_err();

    assert!(matches!(
        err,
        StageError::Config(ConfigError::UnsupportedRuntime { .. })
    ));
    assert!(harness.bundler.runs().is_empty());
}

#[test]
fn identical_asset_dirs_fail_before_erasing() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "20"}}));
    let mut harness = Harness::new(fs);
    harness.builder = MockBuilder::new().with_static_dir("/p/public");

    let err = harness.stage(&function_plan(None)).unwrap_err();

    assert_eq!(err.code(), "IdenticalAssetDirs");
    assert!(harness.builder.calls().is_empty());
}

#[test]
fn public_dir_over_functions_source_fails_before_erasing() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "20"}}));
    let harness = Harness::new(fs);
    let mut plan = function_plan(None);
    plan.public_dir = PathBuf::from("/p/functions");

    let err = harness.stage(&plan).unwrap_err();

    assert!(matches!(
        err,
        StageError::Config(ConfigError::OverlappingOutputDir { ref input, .. })
            if input == Path::new("/p/functions")
    ));
    assert!(harness.builder.calls().is_empty());
}

#[test]
fn bundler_failure_propagates_unchanged() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "20"}}));
    let mut harness = Harness::new(fs.clone());
    harness.bundler = MockBundler::failing(&fs);

    let err = harness.stage(&function_plan(None)).unwrap_err();

    match err {
        StageError::Bundler(BundleError::Failed { code, stderr, .. }) => {
            assert_eq!(code, Some(1));
            assert!(stderr.contains("Could not resolve"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn steps_run_in_order() {
    let fs = functions_fs(json!({"main": "index.js", "engines": {"node": "20"}}));
    let harness = Harness::new(fs);

    harness.stage(&function_plan(None)).unwrap();

    assert_eq!(
        harness.builder.calls(),
        vec![
            "erase /p/public",
            "erase /p/functions/ssr",
            "copy_static /p/public",
            "copy_client /p/public",
            "prerender /p/public",
            "copy_server /p/functions/ssr/server",
            "manifest ./server",
        ]
    );
}

// === Cloud Run target ===

fn project_fs() -> MockFileSystem {
    let package = json!({
        "name": "app",
        "type": "module",
        "scripts": {"build": "vite build"},
        "dependencies": {"cookie": "^0.5.0"},
        "engines": {"node": "18"}
    });
    MockFileSystem::new()
        .with_file("/p/package.json", &package.to_string())
        .with_file("/p/yarn.lock", "# yarn lockfile v1\n")
}

#[test]
fn cloud_run_stages_into_service_dir() {
    let harness = Harness::new(project_fs());

    let instructions = harness.stage(&cloud_run_plan()).unwrap();

    assert_eq!(instructions.target, StagedTarget::CloudRun);
    assert_eq!(instructions.server_dir, PathBuf::from("/p/.svc"));
    assert_eq!(instructions.node_version, "18");
    assert!(instructions.is_clean());
    assert_eq!(
        instructions.commands,
        vec![
            "gcloud beta run deploy svc --platform managed --region us-central1 --source /p/.svc --allow-unauthenticated".to_string(),
            "firebase deploy --only hosting".to_string(),
        ]
    );
}

#[test]
fn cloud_run_rewrites_package_manifest() {
    let harness = Harness::new(project_fs());

    harness.stage(&cloud_run_plan()).unwrap();

    let package: Value =
        serde_json::from_str(&harness.fs.get(Path::new("/p/.svc/package.json")).unwrap()).unwrap();
    assert_eq!(
        package["scripts"]["start"],
        "functions-framework --target=default"
    );
    assert_eq!(package["scripts"]["build"], "vite build");
    assert!(package["dependencies"][FUNCTIONS_FRAMEWORK].is_string());
    assert_eq!(package["dependencies"]["cookie"], "^0.5.0");
    assert_eq!(package["engines"], json!({"node": "18"}));
    assert!(package.get("type").is_none());
}

#[test]
fn cloud_run_copies_present_lockfiles_only() {
    let harness = Harness::new(project_fs());

    let instructions = harness.stage(&cloud_run_plan()).unwrap();

    assert!(harness.fs.get(Path::new("/p/.svc/yarn.lock")).is_some());
    assert!(harness.fs.get(Path::new("/p/.svc/package-lock.json")).is_none());
    assert!(instructions
        .written_paths()
        .any(|p| p == Path::new("/p/.svc/yarn.lock")));
}

#[test]
fn cloud_run_build_dir_override() {
    let harness = Harness::new(project_fs());
    let options = options().with_cloud_run_build_dir(Some(PathBuf::from("build/run")));

    let instructions = harness.stage_with(&cloud_run_plan(), &options).unwrap();

    assert_eq!(instructions.server_dir, PathBuf::from("/p/build/run"));
    assert!(instructions.commands[0].contains("--source /p/build/run"));
}

#[test]
fn cloud_run_without_engine_uses_newest_supported() {
    let fs = MockFileSystem::new().with_file("/p/package.json", r#"{"name": "app"}"#);
    let harness = Harness::new(fs);

    let instructions = harness.stage(&cloud_run_plan()).unwrap();

    assert_eq!(instructions.node_version, "22");
}

#[test]
fn cloud_run_requires_project_package() {
    let harness = Harness::new(MockFileSystem::new());

    let err = harness.stage(&cloud_run_plan()).unwrap_err();

    assert_eq!(err.code(), "ProjectPackage");
    assert!(harness.builder.calls().is_empty());
}

#[test]
fn cloud_run_package_replaces_non_object_scripts() {
    let package = cloud_run_package(json!({"scripts": "nope", "type": "module"}), "20");

    assert_eq!(
        package["scripts"],
        json!({"start": "functions-framework --target=default"})
    );
    assert_eq!(package["main"], "index.js");
    assert!(package.get("type").is_none());
}

// === Output directory safety ===

fn assert_refused_before_erasing(harness: &Harness, result: Result<DeployInstructions, StageError>) {
    let err = result.unwrap_err();
    assert_eq!(err.code(), "OverlappingOutputDir");
    assert!(harness.builder.calls().is_empty(), "{:?}", harness.builder.calls());
    assert!(harness.bundler.runs().is_empty());
}

#[test]
fn public_dir_at_project_root_is_refused() {
    let harness = Harness::new(project_fs());
    let mut plan = cloud_run_plan();
    plan.public_dir = PathBuf::from("/p/.");

    let result = harness.stage(&plan);

    assert_refused_before_erasing(&harness, result);
}

#[test]
fn public_dir_above_project_root_is_refused() {
    let harness = Harness::new(project_fs());
    let mut plan = cloud_run_plan();
    plan.public_dir = PathBuf::from("/p/../");

    let result = harness.stage(&plan);

    assert_refused_before_erasing(&harness, result);
}

#[test]
fn public_dir_containing_static_dir_is_refused() {
    let mut harness = Harness::new(project_fs());
    let mut plan = cloud_run_plan();
    plan.public_dir = PathBuf::from("/p/assets");
    harness.builder = MockBuilder::new().with_static_dir("/p/assets/static");

    let result = harness.stage(&plan);

    assert_refused_before_erasing(&harness, result);
}

#[test]
fn public_dir_inside_build_output_is_refused() {
    let harness = Harness::new(project_fs());
    let mut plan = cloud_run_plan();
    plan.public_dir = PathBuf::from("/p/.svelte-kit/output/client");

    let result = harness.stage(&plan);

    assert_refused_before_erasing(&harness, result);
}

#[test]
fn cloud_run_build_dir_at_project_root_is_refused() {
    let harness = Harness::new(project_fs());
    let options = options().with_cloud_run_build_dir(Some(PathBuf::from(".")));

    let result = harness.stage_with(&cloud_run_plan(), &options);

    assert_refused_before_erasing(&harness, result);
    assert!(harness.fs.get(Path::new("/p/package.json")).is_some());
}

#[test]
fn cloud_run_build_dir_over_static_dir_is_refused() {
    let harness = Harness::new(project_fs());
    let options = options().with_cloud_run_build_dir(Some(PathBuf::from("static")));

    let result = harness.stage_with(&cloud_run_plan(), &options);

    assert_refused_before_erasing(&harness, result);
}
