//! Stage Use Case
//!
//! Stages a resolved deployment plan:
//! 1. Validate (asset dirs, package manifests, runtime)
//! 2. Erase stale output, refusing dirs that overlap project inputs
//! 3. Copy static/client assets and prerender
//! 4. Copy server files and write the generated entry
//! 5. Invoke the bundler
//! 6. Inspect the functions entrypoint (function target only)
//! 7. Emit deploy commands
//!
//! Only steps before the bundler can fail. Bundler errors pass through as-is.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::domain::entities::{CloudRunTarget, DeployTarget, DeploymentPlan, FunctionTarget};
use crate::domain::ports::{BundleOptions, Builder, Bundler, FileSystem, LogLevel};
use crate::domain::services::{
    ensure_compatible_runtime, ensure_erase_spares_inputs, ensure_static_resource_dirs_differ,
};
use crate::domain::value_objects::{ContentHash, SUPPORTED_NODE_VERSIONS};
use crate::error::StageError;

use super::options::StageOptions;
use super::result::{DeployInstructions, StagedTarget, WrittenFile};
use super::templates::{declares_export, function_snippet, HANDLER_ENTRY};

/// Lockfiles copied next to the Cloud Run package manifest
pub const LOCKFILES: &[&str] = &[
    "package-lock.json",
    "npm-shrinkwrap.json",
    "yarn.lock",
    "pnpm-lock.yaml",
];

/// Package providing the Cloud Run HTTP entry
pub const FUNCTIONS_FRAMEWORK: &str = "@google-cloud/functions-framework";
const FUNCTIONS_FRAMEWORK_VERSION: &str = "^3.4.0";

/// Validated inputs for the function target
struct FunctionPlan {
    server_dir: PathBuf,
    entrypoint: PathBuf,
    node_version: String,
}

/// Validated inputs for the Cloud Run target
struct CloudRunPlan {
    server_dir: PathBuf,
    package: Value,
    node_version: String,
}

/// Stage use case - writes the deployable layout for a plan
///
/// Parameterized by its collaborators so tests can substitute mocks.
pub struct DeployStager<B, BU, FS>
where
    B: Builder,
    BU: Bundler,
    FS: FileSystem,
{
    builder: B,
    bundler: BU,
    file_system: FS,
}

impl<B, BU, FS> DeployStager<B, BU, FS>
where
    B: Builder,
    BU: Bundler,
    FS: FileSystem,
{
    pub fn new(builder: B, bundler: BU, file_system: FS) -> Self {
        Self {
            builder,
            bundler,
            file_system,
        }
    }

    /// Stage `plan` and return the operator's follow-up instructions
    pub fn stage(
        &self,
        plan: &DeploymentPlan,
        options: &StageOptions,
    ) -> Result<DeployInstructions, StageError> {
        let _span = tracing::info_span!("stage", public_dir = %plan.public_dir.display()).entered();

        ensure_static_resource_dirs_differ(self.builder.static_assets_dir(), &plan.public_dir)?;

        match &plan.target {
            DeployTarget::Function(target) => self.stage_function(plan, target, options),
            DeployTarget::CloudRun(target) => self.stage_cloud_run(plan, target, options),
        }
    }

    fn stage_function(
        &self,
        plan: &DeploymentPlan,
        target: &FunctionTarget,
        options: &StageOptions,
    ) -> Result<DeployInstructions, StageError> {
        let prepared = self.prepare_function(target)?;
        let mut instructions = DeployInstructions::new(
            StagedTarget::Function,
            &plan.public_dir,
            &prepared.server_dir,
            &prepared.node_version,
        );

        self.erase_outputs(
            plan,
            options,
            &prepared.server_dir,
            Some(target.source_path.as_path()),
        )?;
        let prerendered = self.copy_assets(&plan.public_dir, &mut instructions)?;

        self.builder.log(
            LogLevel::Minor,
            &format!(
                "Writing Cloud Function server assets to {}",
                prepared.server_dir.display()
            ),
        );
        self.copy_server(&prepared.server_dir, &mut instructions)?;

        let routes = json!({
            "rewrite": {
                "source": options.source_rewrite_match,
                "function": target.name.as_str(),
            },
            "prerendered": prerendered,
        });
        self.write_json(&prepared.server_dir.join("routes.json"), &routes, &mut instructions)?;

        self.bundle(&prepared.server_dir, &prepared.node_version, options, &mut instructions)?;

        self.inspect_entrypoint(target, &prepared.entrypoint, &mut instructions);

        instructions.commands.push(format!(
            "firebase deploy --only functions:{},hosting",
            target.name
        ));
        self.announce_commands(&instructions);
        Ok(instructions)
    }

    fn stage_cloud_run(
        &self,
        plan: &DeploymentPlan,
        target: &CloudRunTarget,
        options: &StageOptions,
    ) -> Result<DeployInstructions, StageError> {
        let prepared = self.prepare_cloud_run(target, options)?;
        let mut instructions = DeployInstructions::new(
            StagedTarget::CloudRun,
            &plan.public_dir,
            &prepared.server_dir,
            &prepared.node_version,
        );

        self.erase_outputs(plan, options, &prepared.server_dir, None)?;
        self.copy_assets(&plan.public_dir, &mut instructions)?;

        self.builder.log(
            LogLevel::Minor,
            &format!("Writing Cloud Run service to {}", prepared.server_dir.display()),
        );
        self.copy_server(&prepared.server_dir, &mut instructions)?;

        let package = cloud_run_package(prepared.package, &prepared.node_version);
        self.write_json(&prepared.server_dir.join("package.json"), &package, &mut instructions)?;
        self.copy_lockfiles(&options.project_root, &prepared.server_dir, &mut instructions)?;

        self.bundle(&prepared.server_dir, &prepared.node_version, options, &mut instructions)?;

        instructions.commands.push(format!(
            "gcloud beta run deploy {} --platform managed --region {} --source {} --allow-unauthenticated",
            target.service_id.as_str(),
            target.region,
            prepared.server_dir.display()
        ));
        instructions
            .commands
            .push("firebase deploy --only hosting".to_string());
        self.announce_commands(&instructions);
        Ok(instructions)
    }

    // === Validation ===

    fn prepare_function(&self, target: &FunctionTarget) -> Result<FunctionPlan, StageError> {
        let package_path = target.source_path.join("package.json");
        let package = self.read_package(&package_path).map_err(|message| {
            StageError::FunctionsPackage {
                path: package_path.clone(),
                message,
            }
        })?;

        let main = package
            .get("main")
            .and_then(Value::as_str)
            .filter(|main| !main.is_empty())
            .ok_or_else(|| StageError::MissingFunctionsMain {
                path: package_path.clone(),
            })?;

        let engine = package.pointer("/engines/node").and_then(Value::as_str);
        let version = ensure_compatible_runtime(engine, target.runtime.as_deref())?;
        tracing::debug!(main, node = version.as_str(), "functions package read");

        let main_dir = Path::new(main).parent().unwrap_or_else(|| Path::new(""));
        Ok(FunctionPlan {
            server_dir: target
                .source_path
                .join(main_dir)
                .join(target.name.as_str()),
            entrypoint: target.source_path.join(main),
            node_version: version.as_str().to_string(),
        })
    }

    fn prepare_cloud_run(
        &self,
        target: &CloudRunTarget,
        options: &StageOptions,
    ) -> Result<CloudRunPlan, StageError> {
        let package_path = options.project_root.join("package.json");
        let package = self.read_package(&package_path).map_err(|message| {
            StageError::ProjectPackage {
                path: package_path.clone(),
                message,
            }
        })?;

        if !package.is_object() {
            return Err(StageError::ProjectPackage {
                path: package_path,
                message: "expected a JSON object".to_string(),
            });
        }

        // Missing or unsupported engine: newest supported version
        let engine = package.pointer("/engines/node").and_then(Value::as_str);
        let node_version = match ensure_compatible_runtime(engine, None) {
            Ok(version) => version.as_str().to_string(),
            Err(_) => SUPPORTED_NODE_VERSIONS
                .last()
                .map(|v| v.to_string())
                .unwrap_or_default(),
        };

        let server_dir = match &options.cloud_run_build_dir {
            Some(dir) => options.project_root.join(dir),
            None => options
                .project_root
                .join(format!(".{}", target.service_id.as_str())),
        };

        Ok(CloudRunPlan {
            server_dir,
            package,
            node_version,
        })
    }

    fn read_package(&self, path: &Path) -> Result<Value, String> {
        let text = self.file_system.read(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&text).map_err(|e| e.to_string())
    }

    // === Staging steps ===

    /// Erase both output directories once neither overlaps a project input.
    fn erase_outputs(
        &self,
        plan: &DeploymentPlan,
        options: &StageOptions,
        server_dir: &Path,
        functions_source: Option<&Path>,
    ) -> Result<(), StageError> {
        let sources = [
            self.builder.static_assets_dir(),
            self.builder.build_output_dir(),
        ];
        let mut roots = vec![options.project_root.as_path(), plan.config_dir.as_path()];
        roots.extend(functions_source);

        for dir in [plan.public_dir.as_path(), server_dir] {
            ensure_erase_spares_inputs(dir, &sources, &roots)?;
        }

        self.builder.erase_directory(&plan.public_dir)?;
        self.builder.erase_directory(server_dir)?;
        Ok(())
    }

    /// Copy static and client assets, then prerender. Returns prerendered
    /// paths relative to `public_dir`.
    fn copy_assets(
        &self,
        public_dir: &Path,
        instructions: &mut DeployInstructions,
    ) -> Result<Vec<String>, StageError> {
        self.builder.log(
            LogLevel::Minor,
            &format!("Writing client application to {}", public_dir.display()),
        );
        instructions
            .copied
            .extend(self.builder.copy_static_files(public_dir)?);
        instructions
            .copied
            .extend(self.builder.copy_client_files(public_dir)?);

        self.builder.log(
            LogLevel::Minor,
            &format!("Prerendering static pages to {}", public_dir.display()),
        );
        let prerendered = self.builder.prerender(public_dir)?;
        let routes = prerendered
            .iter()
            .map(|path| {
                let relative = path.strip_prefix(public_dir).unwrap_or(path);
                format!("/{}", relative.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        instructions.copied.extend(prerendered);
        Ok(routes)
    }

    fn copy_server(
        &self,
        server_dir: &Path,
        instructions: &mut DeployInstructions,
    ) -> Result<(), StageError> {
        instructions
            .copied
            .extend(self.builder.copy_server_files(&server_dir.join("server"))?);

        let manifest = self.builder.generate_manifest("./server")?;
        self.write_text(&server_dir.join("manifest.js"), &manifest, instructions)?;
        self.write_text(&server_dir.join("handler.js"), HANDLER_ENTRY, instructions)
    }

    fn copy_lockfiles(
        &self,
        project_root: &Path,
        server_dir: &Path,
        instructions: &mut DeployInstructions,
    ) -> Result<(), StageError> {
        for name in LOCKFILES {
            let from = project_root.join(name);
            if !self.file_system.exists(&from) {
                continue;
            }
            let to = server_dir.join(name);
            self.file_system
                .copy_file(&from, &to)
                .map_err(|e| StageError::fs("copy", &from, e))?;
            let hash = self
                .file_system
                .hash(&to)
                .map_err(|e| StageError::fs("hash", &to, e))?;
            instructions.written.push(WrittenFile { path: to, hash });
        }
        Ok(())
    }

    fn bundle(
        &self,
        server_dir: &Path,
        node_version: &str,
        options: &StageOptions,
        instructions: &mut DeployInstructions,
    ) -> Result<(), StageError> {
        let mut bundle = BundleOptions::node(
            server_dir.join("handler.js"),
            server_dir.join("index.js"),
            node_version,
        );
        bundle.platform = options.bundler_platform.clone();

        tracing::debug!(bundler = self.bundler.name(), target = %bundle.target, "bundling server entry");
        self.bundler.bundle(&bundle)?;

        if let Ok(hash) = self.file_system.hash(&bundle.outfile) {
            instructions.written.push(WrittenFile {
                path: bundle.outfile,
                hash,
            });
        }
        Ok(())
    }

    /// Warn, with a paste-ready snippet, when the entrypoint lacks the export.
    fn inspect_entrypoint(
        &self,
        target: &FunctionTarget,
        entrypoint: &Path,
        instructions: &mut DeployInstructions,
    ) {
        let declared = match self.file_system.read(entrypoint) {
            Ok(source) => declares_export(&source, &target.name),
            Err(e) => {
                tracing::debug!(error = %e, "functions entrypoint unreadable");
                false
            }
        };
        if declared {
            return;
        }

        let snippet = function_snippet(&target.name);
        let warning = format!(
            "Add the following Cloud Function to {}",
            entrypoint.display()
        );
        self.builder
            .log(LogLevel::Warn, &format!("{}\n{}", warning, boxed(&snippet)));
        instructions.warnings.push(warning);
        instructions.snippet = Some(snippet);
    }

    fn announce_commands(&self, instructions: &DeployInstructions) {
        let commands = instructions.commands.join("\n");
        self.builder.log(
            LogLevel::Info,
            &format!("To deploy, run:\n{}", boxed(&commands)),
        );
    }

    // === Writes ===

    fn write_text(
        &self,
        path: &Path,
        content: &str,
        instructions: &mut DeployInstructions,
    ) -> Result<(), StageError> {
        self.file_system
            .write(path, content)
            .map_err(|e| StageError::fs("write", path, e))?;
        instructions.written.push(WrittenFile {
            path: path.to_path_buf(),
            hash: ContentHash::from_content(content),
        });
        Ok(())
    }

    fn write_json(
        &self,
        path: &Path,
        value: &Value,
        instructions: &mut DeployInstructions,
    ) -> Result<(), StageError> {
        let mut content = serde_json::to_string_pretty(value).map_err(|e| StageError::FileSystem {
            operation: "serialize",
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        content.push('\n');
        self.write_text(path, &content, instructions)
    }
}

/// Rewrite the project manifest for a functions-framework container.
pub fn cloud_run_package(mut package: Value, node_version: &str) -> Value {
    let Some(record) = package.as_object_mut() else {
        return package;
    };

    set_nested(
        record,
        "scripts",
        "start",
        Value::from("functions-framework --target=default"),
    );
    set_nested(
        record,
        "dependencies",
        FUNCTIONS_FRAMEWORK,
        Value::from(FUNCTIONS_FRAMEWORK_VERSION),
    );
    record.insert("engines".to_string(), json!({ "node": node_version }));
    record.insert("main".to_string(), Value::from("index.js"));
    record.remove("type");

    package
}

/// Set `record[key][field]`, replacing a non-object `record[key]`.
fn set_nested(record: &mut Map<String, Value>, key: &str, field: &str, value: Value) {
    match record.get_mut(key) {
        Some(Value::Object(map)) => {
            map.insert(field.to_string(), value);
        }
        _ => {
            let mut map = Map::new();
            map.insert(field.to_string(), value);
            record.insert(key.to_string(), Value::Object(map));
        }
    }
}

fn boxed(body: &str) -> String {
    const RULE: &str = "+--------------------------------------------------+";
    format!("{RULE}\n{body}\n{RULE}")
}
