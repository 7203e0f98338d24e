//! Configuration resolution
//!
//! Turns a hosting configuration document plus the adapter's selection options
//! into a validated [`DeploymentPlan`]. Each check short-circuits to its own
//! [`ConfigError`] variant; nothing is recovered.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::entities::{
    CloudRunSelector, CloudRunTarget, DeployTarget, DeploymentPlan, FunctionTarget,
    FunctionsConfig, HostingConfigDocument, HostingSiteEntry, RewriteKind, RewriteRule,
    SUPPORTED_REGION,
};
use crate::domain::policies::{
    validate_record, RuleContext, CLOUD_RUN_RULES, FUNCTIONS_RULES, FUNCTION_REWRITE_RULES,
    HOSTING_ENTRY_RULES,
};
use crate::domain::ports::FileSystem;
use crate::domain::services::suggest::closest_match;
use crate::domain::value_objects::FunctionName;
use crate::error::ConfigError;

/// Selection inputs for one resolve run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Path to the hosting configuration document
    pub firebase_json_path: PathBuf,
    /// Hosting entry `target` or `site` to select when several exist
    pub target: Option<String>,
    /// Rewrite `source` value routed to the server
    pub source_rewrite_match: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            firebase_json_path: PathBuf::from("firebase.json"),
            target: None,
            source_rewrite_match: "**".to_string(),
        }
    }
}

/// Resolves deployment plans, reading the document through a [`FileSystem`]
pub struct ConfigResolver<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> ConfigResolver<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    /// Load the document named by `options` and resolve it.
    pub fn resolve(&self, options: &ResolveOptions) -> Result<DeploymentPlan, ConfigError> {
        let config_path = absolutize(&options.firebase_json_path);
        let _span = tracing::debug_span!("resolve", path = %config_path.display()).entered();

        if !self.fs.exists(&config_path) {
            return Err(ConfigError::FileNotFound { path: config_path });
        }

        let text = self
            .fs
            .read(&config_path)
            .map_err(|e| ConfigError::ParseError {
                path: config_path.clone(),
                message: e.to_string(),
            })?;

        resolve_document(&text, &config_path, options)
    }
}

/// Resolve already-loaded document text. `config_path` anchors relative paths.
pub fn resolve_document(
    text: &str,
    config_path: &Path,
    options: &ResolveOptions,
) -> Result<DeploymentPlan, ConfigError> {
    let document = HostingConfigDocument::parse(text).map_err(|e| ConfigError::ParseError {
        path: config_path.to_path_buf(),
        message: e.to_string(),
    })?;
    resolve_parsed(&document, config_path, options)
}

/// Resolve a parsed document.
pub fn resolve_parsed(
    document: &HostingConfigDocument,
    config_path: &Path,
    options: &ResolveOptions,
) -> Result<DeploymentPlan, ConfigError> {
    let ctx = RuleContext {
        config_path,
        source_match: &options.source_rewrite_match,
    };

    let entries = document
        .hosting_entries()
        .ok_or_else(|| ConfigError::MissingHostingField {
            path: config_path.to_path_buf(),
        })?;
    tracing::debug!(entries = entries.len(), "hosting entries found");

    let entry = select_entry(&entries, options.target.as_deref(), config_path)?;
    validate_record(entry.raw(), HOSTING_ENTRY_RULES, &ctx)?;

    let (rewrite, kind) = select_rewrite(entry, &options.source_rewrite_match).ok_or_else(|| {
        ConfigError::NoMatchingRewrite {
            path: config_path.to_path_buf(),
            source_match: options.source_rewrite_match.clone(),
        }
    })?;
    tracing::debug!(?kind, "rewrite selected");

    let config_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let target = match kind {
        RewriteKind::Run => cloud_run_target(&rewrite, &ctx)?,
        RewriteKind::Function => function_target(document, &rewrite, &config_dir, &ctx)?,
    };

    Ok(DeploymentPlan {
        target,
        public_dir: config_dir.join(entry.public().unwrap_or_default()),
        hosting_site: entry.identifier().map(str::to_string),
        config_dir,
    })
}

fn select_entry<'a>(
    entries: &'a [HostingSiteEntry],
    wanted: Option<&str>,
    config_path: &Path,
) -> Result<&'a HostingSiteEntry, ConfigError> {
    if let [only] = entries {
        return Ok(only);
    }

    if let Some(index) = entries.iter().position(|e| e.identifier().is_none()) {
        return Err(ConfigError::SiteIdentifierMissing {
            path: config_path.to_path_buf(),
            index,
        });
    }

    let candidates = candidate_identifiers(entries);

    let Some(wanted) = wanted else {
        return Err(ConfigError::AmbiguousSiteSelection {
            path: config_path.to_path_buf(),
            candidates,
        });
    };

    entries
        .iter()
        .find(|e| e.target.as_deref() == Some(wanted))
        .or_else(|| entries.iter().find(|e| e.site.as_deref() == Some(wanted)))
        .ok_or_else(|| ConfigError::NoMatchingSite {
            path: config_path.to_path_buf(),
            requested: wanted.to_string(),
            suggestion: closest_match(wanted, candidates.iter().map(String::as_str)),
            candidates,
        })
}

/// Every `target` and `site` value, in document order, without repeats.
fn candidate_identifiers(entries: &[HostingSiteEntry]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in entries.iter().flat_map(HostingSiteEntry::identifiers) {
        if !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    out
}

fn select_rewrite(entry: &HostingSiteEntry, source_match: &str) -> Option<(RewriteRule, RewriteKind)> {
    entry
        .rewrites()
        .into_iter()
        .filter(|rule| rule.is_relevant(source_match))
        .find_map(|rule| rule.kind().map(|kind| (rule, kind)))
}

fn cloud_run_target(rewrite: &RewriteRule, ctx: &RuleContext<'_>) -> Result<DeployTarget, ConfigError> {
    let run = rewrite.run().unwrap_or(&Value::Null);
    validate_record(run, CLOUD_RUN_RULES, ctx)?;

    let selector = CloudRunSelector::from_validated(run).ok_or_else(|| ConfigError::MissingServiceId {
        path: ctx.config_path.to_path_buf(),
    })?;

    Ok(DeployTarget::CloudRun(CloudRunTarget {
        service_id: selector.service_id,
        region: selector
            .region
            .unwrap_or_else(|| SUPPORTED_REGION.to_string()),
    }))
}

fn function_target(
    document: &HostingConfigDocument,
    rewrite: &RewriteRule,
    config_dir: &Path,
    ctx: &RuleContext<'_>,
) -> Result<DeployTarget, ConfigError> {
    validate_record(rewrite.raw(), FUNCTION_REWRITE_RULES, ctx)?;

    let name = rewrite
        .function_name()
        .and_then(FunctionName::parse)
        .ok_or_else(|| ConfigError::InvalidFunctionName {
            path: ctx.config_path.to_path_buf(),
            name: rewrite.function_name().unwrap_or_default().to_string(),
        })?;

    let functions = document.functions().unwrap_or(&Value::Null);
    validate_record(functions, FUNCTIONS_RULES, ctx)?;
    let functions =
        FunctionsConfig::from_validated(functions).ok_or_else(|| ConfigError::MissingFunctionsSource {
            path: ctx.config_path.to_path_buf(),
        })?;

    Ok(DeployTarget::Function(FunctionTarget {
        name,
        source_path: config_dir.join(&functions.source),
        runtime: functions.runtime,
    }))
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
