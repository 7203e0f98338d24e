//! Option loading and environment overrides

use std::fs;
use std::path::Path;

use crate::error::{AdapterError, AdapterResult};

pub use crate::domain::value_objects::ConfigWarning;

use super::env_validator::EnvVarValidator;
use super::types::{AdapterOptions, BUNDLER_PLATFORMS, CONFIG_FILE_NAME};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "FIREBASE_ADAPTER_";

/// Load options and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AdapterResult<(AdapterOptions, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let options: AdapterOptions = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| AdapterError::InvalidOptions {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((options, warnings))
}

/// Load the project config file if present, then apply env overrides.
///
/// A missing file yields defaults; a malformed one is an error.
pub fn load_or_default(project_root: &Path) -> AdapterResult<(AdapterOptions, Vec<ConfigWarning>)> {
    let project_config = project_root.join(CONFIG_FILE_NAME);
    let (options, warnings) = if project_config.exists() {
        tracing::debug!(path = %project_config.display(), "loading adapter options");
        load_with_warnings(&project_config)?
    } else {
        (AdapterOptions::default(), Vec::new())
    };

    Ok((with_env_overrides(options), warnings))
}

/// Apply environment variable overrides (FIREBASE_ADAPTER_* prefix)
pub fn with_env_overrides(options: AdapterOptions) -> AdapterOptions {
    apply_env(options, |name| std::env::var(name).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub fn apply_env<F>(mut options: AdapterOptions, lookup: F) -> AdapterOptions
where
    F: Fn(&str) -> Option<String>,
{
    let var = |suffix: &str| {
        lookup(&format!("{ENV_PREFIX}{suffix}")).filter(|value| !value.trim().is_empty())
    };

    if let Some(path) = var("FIREBASE_JSON") {
        options.firebase_json = path.into();
    }

    if let Some(target) = var("TARGET") {
        options.target = Some(target);
    }

    if let Some(source) = var("SOURCE_REWRITE_MATCH") {
        options.source_rewrite_match = source;
    }

    if let Some(dir) = var("CLOUD_RUN_BUILD_DIR") {
        options.cloud_run_build_dir = Some(dir.into());
    }

    if let Some(dir) = var("OUTPUT_DIR") {
        options.output_dir = dir.into();
    }

    if let Some(platform) = var("BUNDLER_PLATFORM") {
        let validator = EnvVarValidator::new("FIREBASE_ADAPTER_BUNDLER_PLATFORM", BUNDLER_PLATFORMS);
        let current = options.bundler.platform.clone();
        options.bundler.platform = validator.parse(
            &platform,
            |s| {
                let s = s.to_lowercase();
                BUNDLER_PLATFORMS.contains(&s.as_str()).then_some(s)
            },
            current,
        );
    }

    options
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "firebase_json",
        "target",
        "hosting_site",
        "source_rewrite_match",
        "cloud_run_build_dir",
        "static_dir",
        "output_dir",
        "bundler",
        "command",
        "platform",
        "extra_args",
    ];

    crate::domain::services::closest_match(unknown, CANDIDATES.iter().copied())
}
