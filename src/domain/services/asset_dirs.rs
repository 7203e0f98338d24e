//! Guards against staging over the project's own inputs

use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;

/// Fail when the hosting output directory is the static asset source directory.
///
/// The stager erases its output directory before copying, so the two must
/// never be the same place. Paths are compared after lexical normalization.
pub fn ensure_static_resource_dirs_differ(source: &Path, dest: &Path) -> Result<(), ConfigError> {
    if normalize_lexically(source) == normalize_lexically(dest) {
        return Err(ConfigError::IdenticalAssetDirs {
            source_dir: source.to_path_buf(),
            dest: dest.to_path_buf(),
        });
    }
    Ok(())
}

/// Fail when erasing `dir` would remove project inputs.
///
/// `sources` are read while staging: `dir` may not be one of them, contain
/// one, or sit inside one. `roots` may hold output directories but `dir`
/// may not be a root or contain one.
pub fn ensure_erase_spares_inputs(
    dir: &Path,
    sources: &[&Path],
    roots: &[&Path],
) -> Result<(), ConfigError> {
    let target = comparable(dir);

    let overlapping_source = sources.iter().find(|source| {
        let source = comparable(source);
        target.starts_with(&source) || source.starts_with(&target)
    });
    let covered_root = || roots.iter().find(|root| comparable(root).starts_with(&target));

    match overlapping_source.or_else(covered_root) {
        Some(input) => Err(ConfigError::OverlappingOutputDir {
            dir: dir.to_path_buf(),
            input: input.to_path_buf(),
        }),
        None => Ok(()),
    }
}

/// Drop `.` components and fold `..` into its parent without touching disk.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn comparable(path: &Path) -> PathBuf {
    normalize_lexically(&std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()))
}
