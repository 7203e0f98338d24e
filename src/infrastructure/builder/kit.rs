//! Framework build output on local disk
//!
//! Expects the usual compiled layout under the output directory:
//!
//! ```text
//! <output>/client/       browser bundle and immutable assets
//! <output>/server/       server bundle, including manifest.js
//! <output>/prerendered/  prerendered pages
//! ```

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::{Builder, BuilderError, BuilderResult, FileSystem, LogLevel};
use crate::infrastructure::fs::LocalFs;

/// Resolved directories of one framework build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitLayout {
    pub output_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl KitLayout {
    pub fn new(output_dir: impl Into<PathBuf>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            static_dir: static_dir.into(),
        }
    }

    pub fn client_dir(&self) -> PathBuf {
        self.output_dir.join("client")
    }

    pub fn server_dir(&self) -> PathBuf {
        self.output_dir.join("server")
    }

    pub fn prerendered_dir(&self) -> PathBuf {
        self.output_dir.join("prerendered")
    }
}

/// Builder backed by a framework build output directory
#[derive(Debug, Clone)]
pub struct KitOutputBuilder {
    layout: KitLayout,
    fs: LocalFs,
}

impl KitOutputBuilder {
    pub fn new(layout: KitLayout) -> Self {
        Self {
            layout,
            fs: LocalFs::new(),
        }
    }

    pub fn layout(&self) -> &KitLayout {
        &self.layout
    }

    /// Copy every file below `from` into `dest`, keeping relative paths.
    /// A missing source directory copies nothing.
    fn copy_tree(&self, operation: &'static str, from: &Path, dest: &Path) -> BuilderResult<Vec<PathBuf>> {
        if !from.is_dir() {
            tracing::debug!(from = %from.display(), "nothing to copy");
            return Ok(Vec::new());
        }

        let mut copied = Vec::new();
        for relative in list_files(from).map_err(|e| BuilderError::new(operation, from, e))? {
            let target = dest.join(&relative);
            self.fs
                .copy_file(&from.join(&relative), &target)
                .map_err(|e| BuilderError::new(operation, &target, e.to_string()))?;
            copied.push(target);
        }
        tracing::debug!(operation, count = copied.len(), dest = %dest.display(), "copied files");
        Ok(copied)
    }
}

impl Builder for KitOutputBuilder {
    fn copy_static_files(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>> {
        self.copy_tree("copy static files", &self.layout.static_dir, dest)
    }

    fn copy_client_files(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>> {
        self.copy_tree("copy client files", &self.layout.client_dir(), dest)
    }

    fn copy_server_files(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>> {
        let server = self.layout.server_dir();
        if !server.is_dir() {
            return Err(BuilderError::new(
                "copy server files",
                &server,
                "server build output not found; run the framework build first",
            ));
        }
        self.copy_tree("copy server files", &server, dest)
    }

    fn erase_directory(&self, dir: &Path) -> BuilderResult<()> {
        match std::fs::remove_dir_all(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BuilderError::new("erase directory", dir, e.to_string())),
        }
    }

    fn prerender(&self, dest: &Path) -> BuilderResult<Vec<PathBuf>> {
        self.copy_tree("prerender", &self.layout.prerendered_dir(), dest)
    }

    fn generate_manifest(&self, relative_path: &str) -> BuilderResult<String> {
        let static_dir = &self.layout.static_dir;
        let mut assets = if static_dir.is_dir() {
            list_files(static_dir)
                .map_err(|e| BuilderError::new("generate manifest", static_dir, e))?
        } else {
            Vec::new()
        };
        assets.sort();

        let assets = assets
            .iter()
            .map(|p| format!("{:?}", p.to_string_lossy().replace('\\', "/")))
            .collect::<Vec<_>>()
            .join(", ");

        let base = relative_path.trim_end_matches('/');
        Ok(format!(
            "import {{manifest as base}} from '{base}/manifest.js';\n\nexport const manifest = {{...base, assets: new Set([{assets}])}};\n"
        ))
    }

    fn static_assets_dir(&self) -> &Path {
        &self.layout.static_dir
    }

    fn build_output_dir(&self) -> &Path {
        &self.layout.output_dir
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Minor => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
        }
    }
}

/// Files below `root`, relative to it. Hidden files are included and ignore
/// files are not honored: build output is copied verbatim.
fn list_files(root: &Path) -> Result<Vec<PathBuf>, String> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| e.to_string())?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(files)
}
