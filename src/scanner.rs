use crate::patterns::IGNORED_DIRS;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// File scanner for traversing project directories.
///
/// The `FileScanner` walks a project directory once and records every regular file
/// that is not inside an ignored directory (dependency caches, build output, version
/// control metadata). Selection passes then match glob patterns against the recorded
/// relative paths instead of walking the tree again for each role.
///
/// # Example
///
/// ```no_run
/// use openapi_synth::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./my-project"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} files", result.files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
}

/// Result of directory scanning operation.
///
/// Contains the discovered files and any warnings encountered during scanning.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Root directory the relative paths are anchored at
    pub root: PathBuf,
    /// Project-relative paths of all discovered files, in lexical component order
    pub files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a new `FileScanner` for the specified root directory.
    ///
    /// # Arguments
    ///
    /// * `root_path` - The project root to scan
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Scans the directory tree and collects all files outside ignored directories.
    ///
    /// Hidden files and directories are kept (`.env.example` is a config candidate);
    /// only the names in [`IGNORED_DIRS`] are pruned. If any entry cannot be accessed,
    /// a warning is logged and added to the result, but scanning continues.
    ///
    /// # Returns
    ///
    /// Returns a `ScanResult` with relative paths sorted component by component, so
    /// pattern matches are collected in a reproducible order.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be accessed.
    pub fn scan(&self) -> Result<ScanResult> {
        let root = self
            .root_path
            .canonicalize()
            .with_context(|| format!("Failed to access project root: {}", self.root_path.display()))?;

        let mut files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&root)
            .into_iter()
            .filter_entry(|e| {
                // Don't filter the root directory itself
                if e.depth() == 0 {
                    return true;
                }

                !is_ignored_name(&e.file_name().to_string_lossy())
            })
        {
            match entry {
                Ok(entry) => {
                    // `DirEntry::file_type` does not follow symlinks; linked source files count too
                    if !entry.path().is_file() {
                        continue;
                    }
                    if let Ok(relative) = entry.path().strip_prefix(&root) {
                        files.push(relative.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        files.sort();
        debug!("Scanned {} files under {}", files.len(), root.display());

        Ok(ScanResult {
            root,
            files,
            warnings,
        })
    }
}

/// Returns true if a file or directory name is one of the ignored directory names.
pub fn is_ignored_name(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

/// Returns true if any component of `relative` is an ignored directory name.
pub fn has_ignored_component(relative: &Path) -> bool {
    relative.components().any(|component| match component {
        Component::Normal(name) => is_ignored_name(&name.to_string_lossy()),
        _ => false,
    })
}

/// Converts a relative path to the `/`-separated form glob patterns match against.
pub fn to_slash_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
