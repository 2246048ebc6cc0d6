//! Reading and writing the generated artefacts.
//!
//! Outputs live under `.openapi/` in the project root: the spec at
//! `.openapi/openapi.yaml` and one page per endpoint in `.openapi/endpoints/`.
//! The same files are read back when a later run updates them.

use crate::endpoint_docs::EndpointDoc;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const OPENAPI_DIR: &str = ".openapi";
pub const OPENAPI_FILE: &str = "openapi.yaml";
pub const ENDPOINTS_DIR: &str = "endpoints";

/// Locations of the generated files for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub openapi_dir: PathBuf,
    pub spec_path: PathBuf,
    pub endpoints_dir: PathBuf,
}

impl OutputLayout {
    /// Layout rooted at `project_root`.
    pub fn for_project(project_root: &Path) -> Self {
        let openapi_dir = project_root.join(OPENAPI_DIR);
        Self {
            spec_path: openapi_dir.join(OPENAPI_FILE),
            endpoints_dir: openapi_dir.join(ENDPOINTS_DIR),
            openapi_dir,
        }
    }

    /// True if a spec from a previous run exists.
    pub fn has_existing_spec(&self) -> bool {
        self.spec_path.is_file()
    }

    /// Reads the previously generated spec, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec exists but cannot be read.
    pub fn read_existing_spec(&self) -> Result<Option<String>> {
        if !self.has_existing_spec() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.spec_path)
            .with_context(|| format!("Failed to read {}", self.spec_path.display()))?;
        Ok(Some(content))
    }

    /// Reads the previously generated endpoint pages, keyed by file name.
    ///
    /// Only `*.md` files directly inside the endpoints directory are read.
    /// Unreadable pages are skipped with a warning.
    pub fn read_existing_docs(&self) -> Result<BTreeMap<String, String>> {
        let mut docs = BTreeMap::new();
        if !self.endpoints_dir.is_dir() {
            return Ok(docs);
        }

        let entries = fs::read_dir(&self.endpoints_dir)
            .with_context(|| format!("Failed to list {}", self.endpoints_dir.display()))?;

        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            match fs::read_to_string(&path) {
                Ok(content) => {
                    docs.insert(name, content);
                }
                Err(e) => warn!("Skipping unreadable endpoint doc {}: {}", path.display(), e),
            }
        }

        debug!("Read {} existing endpoint docs", docs.len());
        Ok(docs)
    }

    /// Writes the spec, creating `.openapi/` when needed.
    pub fn write_spec(&self, yaml: &str) -> Result<()> {
        write_to_file(yaml, &self.spec_path)
    }

    /// Writes every endpoint page into the endpoints directory.
    ///
    /// File names that are not a single plain path component are skipped.
    ///
    /// # Returns
    ///
    /// The number of pages written.
    pub fn write_docs(&self, docs: &[EndpointDoc]) -> Result<usize> {
        let mut written = 0;
        for doc in docs {
            if !is_plain_file_name(&doc.filename) {
                warn!("Skipping endpoint doc with unsafe file name: {}", doc.filename);
                continue;
            }
            write_to_file(&doc.content, &self.endpoints_dir.join(&doc.filename))?;
            written += 1;
        }
        Ok(written)
    }
}

/// True if `name` is exactly one normal path component.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains('\\')
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
