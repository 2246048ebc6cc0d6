//! API context gathering.
//!
//! [`gather_api_context`] runs the whole scan: it summarises the project
//! layout, excerpts the manifests, detects the framework, selects and reads
//! route/schema/middleware/config files, reads explicit includes and computes
//! the heuristic counts. The resulting [`ApiContext`] renders to a single
//! prompt-ready text block.

use crate::config::{truncate_chars, Limits};
use crate::counter::{count_endpoints, count_schemas};
use crate::detector::FrameworkDetector;
use crate::patterns::{Role, MANIFEST_FILES};
use crate::reader::ContentReader;
use crate::scanner::FileScanner;
use crate::selector::FileSelector;
use crate::tree::build_tree;
use anyhow::Result;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

/// A source file excerpt included in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the project root, `/`-separated
    pub path: String,
    /// File content, already truncated
    pub content: String,
}

impl FileEntry {
    /// Creates a new file entry.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Everything gathered from one scan of a project.
///
/// Built fresh per invocation, never modified after [`gather_api_context`]
/// returns, and consumed by the two generation requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiContext {
    /// Display name, taken from the root directory name
    pub project_name: String,
    /// Indented directory listing (see [`build_tree`])
    pub project_structure: String,
    /// Manifest excerpts with filename headers
    pub package_info: String,
    /// Detected framework identifier
    pub framework: String,
    pub route_files: Vec<FileEntry>,
    pub schema_files: Vec<FileEntry>,
    pub middleware_files: Vec<FileEntry>,
    pub config_files: Vec<FileEntry>,
    /// Files requested explicitly with `--include`
    pub extra_files: Vec<FileEntry>,
    /// Approximate number of endpoint registrations in the route files
    pub endpoint_count: usize,
    /// Approximate number of type declarations in the schema files
    pub schema_count: usize,
    /// True if any endpoint was counted or any route file was found
    pub has_api_code: bool,
}

impl ApiContext {
    /// Renders the context as a markdown document for the prompt.
    ///
    /// Sections: title, structure, manifests, then each non-empty file category
    /// in fixed order with every file fenced as a code block.
    pub fn to_prompt_context(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("# Project: {}\n", self.project_name));

        if !self.project_structure.is_empty() {
            parts.push(format!("## Project Structure\n{}\n", self.project_structure));
        }

        if !self.package_info.is_empty() {
            parts.push(format!("## Package Manifests\n{}\n", self.package_info));
        }

        let categories = [
            ("Route / Controller Files", &self.route_files),
            ("Schema / DTO Files", &self.schema_files),
            ("Middleware / Security Files", &self.middleware_files),
            ("Configuration Files", &self.config_files),
            ("Additional Files", &self.extra_files),
        ];

        for (label, files) in categories {
            if files.is_empty() {
                continue;
            }
            parts.push(format!("## {}\n", label));
            for file in files {
                parts.push(format!("### {}\n```\n{}\n```\n", file.path, file.content));
            }
        }

        parts.join("\n")
    }
}

/// Reads the well-known manifests at the project root.
///
/// Each manifest that exists is truncated to `max_chars` and wrapped in a code
/// fence under a `### <filename>` header.
pub fn read_manifests(project_root: &Path, max_chars: usize) -> String {
    let mut parts = Vec::new();

    for name in MANIFEST_FILES {
        let path = project_root.join(name);
        if !path.is_file() {
            continue;
        }
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Including manifest {}", name);
                parts.push(format!(
                    "### {}\n```\n{}\n```",
                    name,
                    truncate_chars(&content, max_chars)
                ));
            }
            Err(e) => warn!("Failed to read manifest {}: {}", path.display(), e),
        }
    }

    parts.join("\n")
}

/// Scans the project and gathers API-related context.
///
/// # Arguments
///
/// * `project_root` - The project root directory
/// * `includes` - Extra files to include, relative to the root
/// * `limits` - Truncation and file-count caps
///
/// # Errors
///
/// Returns an error if the project root cannot be accessed. Individual files
/// that cannot be read are skipped.
pub fn gather_api_context(
    project_root: &Path,
    includes: &[String],
    limits: &Limits,
) -> Result<ApiContext> {
    let scan = FileScanner::new(project_root.to_path_buf()).scan()?;
    let root = scan.root.as_path();

    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let framework = FrameworkDetector::detect(root);
    info!("Detected framework: {}", framework);

    let selector = FileSelector::new(&scan, framework, limits);
    let reader = ContentReader::new(root);

    let route_files = reader.read_files(&selector.select(Role::Routes)?, limits.file_chars);
    let schema_files = reader.read_files(&selector.select(Role::Schemas)?, limits.file_chars);
    let middleware_files =
        reader.read_files(&selector.select(Role::Middleware)?, limits.file_chars);
    let config_files = reader.read_files(&selector.select(Role::Config)?, limits.file_chars);
    let extra_files = reader.read_includes(includes, limits.include_chars);

    let endpoint_count = count_endpoints(&route_files);
    let schema_count = count_schemas(&schema_files);
    let has_api_code = endpoint_count > 0 || !route_files.is_empty();

    info!(
        "Collected {} route, {} schema, {} middleware, {} config and {} extra files",
        route_files.len(),
        schema_files.len(),
        middleware_files.len(),
        config_files.len(),
        extra_files.len()
    );

    Ok(ApiContext {
        project_name,
        project_structure: build_tree(root, limits),
        package_info: read_manifests(root, limits.manifest_chars),
        framework: framework.to_string(),
        route_files,
        schema_files,
        middleware_files,
        config_files,
        extra_files,
        endpoint_count,
        schema_count,
        has_api_code,
    })
}
