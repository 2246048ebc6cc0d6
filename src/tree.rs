//! Project structure summary.
//!
//! Produces a short indented listing of the project layout for the prompt. The
//! listing is lossy on purpose: it stops after a few directory levels, skips
//! hidden and ignored directories, and lists only the first files of each
//! directory.

use crate::config::Limits;
use crate::scanner::is_ignored_name;
use log::debug;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Builds the indented directory listing for `project_root`.
///
/// Directories are printed as `name/`, files under them indented one more
/// step. Up to `limits.tree_depth` directory levels are listed (the root being
/// the first) and at most `limits.tree_files_per_dir` files per directory, in
/// name order.
///
/// # Example
///
/// ```text
/// shop-api/
///   package.json
///   src/
///     app.ts
///     routes/
///       users.ts
/// ```
pub fn build_tree(project_root: &Path, limits: &Limits) -> String {
    if limits.tree_depth == 0 {
        return String::new();
    }

    let mut lines = Vec::new();

    let walker = WalkDir::new(project_root)
        .max_depth(limits.tree_depth - 1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !is_ignored_name(&name)
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping tree entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let indent = "  ".repeat(entry.depth());
        let name = if entry.depth() == 0 {
            project_root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| project_root.display().to_string())
        } else {
            entry.file_name().to_string_lossy().into_owned()
        };
        lines.push(format!("{}{}/", indent, name));

        for file in list_files(entry.path(), limits.tree_files_per_dir) {
            lines.push(format!("{}  {}", indent, file));
        }
    }

    lines.join("\n")
}

/// Names of the entries of `dir` that do not resolve to a directory, sorted, at
/// most `max` of them.
fn list_files(dir: &Path, max: usize) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files.truncate(max);
    files
}
