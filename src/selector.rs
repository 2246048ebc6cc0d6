//! File selection by role.
//!
//! Given a scanned project and a detected framework, picks the files most
//! likely to hold routes, schemas, middleware or configuration.

use crate::config::Limits;
use crate::glob::GlobPattern;
use crate::patterns::Role;
use crate::scanner::{has_ignored_component, to_slash_path, ScanResult};
use anyhow::Result;
use log::debug;
use std::collections::HashSet;
use std::path::PathBuf;

/// Selects files for each [`Role`] from a [`ScanResult`].
pub struct FileSelector<'a> {
    scan: &'a ScanResult,
    framework: &'a str,
    limits: &'a Limits,
}

impl<'a> FileSelector<'a> {
    /// Creates a selector over an existing scan.
    pub fn new(scan: &'a ScanResult, framework: &'a str, limits: &'a Limits) -> Self {
        Self {
            scan,
            framework,
            limits,
        }
    }

    /// Selects the files for `role`.
    ///
    /// Patterns are tried in order; files matching one pattern are taken in
    /// lexical order. A file matching several patterns is kept once, at its
    /// first position. Selection stops at the role's maximum file count.
    ///
    /// # Returns
    ///
    /// Absolute paths of the selected files.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern in the table fails to compile.
    pub fn select(&self, role: Role) -> Result<Vec<PathBuf>> {
        let patterns = role.patterns(self.framework);
        let max_files = role.max_files(self.limits);
        let candidates: Vec<(String, PathBuf)> = self
            .scan
            .files
            .iter()
            .filter(|relative| !has_ignored_component(relative))
            .map(|relative| (to_slash_path(relative), self.scan.root.join(relative)))
            .collect();

        let mut seen = HashSet::new();
        let mut selected = Vec::new();

        for pattern in patterns {
            let glob = GlobPattern::new(pattern)?;

            for (slash_path, absolute) in &candidates {
                if !glob.matches(slash_path) || seen.contains(absolute) {
                    continue;
                }

                debug!("{:?}: {} matched {}", role, slash_path, glob.as_str());
                seen.insert(absolute.clone());
                selected.push(absolute.clone());

                if selected.len() >= max_files {
                    debug!("{:?}: reached limit of {} files", role, max_files);
                    return Ok(selected);
                }
            }
        }

        debug!("{:?}: selected {} files", role, selected.len());
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::FileScanner;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn project(files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            let path = temp_dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "// content").unwrap();
        }
        temp_dir
    }

    fn select(dir: &TempDir, framework: &str, role: Role, limits: &Limits) -> Vec<String> {
        let scan = FileScanner::new(dir.path().to_path_buf()).scan().unwrap();
        let selector = FileSelector::new(&scan, framework, limits);
        selector
            .select(role)
            .unwrap()
            .iter()
            .map(|p| to_slash_path(p.strip_prefix(&scan.root).unwrap()))
            .collect()
    }

    #[test]
    fn test_framework_patterns_come_first() {
        let dir = project(&[
            "src/api/health.ts",
            "src/users/users.controller.ts",
        ]);
        let selected = select(&dir, "nestjs", Role::Routes, &Limits::default());
        assert_eq!(
            selected,
            vec!["src/users/users.controller.ts", "src/api/health.ts"]
        );
    }

    #[test]
    fn test_file_matching_two_patterns_appears_once() {
        // matches "**/routes/**/*.ts", "**/routes/**" and "**/*router*.*"
        let dir = project(&["src/routes/users.router.ts"]);
        let selected = select(&dir, "express", Role::Routes, &Limits::default());
        assert_eq!(selected, vec!["src/routes/users.router.ts"]);
    }

    #[test]
    fn test_lexical_order_within_pattern() {
        let dir = project(&["b/routes/z.js", "a/routes/y.js", "a/routes/x.js"]);
        let selected = select(&dir, "unknown", Role::Routes, &Limits::default());
        assert_eq!(
            selected,
            vec!["a/routes/x.js", "a/routes/y.js", "b/routes/z.js"]
        );
    }

    #[test]
    fn test_max_files_limit() {
        let files: Vec<String> = (0..20).map(|i| format!("middleware/m{:02}.ts", i)).collect();
        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
        let dir = project(&refs);

        let selected = select(&dir, "unknown", Role::Middleware, &Limits::default());
        assert_eq!(selected.len(), 15);
        assert_eq!(selected[0], "middleware/m00.ts");

        let limits = Limits {
            max_middleware_files: 3,
            ..Limits::default()
        };
        assert_eq!(select(&dir, "unknown", Role::Middleware, &limits).len(), 3);
    }

    #[test]
    fn test_ignored_directories_never_selected() {
        let dir = project(&[
            "node_modules/express/lib/router/index.js",
            "dist/api/users.js",
            "src/api/users.ts",
        ]);
        let selected = select(&dir, "express", Role::Routes, &Limits::default());
        assert_eq!(selected, vec!["src/api/users.ts"]);
    }

    #[test]
    fn test_config_selection() {
        let dir = project(&[
            ".env.example",
            "src/main/resources/application.yml",
            "config/server.js",
            "config/database.js",
        ]);
        let selected = select(&dir, "spring", Role::Config, &Limits::default());
        assert_eq!(
            selected,
            vec![
                "src/main/resources/application.yml",
                ".env.example",
                "config/server.js"
            ]
        );
    }

    #[test]
    fn test_schema_selection_for_fastapi() {
        let dir = project(&["app/schemas/user.py", "app/models/user.py", "app/main.py"]);
        let selected = select(&dir, "fastapi", Role::Schemas, &Limits::default());
        assert_eq!(selected, vec!["app/models/user.py", "app/schemas/user.py"]);
    }

    #[test]
    fn test_no_matches_returns_empty() {
        let dir = project(&["README.md"]);
        let selected = select(&dir, "unknown", Role::Routes, &Limits::default());
        assert!(selected.is_empty());
    }
}
