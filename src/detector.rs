use crate::patterns::{FRAMEWORK_MARKERS, UNKNOWN_FRAMEWORK};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Framework detector for identifying the web framework a project is built on.
///
/// The `FrameworkDetector` reads well-known manifest files at the project root
/// (`package.json`, `pyproject.toml`, `pom.xml`, `go.mod`, ...) and looks for
/// marker substrings naming a framework dependency.
///
/// Detection is first-match-wins: manifests are checked in table order and
/// markers within a manifest in table order. Conflicting signals across
/// manifests are not reconciled.
pub struct FrameworkDetector;

impl FrameworkDetector {
    /// Detects the primary web framework of the project at `project_root`.
    ///
    /// Manifest content is lowercased before matching. Missing manifests are
    /// skipped; unreadable manifests are treated as non-matching.
    ///
    /// # Arguments
    ///
    /// * `project_root` - The project root directory
    ///
    /// # Returns
    ///
    /// Returns the framework identifier (e.g. `"express"`, `"spring"`), or
    /// `"unknown"` if no marker matched.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use openapi_synth::detector::FrameworkDetector;
    /// use std::path::Path;
    ///
    /// let framework = FrameworkDetector::detect(Path::new("./my-project"));
    /// println!("Detected framework: {}", framework);
    /// ```
    pub fn detect(project_root: &Path) -> &'static str {
        for (manifest, markers) in FRAMEWORK_MARKERS {
            let manifest_path = project_root.join(manifest);
            if !manifest_path.is_file() {
                continue;
            }

            let content = match fs::read_to_string(&manifest_path) {
                Ok(content) => content.to_lowercase(),
                Err(e) => {
                    warn!("Failed to read {}: {}", manifest_path.display(), e);
                    continue;
                }
            };

            for (marker, framework) in markers.iter() {
                if content.contains(marker) {
                    debug!("Found marker {:?} in {}", marker, manifest);
                    return *framework;
                }
            }
        }

        debug!("No framework marker found in {}", project_root.display());
        UNKNOWN_FRAMEWORK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper function to create a project with the given root files
    fn project(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_detect_express() {
        let dir = project(&[("package.json", r#"{"dependencies": {"express": "^4.18"}}"#)]);
        assert_eq!(FrameworkDetector::detect(dir.path()), "express");
    }

    #[test]
    fn test_detect_nestjs_before_express() {
        // NestJS projects usually pull express in too; the NestJS marker is listed first
        let dir = project(&[(
            "package.json",
            r#"{"dependencies": {"@nestjs/core": "^10.0", "express": "^4.18"}}"#,
        )]);
        assert_eq!(FrameworkDetector::detect(dir.path()), "nestjs");
    }

    #[test]
    fn test_detect_fastapi() {
        let dir = project(&[(
            "pyproject.toml",
            "[project]\ndependencies = [\"fastapi>=0.100\"]",
        )]);
        assert_eq!(FrameworkDetector::detect(dir.path()), "fastapi");
    }

    #[test]
    fn test_detect_spring() {
        let dir = project(&[(
            "pom.xml",
            "<project><parent><artifactId>spring-boot-starter-parent</artifactId></parent></project>",
        )]);
        assert_eq!(FrameworkDetector::detect(dir.path()), "spring");
    }

    #[test]
    fn test_detect_django_from_requirements() {
        let dir = project(&[("requirements.txt", "django>=4.2\ncelery>=5.0")]);
        assert_eq!(FrameworkDetector::detect(dir.path()), "django");
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        let dir = project(&[("Gemfile", "gem 'Rails', '~> 7.1'")]);
        assert_eq!(FrameworkDetector::detect(dir.path()), "rails");
    }

    #[test]
    fn test_detect_axum_from_cargo_manifest() {
        let dir = project(&[("Cargo.toml", "[dependencies]\naxum = \"0.7\"")]);
        assert_eq!(FrameworkDetector::detect(dir.path()), "axum");
    }

    #[test]
    fn test_detect_first_manifest_wins() {
        // package.json precedes go.mod in the marker table
        let dir = project(&[
            ("go.mod", "require github.com/gin-gonic/gin v1.9.1"),
            ("package.json", r#"{"dependencies": {"koa": "^2"}}"#),
        ]);
        assert_eq!(FrameworkDetector::detect(dir.path()), "koa");
    }

    #[test]
    fn test_detect_manifest_without_marker_falls_through() {
        let dir = project(&[
            ("package.json", r#"{"dependencies": {"lodash": "^4"}}"#),
            ("go.mod", "require github.com/labstack/echo/v4 v4.11.0"),
        ]);
        assert_eq!(FrameworkDetector::detect(dir.path()), "echo");
    }

    #[test]
    fn test_detect_unknown() {
        let dir = project(&[]);
        assert_eq!(FrameworkDetector::detect(dir.path()), UNKNOWN_FRAMEWORK);
    }

    #[test]
    fn test_detect_skips_manifest_directory() {
        let dir = project(&[]);
        fs::create_dir(dir.path().join("package.json")).unwrap();
        assert_eq!(FrameworkDetector::detect(dir.path()), UNKNOWN_FRAMEWORK);
    }
}
