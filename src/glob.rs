//! Glob patterns compiled to anchored regular expressions.
//!
//! Patterns are matched against project-relative paths using `/` as the
//! separator regardless of platform. Supported syntax:
//!
//! - `*` matches any run of characters within one path component
//! - `?` matches a single character within one path component
//! - `**/` matches zero or more leading directories
//! - a trailing `**` matches everything below the preceding directory
//!
//! Matching is case-sensitive, so pattern tables list case variants
//! explicitly (`*controller*` and `*Controller*`).

use anyhow::{Context, Result};
use regex::Regex;

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compiles a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the translated regular expression fails to compile.
    pub fn new(pattern: &str) -> Result<Self> {
        let translated = Self::to_regex(pattern);
        let regex = Regex::new(&translated)
            .with_context(|| format!("Invalid glob pattern: {}", pattern))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the `/`-separated relative path matches the pattern.
    pub fn matches(&self, relative_path: &str) -> bool {
        self.regex.is_match(relative_path)
    }

    fn to_regex(pattern: &str) -> String {
        let components: Vec<&str> = pattern.split('/').collect();
        let last = components.len() - 1;

        let mut regex = String::with_capacity(pattern.len() * 2 + 2);
        regex.push('^');

        for (index, component) in components.iter().enumerate() {
            if *component == "**" {
                if index == last {
                    regex.push_str(".+");
                } else {
                    regex.push_str("(?:[^/]+/)*");
                }
                continue;
            }

            for ch in component.chars() {
                match ch {
                    '*' => regex.push_str("[^/]*"),
                    '?' => regex.push_str("[^/]"),
                    other => regex.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
                }
            }

            if index != last {
                regex.push('/');
            }
        }

        regex.push('$');
        regex
    }
}
