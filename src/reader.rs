use crate::config::truncate_chars;
use crate::context::FileEntry;
use crate::scanner::to_slash_path;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads selected source files into prompt-sized [`FileEntry`] values.
///
/// Every file is read whole and truncated to a character cap. Files that cannot
/// be read (permissions, invalid UTF-8, removed mid-scan) are skipped; the batch
/// never fails because of a single file.
pub struct ContentReader<'a> {
    root: &'a Path,
}

impl<'a> ContentReader<'a> {
    /// Creates a reader that labels entries relative to `root`.
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Reads `paths` in order, keeping at most `max_chars` characters of each.
    ///
    /// # Arguments
    ///
    /// * `paths` - Absolute paths under the root, in selection order
    /// * `max_chars` - Character cap applied to each file
    ///
    /// # Returns
    ///
    /// One entry per readable file, in input order, labelled with the
    /// `/`-separated path relative to the root.
    pub fn read_files(&self, paths: &[PathBuf], max_chars: usize) -> Vec<FileEntry> {
        let mut entries = Vec::with_capacity(paths.len());

        for path in paths {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping unreadable file {}: {}", path.display(), e);
                    continue;
                }
            };

            let relative = path.strip_prefix(self.root).unwrap_or(path);
            entries.push(FileEntry::new(
                to_slash_path(relative),
                truncate_chars(&content, max_chars),
            ));
        }

        debug!("Read {} of {} files", entries.len(), paths.len());
        entries
    }

    /// Reads user-specified include files.
    ///
    /// Each path is resolved against the root and labelled exactly as given.
    /// Paths that do not name an existing regular file are skipped.
    pub fn read_includes(&self, includes: &[String], max_chars: usize) -> Vec<FileEntry> {
        let mut entries = Vec::new();

        for include in includes {
            let path = self.root.join(include);
            if !path.is_file() {
                warn!("Include path is not a file, skipping: {}", include);
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(content) => {
                    debug!("Including {}", include);
                    entries.push(FileEntry::new(include.clone(), truncate_chars(&content, max_chars)));
                }
                Err(e) => warn!("Skipping unreadable include {}: {}", include, e),
            }
        }

        entries
    }
}
