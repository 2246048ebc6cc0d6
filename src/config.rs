//! Size limits shared by every stage of the pipeline.
//!
//! Prompts are built from truncated excerpts of the scanned project. Each
//! truncation and file-count cap lives here so the scan, the prompt builders
//! and the tests all agree on the same numbers.

/// Truncation caps and file-count caps used while gathering context and
/// building prompts.
///
/// All character caps count Unicode scalar values, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Characters kept from each route/schema/middleware/config file
    pub file_chars: usize,
    /// Characters kept from each user-specified `--include` file
    pub include_chars: usize,
    /// Characters kept from each manifest at the project root
    pub manifest_chars: usize,
    /// Characters of the previous spec passed back when updating
    pub existing_spec_chars: usize,
    /// Characters of the generated spec passed to the endpoint-doc prompt
    pub spec_in_docs_chars: usize,
    /// Characters kept from each previously generated endpoint doc
    pub existing_doc_chars: usize,
    /// Maximum number of route/controller files
    pub max_route_files: usize,
    /// Maximum number of schema/DTO files
    pub max_schema_files: usize,
    /// Maximum number of middleware/security files
    pub max_middleware_files: usize,
    /// Maximum number of configuration files
    pub max_config_files: usize,
    /// Directory levels listed in the project structure summary
    pub tree_depth: usize,
    /// Files listed per directory in the project structure summary
    pub tree_files_per_dir: usize,
    /// Output token budget for each text-generation request
    pub max_output_tokens: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            file_chars: 4000,
            include_chars: 4000,
            manifest_chars: 3000,
            existing_spec_chars: 15000,
            spec_in_docs_chars: 20000,
            existing_doc_chars: 3000,
            max_route_files: 30,
            max_schema_files: 30,
            max_middleware_files: 15,
            max_config_files: 10,
            tree_depth: 3,
            tree_files_per_dir: 20,
            max_output_tokens: 16384,
        }
    }
}

/// Returns the prefix of `text` holding at most `max_chars` characters.
///
/// Never splits a multi-byte character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
