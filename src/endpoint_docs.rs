//! Per-endpoint documentation generation.
//!
//! The second generation request returns every endpoint page in one response,
//! each introduced by a `--- FILE: <name>.md ---` delimiter line. This module
//! builds that request and splits the response back into named documents.

use crate::config::{truncate_chars, Limits};
use crate::context::ApiContext;
use crate::error::Result;
use crate::llm::{GenerationRequest, TextGenerator};
use crate::prompts::ENDPOINT_DOC_SYSTEM_PROMPT;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static FILE_DELIMITER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"---\s*FILE:\s*(.+?\.md)\s*---").expect("file delimiter regex should be valid")
});

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9-]").expect("slug regex should be valid"));

/// A generated endpoint page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDoc {
    /// File name taken from the delimiter, e.g. `get-api-users.md`
    pub filename: String,
    /// Markdown body, trimmed
    pub content: String,
}

/// Builds the file name stem for an endpoint.
///
/// `GET /api/pulse/forms/{formId}` becomes `get-api-pulse-forms-formid`.
/// The root path yields a bare `get-`.
pub fn endpoint_slug(method: &str, path: &str) -> String {
    let slug = path
        .trim_matches('/')
        .replace('/', "-")
        .replace(['{', '}'], "");
    let slug = NON_SLUG_CHARS.replace_all(&slug, "").to_lowercase();
    format!("{}-{}", method.to_lowercase(), slug)
}

/// Builds the user prompt for the endpoint documentation request.
pub fn build_endpoint_docs_prompt(
    context: &ApiContext,
    openapi_yaml: &str,
    existing_docs: Option<&BTreeMap<String, String>>,
    limits: &Limits,
) -> String {
    let mut parts = vec![
        "Generate comprehensive per-endpoint documentation for these API endpoints.\n\n".to_string(),
        "## OpenAPI Specification\n```yaml\n".to_string(),
        truncate_chars(openapi_yaml, limits.spec_in_docs_chars).to_string(),
        "\n```\n\n".to_string(),
        "## Source Code Context\n".to_string(),
        context.to_prompt_context(),
    ];

    if let Some(docs) = existing_docs.filter(|docs| !docs.is_empty()) {
        parts.push("\n## Existing Endpoint Docs (preserve manual additions)\n".to_string());
        for (filename, content) in docs {
            parts.push(format!(
                "\n--- EXISTING: {} ---\n{}\n",
                filename,
                truncate_chars(content, limits.existing_doc_chars)
            ));
        }
    }

    parts.join("\n")
}

/// Asks the generator for one markdown page per endpoint in `openapi_yaml`.
///
/// # Arguments
///
/// * `generator` - The text-generation boundary
/// * `model` - Model identifier passed through to the service
/// * `context` - The gathered project context
/// * `openapi_yaml` - The spec produced by the first request
/// * `existing_docs` - Previously generated pages by file name, when updating
/// * `limits` - Truncation caps and the output token budget
///
/// # Errors
///
/// Returns the generator's error. A response that cannot be split into pages
/// is not an error; it yields fewer (possibly zero) documents.
pub fn generate_endpoint_docs(
    generator: &dyn TextGenerator,
    model: &str,
    context: &ApiContext,
    openapi_yaml: &str,
    existing_docs: Option<&BTreeMap<String, String>>,
    limits: &Limits,
) -> Result<Vec<EndpointDoc>> {
    let request = GenerationRequest {
        model: model.to_string(),
        system: ENDPOINT_DOC_SYSTEM_PROMPT.to_string(),
        prompt: build_endpoint_docs_prompt(context, openapi_yaml, existing_docs, limits),
        max_tokens: limits.max_output_tokens,
    };

    info!("Calling {} to generate endpoint documentation...", model);
    let text = generator.generate(&request)?;
    Ok(parse_endpoint_docs(&text))
}

/// Splits a delimited multi-document response into pages.
///
/// Text before the first delimiter is discarded. Each delimiter's file name
/// owns the text up to the next delimiter. Pages with an empty name or empty
/// body are dropped, so a trailing delimiter with nothing after it produces
/// nothing.
pub fn parse_endpoint_docs(text: &str) -> Vec<EndpointDoc> {
    let delimiters: Vec<(usize, usize, &str)> = FILE_DELIMITER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let filename = caps.get(1)?;
            Some((whole.start(), whole.end(), filename.as_str()))
        })
        .collect();

    let mut docs = Vec::with_capacity(delimiters.len());

    for (index, (_, body_start, filename)) in delimiters.iter().enumerate() {
        let body_end = delimiters
            .get(index + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(text.len());

        let filename = filename.trim();
        let content = text[*body_start..body_end].trim();

        if filename.is_empty() || content.is_empty() {
            debug!("Dropping incomplete endpoint doc {:?}", filename);
            continue;
        }

        docs.push(EndpointDoc {
            filename: filename.to_string(),
            content: content.to_string(),
        });
    }

    debug!("Parsed {} endpoint docs", docs.len());
    docs
}
