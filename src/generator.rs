//! OpenAPI spec generation.

use crate::config::{truncate_chars, Limits};
use crate::context::ApiContext;
use crate::error::Result;
use crate::llm::{GenerationRequest, TextGenerator};
use crate::prompts::OPENAPI_SYSTEM_PROMPT;
use log::{debug, info};

/// Opening fence tags recognised around generated YAML, longest first.
const OPENING_FENCES: &[&str] = &["```yaml", "```yml", "```"];
const CLOSING_FENCE: &str = "```";

/// Builds the user prompt for the spec request.
///
/// When a non-empty `existing_spec` is given, a capped excerpt of it is
/// appended with instructions to keep manual edits and reconcile it with the
/// current code.
pub fn build_openapi_prompt(
    context: &ApiContext,
    existing_spec: Option<&str>,
    limits: &Limits,
) -> String {
    let mut parts = vec![
        format!(
            "Generate an OpenAPI 3.1.1 specification for the project: {}\n",
            context.project_name
        ),
        context.to_prompt_context(),
    ];

    if let Some(existing) = existing_spec.filter(|spec| !spec.is_empty()) {
        parts.push(format!(
            "\n## Existing OpenAPI Spec (update this)\n\
             Below is the current openapi.yaml. Preserve any manually added \
             descriptions, examples, and documentation. Update endpoints and \
             schemas based on the current codebase.\n\n\
             ```yaml\n{}\n```",
            truncate_chars(existing, limits.existing_spec_chars)
        ));
    }

    parts.join("\n")
}

/// Asks the generator for an OpenAPI document describing `context`.
///
/// Exactly one request is made; its failure is returned as is.
///
/// # Arguments
///
/// * `generator` - The text-generation boundary
/// * `model` - Model identifier passed through to the service
/// * `context` - The gathered project context
/// * `existing_spec` - The previously generated spec when updating
/// * `limits` - Truncation caps and the output token budget
///
/// # Returns
///
/// The generated YAML with any surrounding markdown fence removed.
pub fn generate_openapi(
    generator: &dyn TextGenerator,
    model: &str,
    context: &ApiContext,
    existing_spec: Option<&str>,
    limits: &Limits,
) -> Result<String> {
    let request = GenerationRequest {
        model: model.to_string(),
        system: OPENAPI_SYSTEM_PROMPT.to_string(),
        prompt: build_openapi_prompt(context, existing_spec, limits),
        max_tokens: limits.max_output_tokens,
    };

    info!("Calling {} to generate OpenAPI 3.1.1 spec...", model);
    let text = generator.generate(&request)?;
    Ok(strip_yaml_fences(&text))
}

/// Removes one leading ```` ```yaml ````, ```` ```yml ```` or ```` ``` ```` fence
/// and one trailing ```` ``` ```` fence.
///
/// Text without any fence is returned unchanged; stripping is idempotent.
pub fn strip_yaml_fences(text: &str) -> String {
    let trimmed = text.trim();

    let opening = OPENING_FENCES
        .iter()
        .find(|fence| trimmed.starts_with(**fence));
    let has_closing = trimmed.ends_with(CLOSING_FENCE);

    if opening.is_none() && !has_closing {
        return text.to_string();
    }

    let mut body = trimmed;
    if let Some(fence) = opening {
        body = body[fence.len()..].trim();
    }
    if body.ends_with(CLOSING_FENCE) {
        body = body[..body.len() - CLOSING_FENCE.len()].trim();
    }

    debug!("Stripped markdown fence from generated spec");
    body.to_string()
}
