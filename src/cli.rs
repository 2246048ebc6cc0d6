use crate::config::Limits;
use crate::context::gather_api_context;
use crate::endpoint_docs::{generate_endpoint_docs, EndpointDoc};
use crate::error::Error;
use crate::generator::generate_openapi;
use crate::llm::{AnthropicClient, TextGenerator};
use crate::output::OutputLayout;
use crate::validator::validate_openapi_yaml;
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::path::PathBuf;

/// Default model used for both generation requests
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// OpenAPI Synth - Generate an OpenAPI 3.1.1 spec and per-endpoint docs from a project's source code
#[derive(Parser, Debug, Clone)]
#[command(name = "openapi-synth")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the project directory
    #[arg(value_name = "PROJECT_PATH", default_value = ".")]
    pub project_path: PathBuf,

    /// Model used for generation
    #[arg(short = 'm', long = "model", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Extra file to include in the context, relative to the project (repeatable)
    #[arg(short = 'i', long = "include", value_name = "FILE")]
    pub include: Vec<String>,

    /// Print the generated spec and docs instead of writing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// API key for the text-generation service
    #[arg(long = "api-key", env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the text-generation service (e.g. a local gateway)
    #[arg(long = "base-url", env = "ANTHROPIC_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// True if a spec from a previous run was updated
    pub updated: bool,
    /// The generated spec text
    pub spec: String,
    /// True if the spec passed the structural check
    pub spec_valid: bool,
    /// Generated endpoint pages
    pub docs: Vec<EndpointDoc>,
    /// Number of pages written to disk (zero on a dry run)
    pub docs_written: usize,
    pub endpoint_count: usize,
    pub schema_count: usize,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    // Keep the key out of the debug log
    debug!(
        "Parsed arguments: project_path={}, model={}, include={:?}, dry_run={}",
        args.project_path.display(),
        args.model,
        args.include,
        args.dry_run
    );

    if !args.project_path.exists() {
        return Err(Error::InvalidArgument(format!(
            "Project path does not exist: {}",
            args.project_path.display()
        ))
        .into());
    }

    if !args.project_path.is_dir() {
        return Err(Error::InvalidArgument(format!(
            "Project path is not a directory: {}",
            args.project_path.display()
        ))
        .into());
    }

    info!("Project path: {}", args.project_path.display());
    info!("Model: {}", args.model);
    if !args.include.is_empty() {
        info!("Including: {}", args.include.join(", "));
    }
    if args.dry_run {
        info!("Dry run: nothing will be written");
    }

    Ok(args)
}

/// Returns the API key, or [`Error::MissingApiKey`] if none was supplied.
pub fn resolve_api_key(args: &CliArgs) -> std::result::Result<String, Error> {
    args.api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or(Error::MissingApiKey)
}

/// Run the main workflow against the live text-generation service
pub fn run(args: CliArgs) -> Result<()> {
    let api_key = resolve_api_key(&args)?;
    let mut client = AnthropicClient::new(api_key)?;
    if let Some(base_url) = args.base_url.as_deref() {
        info!("Using text-generation service at {}", base_url);
        client = client.with_base_url(base_url);
    }
    execute(&args, &client, &Limits::default())?;
    Ok(())
}

/// Runs the workflow with an explicit generator.
///
/// Scans the project, generates the spec (passing the previous one when
/// updating), checks it, generates the endpoint pages, then prints or writes
/// everything. Both generation requests are attempted once; their failures
/// abort the run. A spec failing the structural check is still written.
pub fn execute(
    args: &CliArgs,
    generator: &dyn TextGenerator,
    limits: &Limits,
) -> Result<RunSummary> {
    let project_root = args
        .project_path
        .canonicalize()
        .with_context(|| format!("Failed to access {}", args.project_path.display()))?;
    let layout = OutputLayout::for_project(&project_root);
    let updated = layout.has_existing_spec();

    let project_name = project_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!(
        "{} OpenAPI spec for {}",
        if updated { "Updating" } else { "Generating" },
        project_name
    );

    // Step 1: Scan the project
    info!("Scanning project for API endpoints, schemas, and routes...");
    let context = gather_api_context(&project_root, &args.include, limits)?;

    if !context.has_api_code {
        warn!("No API-related code detected in this project.");
        warn!("The generated spec may be minimal. Use --include to point at specific files.");
    }

    // Step 2: Generate the spec
    let existing_spec = layout.read_existing_spec()?;
    let spec = generate_openapi(
        generator,
        &args.model,
        &context,
        existing_spec.as_deref(),
        limits,
    )?;

    // Step 3: Check it
    let spec_valid = validate_openapi_yaml(&spec);
    if !spec_valid {
        warn!("Generated YAML may not be valid OpenAPI. Writing anyway.");
    }

    // Step 4: Generate endpoint docs
    let existing_docs = layout.read_existing_docs()?;
    let docs = generate_endpoint_docs(
        generator,
        &args.model,
        &context,
        &spec,
        Some(&existing_docs),
        limits,
    )?;

    // Step 5: Print or write
    let docs_written = if args.dry_run {
        print_dry_run(&spec, &docs);
        0
    } else {
        layout.write_spec(&spec)?;
        info!(
            "{}: {}",
            if updated { "Updated" } else { "Created" },
            layout.spec_path.display()
        );
        let written = layout.write_docs(&docs)?;
        if written > 0 {
            info!(
                "  Endpoint docs: {} files in {}/",
                written,
                layout.endpoints_dir.display()
            );
        }
        written
    };

    info!("  Endpoints detected: {}", context.endpoint_count);
    info!("  Schemas detected: {}", context.schema_count);

    Ok(RunSummary {
        updated,
        spec,
        spec_valid,
        docs,
        docs_written,
        endpoint_count: context.endpoint_count,
        schema_count: context.schema_count,
    })
}

fn print_dry_run(spec: &str, docs: &[EndpointDoc]) {
    println!("Generated openapi.yaml:\n");
    println!("{}", spec);
    if !docs.is_empty() {
        println!("\nGenerated {} endpoint doc(s):\n", docs.len());
        for doc in docs {
            println!("\n--- {} ---", doc.filename);
            println!("{}", doc.content);
        }
    }
}
