//! OpenAPI Synth - Command-line tool for generating OpenAPI documentation with an LLM.
//!
//! This binary scans a web project, gathers its routes, schemas, middleware and
//! configuration, and asks a text-generation service to write an OpenAPI 3.1.1
//! specification plus one markdown page per endpoint. Results are written to
//! `.openapi/openapi.yaml` and `.openapi/endpoints/` in the project.
//!
//! # Usage
//!
//! ```bash
//! openapi-synth [OPTIONS] [PROJECT_PATH]
//! ```
//!
//! # Examples
//!
//! Generate (or update) the spec for the current directory:
//! ```bash
//! ANTHROPIC_API_KEY=... openapi-synth
//! ```
//!
//! Add extra context and preview without writing:
//! ```bash
//! openapi-synth ./my-api -i docs/auth.md --dry-run
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! openapi-synth ./my-api -v
//! ```

mod cli;
mod config;
mod context;
mod counter;
mod detector;
mod endpoint_docs;
mod error;
mod generator;
mod glob;
mod llm;
mod output;
mod patterns;
mod prompts;
mod reader;
mod scanner;
mod selector;
mod tree;
mod validator;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse once to read the verbose flag, then validate after the logger is up
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI Synth starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("OpenAPI generation completed successfully");

    Ok(())
}
