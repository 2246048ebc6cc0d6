//! OpenAPI Synth - LLM-assisted OpenAPI documentation for existing web projects.
//!
//! This library scans a project's source tree, guesses its web framework from
//! the package manifests, collects the files most likely to define routes,
//! schemas, middleware and configuration, and hands that context to a
//! text-generation service that writes an OpenAPI 3.1.1 document and one
//! markdown page per endpoint.
//!
//! # Supported Frameworks
//!
//! Detection and file selection know about Spring, NestJS, Express, Fastify,
//! Koa, Hono, Next.js, FastAPI, Django, Flask, Gin, Echo, Fiber, Rails, Axum and
//! Actix-Web. Unknown projects fall back to generic file patterns.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Walks the project once, skipping dependency and build directories
//! 2. [`detector`] - Detects the framework from manifest markers
//! 3. [`selector`] - Picks route/schema/middleware/config files by glob pattern
//! 4. [`reader`] - Reads selected files with a per-file character cap
//! 5. [`context`] - Aggregates everything into an [`context::ApiContext`] and renders it
//! 6. [`counter`] - Heuristic endpoint and schema counts
//! 7. [`generator`] - Requests the OpenAPI document
//! 8. [`endpoint_docs`] - Requests and splits the per-endpoint pages
//! 9. [`validator`] - Structural check of the generated document
//! 10. [`output`] - Reads previous results and writes new ones
//!
//! The text-generation service sits behind [`llm::TextGenerator`], so every
//! step above can be exercised without a network.
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_synth::{
//!     config::Limits,
//!     context::gather_api_context,
//!     endpoint_docs::generate_endpoint_docs,
//!     generator::generate_openapi,
//!     llm::AnthropicClient,
//!     validator::validate_openapi_yaml,
//! };
//! use std::path::Path;
//!
//! let limits = Limits::default();
//! let context = gather_api_context(Path::new("./my-project"), &[], &limits).unwrap();
//! println!("~{} endpoints, ~{} schemas", context.endpoint_count, context.schema_count);
//!
//! let client = AnthropicClient::new("sk-...").unwrap();
//! let model = "claude-sonnet-4-20250514";
//! let spec = generate_openapi(&client, model, &context, None, &limits).unwrap();
//! if !validate_openapi_yaml(&spec) {
//!     eprintln!("spec may not be valid OpenAPI");
//! }
//! let docs = generate_endpoint_docs(&client, model, &context, &spec, None, &limits).unwrap();
//! println!("{} endpoint pages", docs.len());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod cli;
pub mod config;
pub mod context;
pub mod counter;
pub mod detector;
pub mod endpoint_docs;
pub mod error;
pub mod generator;
pub mod glob;
pub mod llm;
pub mod output;
pub mod patterns;
pub mod prompts;
pub mod reader;
pub mod scanner;
pub mod selector;
pub mod tree;
pub mod validator;
