//! Boundary to the external text-generation service.
//!
//! The drivers only ever see [`TextGenerator`]: a prompt, a system instruction
//! and a model go in, generated text comes out. [`AnthropicClient`] is the live
//! implementation; tests substitute a scripted one.

use crate::error::{Error, Result};
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Model identifier (e.g. `"claude-sonnet-4-20250514"`)
    pub model: String,
    /// Fixed, role-specific system instruction
    pub system: String,
    /// The user message
    pub prompt: String,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

/// Generates text for a request.
///
/// Implementations make exactly one attempt per call; retries, if any, are the
/// caller's business.
pub trait TextGenerator {
    /// Returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate limit, ...).
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Live [`TextGenerator`] backed by the Anthropic messages API.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl AnthropicClient {
    /// Creates a client authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::from_client(client, api_key))
    }

    fn from_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: format!("{}{}", ANTHROPIC_BASE_URL, MESSAGES_PATH),
        }
    }

    /// Sends requests to `base_url` instead of the public API.
    ///
    /// `http://localhost:8080/` targets `http://localhost:8080/v1/messages`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.endpoint = format!("{}{}", base_url.trim_end_matches('/'), MESSAGES_PATH);
        self
    }
}

impl TextGenerator for AnthropicClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        debug!(
            "Sending {} prompt characters to {}",
            request.prompt.chars().count(),
            request.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body(request))
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        parse_response(status, &body)
    }
}

fn request_body(request: &GenerationRequest) -> MessagesRequest<'_> {
    MessagesRequest {
        model: &request.model,
        max_tokens: request.max_tokens,
        system: &request.system,
        messages: vec![Message {
            role: "user",
            content: &request.prompt,
        }],
    }
}

/// Extracts the text of the first content block, or maps the error body.
fn parse_response(status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());
        return Err(Error::Api { status, message });
    }

    let response: MessagesResponse = serde_json::from_str(body)?;
    let text = response
        .content
        .into_iter()
        .next()
        .map(|block| block.text)
        .unwrap_or_default();

    debug!("Received {} characters", text.chars().count());
    Ok(text)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answers one HTTP request with `status` and a JSON `body`, returning the
    /// raw request text once the exchange is done.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut data = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                data.extend_from_slice(&chunk[..n]);
                if let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&data[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|value| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if data.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&data).into_owned()
        });

        (base_url, handle)
    }

    fn local_client(base_url: &str) -> AnthropicClient {
        let client = Client::builder().no_proxy().build().unwrap();
        AnthropicClient::from_client(client, "test-key").with_base_url(base_url)
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            model: "claude-sonnet-4-20250514".to_string(),
            system: "You are an OpenAPI specification expert.".to_string(),
            prompt: "Generate a spec".to_string(),
            max_tokens: 16384,
        }
    }

    #[test]
    fn test_request_body_shape() {
        let req = request();
        let json = serde_json::to_value(request_body(&req)).unwrap();

        assert_eq!(json["model"], "claude-sonnet-4-20250514");
        assert_eq!(json["max_tokens"], 16384);
        assert_eq!(json["system"], "You are an OpenAPI specification expert.");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Generate a spec");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_default_and_overridden_endpoint() {
        let client = AnthropicClient::new("k").unwrap();
        assert_eq!(client.endpoint, "https://api.anthropic.com/v1/messages");

        let client = client.with_base_url("http://localhost:8080/");
        assert_eq!(client.endpoint, "http://localhost:8080/v1/messages");
    }

    #[test]
    fn test_generate_posts_messages_request() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"content":[{"type":"text","text":"openapi: 3.1.1"}]}"#,
        );

        let text = local_client(&base_url).generate(&request()).unwrap();
        let raw = server.join().unwrap();

        assert_eq!(text, "openapi: 3.1.1");
        assert!(raw.starts_with("POST /v1/messages HTTP/1.1"));
        let lowered = raw.to_lowercase();
        assert!(lowered.contains("x-api-key: test-key"));
        assert!(lowered.contains("anthropic-version: 2023-06-01"));
        assert!(raw.contains(r#""model":"claude-sonnet-4-20250514""#));
        assert!(raw.contains(r#""content":"Generate a spec""#));
    }

    #[test]
    fn test_generate_maps_error_status() {
        let (base_url, server) = serve_once(
            "429 Too Many Requests",
            r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#,
        );

        let result = local_client(&base_url).generate(&request());
        server.join().unwrap();

        match result {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "slow down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_takes_first_block() {
        let body = r#"{"content":[{"type":"text","text":"openapi: 3.1.1"},{"type":"text","text":"ignored"}]}"#;
        assert_eq!(parse_response(200, body).unwrap(), "openapi: 3.1.1");
    }

    #[test]
    fn test_parse_response_empty_content() {
        assert_eq!(parse_response(200, r#"{"content":[]}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_response_api_error() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        match parse_response(401, body) {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid x-api-key");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_undecodable_error_body() {
        match parse_response(502, "Bad Gateway") {
            Err(Error::Api { message, .. }) => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_malformed_success_body() {
        assert!(matches!(
            parse_response(200, "not json"),
            Err(Error::SerializationError(_))
        ));
    }

    #[test]
    fn test_scripted_generator_replays_in_order() {
        let generator = testing::ScriptedGenerator::new(&["first", "second"]);
        assert_eq!(generator.generate(&request()).unwrap(), "first");
        assert_eq!(generator.generate(&request()).unwrap(), "second");
        assert!(generator.generate(&request()).is_err());
        assert_eq!(generator.requests.borrow().len(), 3);
    }
}
