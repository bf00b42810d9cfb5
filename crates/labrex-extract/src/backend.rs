//! Chat-completions backend: the wire types and the reqwest implementation.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use labrex_model::ReportSchema;

use crate::error::{ExtractError, Result};
use crate::params::GenerationParams;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("labrex/", env!("CARGO_PKG_VERSION"));

/// Maximum error-body length carried into error values and logs.
const MAX_ERROR_BODY: usize = 600;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Structured-output contract attached to a request.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub json_schema: JsonSchemaSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaSpec {
    pub name: &'static str,
    pub strict: bool,
    pub schema: Value,
}

impl ResponseFormat {
    /// Wrap a report schema as the output constraint of the request.
    pub fn for_schema(schema: ReportSchema) -> Self {
        Self {
            kind: "json_schema",
            json_schema: JsonSchemaSpec {
                name: schema.name(),
                strict: true,
                schema: schema.json_schema(),
            },
        }
    }
}

/// One stateless request to the structured-generation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
    #[serde(flatten)]
    pub params: GenerationParams,
}

/// Token accounting reported by the endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl Usage {
    pub fn add(&mut self, other: Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} prompt + {} completion = {} tokens",
            self.prompt_tokens, self.completion_tokens, self.total_tokens
        )
    }
}

/// A completed generation.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: Option<Usage>,
}

/// Seam between the dispatcher and the model endpoint.
///
/// Blocking and stateless: each call is a single request/response cycle.
pub trait CompletionBackend {
    fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion>;
}

/// Backend for OpenAI-compatible endpoints (`{base_url}/chat/completions`).
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiBackend {
    /// Creates a backend for the given base URL with an optional credential.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ExtractError::Config("base URL must not be empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ExtractError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl CompletionBackend for OpenAiBackend {
    fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(%url, model = %request.model, "sending chat completion request");

        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let api: ApiResponse = response.json()?;
        let content = api
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ExtractError::EmptyResponse)?;

        Ok(ChatCompletion {
            content,
            usage: api.usage,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((boundary, _)) => format!("{}…", &body[..boundary]),
        None => body.to_string(),
    }
}
