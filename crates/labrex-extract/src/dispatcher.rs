//! Structured extraction dispatcher.
//!
//! Stateless request/response: each invocation selects the schema contract,
//! sends the document text with the fixed system prompt, and validates the
//! generation by decoding it into the typed record. Validation failures are
//! retried with a corrective message up to a bounded attempt budget; the
//! schema decode is the enforced correctness gate, not logical accuracy.

use tracing::{info, warn};

use labrex_model::{LabReport, ReportSchema};

use crate::backend::{ChatMessage, ChatRequest, CompletionBackend, ResponseFormat, Usage};
use crate::error::{ExtractError, Result};
use crate::params::GenerationParams;

/// Default retry budget for schema-invalid generations.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Extraction rules handed to the model on every request.
pub const SYSTEM_PROMPT: &str = "\
You are a medical lab report parser. You extract structured data from lab \
reports that have been converted to Markdown or plain text.

Follow these rules:
1. Extract every field the schema defines, including the patient id, the \
project, and all sections with their measured values.
2. An asterisk (*) next to a result marks an out-of-range value. Keep the \
raw result text and set out_of_range accordingly.
3. A comment may follow a measured value. Do not confuse it with the \
reference interval, which looks like \"202.3 - 416.5\" or \"< 0.5\".
4. The birth year and the gender usually appear right after the patient id. \
The gender is printed as (M) or (W).

Include every test present in the document.";

/// Dispatch configuration: model identity, sampling, and the retry budget.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub model: String,
    pub params: GenerationParams,
    pub max_attempts: u32,
}

impl ExtractOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            params: GenerationParams::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Result of a successful extraction, with advisory usage accounting.
#[derive(Debug)]
pub struct Extraction {
    pub report: LabReport,
    pub usage: Usage,
    pub attempts: u32,
}

/// Forwards document text to the completion backend under a schema contract.
#[derive(Debug)]
pub struct Dispatcher<B> {
    backend: B,
    options: ExtractOptions,
}

impl<B: CompletionBackend> Dispatcher<B> {
    /// Creates a dispatcher.
    ///
    /// # Errors
    ///
    /// Fails when the model name is empty or the attempt budget is zero.
    pub fn new(backend: B, options: ExtractOptions) -> Result<Self> {
        if options.model.trim().is_empty() {
            return Err(ExtractError::Config(
                "model name must not be empty".to_string(),
            ));
        }
        if options.max_attempts == 0 {
            return Err(ExtractError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self { backend, options })
    }

    /// Extracts a structured record from raw document text.
    ///
    /// Network and endpoint errors propagate immediately; only
    /// schema-validation failures consume the attempt budget.
    pub fn extract(&self, text: &str, schema: ReportSchema) -> Result<Extraction> {
        let mut messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(text),
        ];
        let mut usage = Usage::default();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let request = ChatRequest {
                model: self.options.model.clone(),
                messages: messages.clone(),
                response_format: ResponseFormat::for_schema(schema),
                params: self.options.params.clone(),
            };

            let completion = self.backend.complete(&request)?;
            if let Some(reported) = completion.usage {
                usage.add(reported);
            }

            match schema.decode(&completion.content) {
                Ok(report) => {
                    info!(
                        schema = schema.label(),
                        attempts = attempt,
                        %usage,
                        "structured extraction completed"
                    );
                    return Ok(Extraction {
                        report,
                        usage,
                        attempts: attempt,
                    });
                }
                Err(error) => {
                    warn!(
                        schema = schema.label(),
                        attempt,
                        %error,
                        "generation did not validate against schema"
                    );
                    if attempt >= self.options.max_attempts {
                        return Err(ExtractError::AttemptsExhausted {
                            attempts: attempt,
                            source: error,
                        });
                    }
                    // Feed the invalid output and the decode error back so
                    // the next attempt can correct it.
                    messages.push(ChatMessage::assistant(completion.content));
                    messages.push(ChatMessage::user(format!(
                        "The previous output did not validate against the {} \
                         schema: {error}. Respond again with a single corrected \
                         JSON object and nothing else.",
                        schema.name()
                    )));
                }
            }
        }
    }
}
