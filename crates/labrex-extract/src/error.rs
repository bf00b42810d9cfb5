use thiserror::Error;

/// Errors that can occur while dispatching a structured extraction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// Invalid connection or dispatch configuration.
    #[error("invalid extraction configuration: {0}")]
    Config(String),

    /// The HTTP request to the model endpoint failed.
    #[error("request to model endpoint failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status (including rejected
    /// credentials).
    #[error("model endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The completion carried no message content.
    #[error("model response contained no content")]
    EmptyResponse,

    /// The retry budget ran out without a schema-valid generation.
    #[error("no schema-valid output after {attempts} attempts: {source}")]
    AttemptsExhausted {
        attempts: u32,
        #[source]
        source: labrex_model::ModelError,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
