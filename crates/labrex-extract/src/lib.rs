pub mod backend;
pub mod dispatcher;
pub mod error;
pub mod params;

pub use backend::{
    ChatCompletion, ChatMessage, ChatRequest, CompletionBackend, OpenAiBackend, ResponseFormat,
    Usage,
};
pub use dispatcher::{DEFAULT_MAX_ATTEMPTS, Dispatcher, ExtractOptions, Extraction, SYSTEM_PROMPT};
pub use error::{ExtractError, Result};
pub use params::GenerationParams;
