//! Generation parameters forwarded to the model endpoint.

use serde::Serialize;

/// Sampling and length controls, serialized flat into the request body.
///
/// The extended fields (`top_k`, `repetition_penalty`, `min_p`, `top_a`) are
/// accepted by OpenRouter/vLLM-style endpoints and ignored by stricter ones.
/// Defaults favor deterministic extraction over creativity.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub repetition_penalty: f64,
    pub min_p: f64,
    pub top_a: f64,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 1.0,
            top_k: 0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            repetition_penalty: 1.1,
            min_p: 0.0,
            top_a: 0.0,
            max_tokens: 32_000,
        }
    }
}
