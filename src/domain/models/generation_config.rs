use serde::{Deserialize, Serialize};

pub const MIN_TEMPERATURE: f32 = 0.2;
pub const MAX_TEMPERATURE: f32 = 0.4;
pub const MIN_OUTPUT_TOKENS: u32 = 400;
pub const MAX_OUTPUT_TOKENS: u32 = 600;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 400;

/// Decoding parameters sent with every generation request.
///
/// Values are clamped to a narrow, low-temperature band: the advice should be
/// factual and short rather than creative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

impl GenerationConfig {
    pub fn new(temperature: f32, max_output_tokens: u32) -> Self {
        let temperature = if temperature.is_finite() {
            temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
        } else {
            DEFAULT_TEMPERATURE
        };
        Self {
            temperature,
            max_output_tokens: max_output_tokens.clamp(MIN_OUTPUT_TOKENS, MAX_OUTPUT_TOKENS),
        }
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPERATURE, DEFAULT_MAX_OUTPUT_TOKENS)
    }
}

/// One call to the generative-text API: which model, what prompt, how to decode.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    model: String,
    prompt: String,
    config: GenerationConfig,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}
