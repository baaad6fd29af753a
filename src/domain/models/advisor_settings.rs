use super::{ApiKey, GenerationConfig};
use crate::domain::PromptTemplate;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Everything the Advice Requester needs besides the record itself.
///
/// Read once at startup and injected; request handling never consults the
/// environment.
#[derive(Debug, Clone)]
pub struct AdvisorSettings {
    model: String,
    generation: GenerationConfig,
    api_key: Option<ApiKey>,
    template: PromptTemplate,
}

impl AdvisorSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            generation: GenerationConfig::default(),
            api_key: None,
            template: PromptTemplate::default(),
        }
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<ApiKey>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}
