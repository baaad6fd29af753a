use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::GenerativeClient;
use crate::domain::{
    Advice, AdvisorSettings, ApiKey, DomainError, GenerationRequest, QueryRecord,
    MISSING_KEY_MESSAGE,
};

/// Turns a validated [`QueryRecord`] into advice with one call to the
/// generative API.
pub struct RequestAdviceUseCase {
    client: Arc<dyn GenerativeClient>,
    settings: AdvisorSettings,
}

impl RequestAdviceUseCase {
    pub fn new(client: Arc<dyn GenerativeClient>, settings: AdvisorSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &AdvisorSettings {
        &self.settings
    }

    /// The key a request would use: the per-request key if one was supplied,
    /// otherwise the configured one.
    pub fn resolve_key<'a>(&'a self, per_request: Option<&'a ApiKey>) -> Option<&'a ApiKey> {
        per_request.or(self.settings.api_key())
    }

    pub fn build_prompt(&self, record: &QueryRecord) -> String {
        self.settings.template().build(record)
    }

    pub async fn execute(
        &self,
        record: &QueryRecord,
        per_request_key: Option<&ApiKey>,
    ) -> Result<Advice, DomainError> {
        let api_key = self
            .resolve_key(per_request_key)
            .ok_or_else(|| DomainError::missing_credential(MISSING_KEY_MESSAGE))?;

        if !record.has_question() {
            return Err(DomainError::invalid_input("Please enter a question."));
        }

        info!(
            "Requesting advice from {} ({})",
            self.settings.model(),
            record.summary()
        );

        let prompt = self.build_prompt(record);
        debug!("Prompt:\n{}", prompt);

        let request =
            GenerationRequest::new(self.settings.model(), prompt, *self.settings.generation());

        let start_time = Instant::now();
        let text = self.client.generate(api_key, &request).await;
        let elapsed_ms = start_time.elapsed().as_millis();

        let text = match text {
            Ok(text) => text,
            Err(e) => {
                warn!("Advice request failed after {}ms: {}", elapsed_ms, e);
                return Err(e);
            }
        };

        match Advice::from_text(text) {
            Some(advice) => {
                info!(
                    "Received {} characters of advice in {}ms",
                    advice.text().chars().count(),
                    elapsed_ms
                );
                Ok(advice)
            }
            None => {
                warn!("Generative API returned no text after {}ms", elapsed_ms);
                Err(DomainError::empty_response(
                    "the generative API returned no text",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::ScriptedGenerativeClient;
    use crate::domain::GenerationConfig;

    fn sample_record() -> QueryRecord {
        QueryRecord::new("How to save fuel during irrigation?")
            .with_district("Samastipur")
            .with_crop_stage("Vegetative")
    }

    fn configured_settings() -> AdvisorSettings {
        AdvisorSettings::new("gemini-1.5-flash").with_api_key(ApiKey::parse("configured-key"))
    }

    #[tokio::test]
    async fn test_returns_text_verbatim_after_one_call() {
        let text = "- Use drip irrigation. Why: reduces diesel pump runtime.";
        let client = Arc::new(ScriptedGenerativeClient::with_text(text));
        let use_case = RequestAdviceUseCase::new(client.clone(), configured_settings());

        let advice = use_case.execute(&sample_record(), None).await.unwrap();

        assert_eq!(advice.text(), text);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_call() {
        let client = Arc::new(ScriptedGenerativeClient::with_text("unused"));
        let use_case = RequestAdviceUseCase::new(client.clone(), AdvisorSettings::default());

        let err = use_case.execute(&sample_record(), None).await.unwrap_err();

        assert!(err.is_missing_credential());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_question_makes_no_call() {
        let client = Arc::new(ScriptedGenerativeClient::with_text("unused"));
        let use_case = RequestAdviceUseCase::new(client.clone(), configured_settings());

        let err = use_case
            .execute(&QueryRecord::new(""), None)
            .await
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_per_request_key_wins_over_configured_key() {
        let client = Arc::new(ScriptedGenerativeClient::with_text("- Mulch"));
        let use_case = RequestAdviceUseCase::new(client.clone(), configured_settings());
        let typed = ApiKey::parse("typed-key").unwrap();

        use_case.execute(&sample_record(), Some(&typed)).await.unwrap();

        assert_eq!(client.last_key().as_deref(), Some("typed-key"));
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_response() {
        let client = Arc::new(ScriptedGenerativeClient::with_text("  \n"));
        let use_case = RequestAdviceUseCase::new(client.clone(), configured_settings());

        let err = use_case.execute(&sample_record(), None).await.unwrap_err();

        assert!(err.is_empty_response());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_remote_error_is_propagated_without_retry() {
        let client = Arc::new(ScriptedGenerativeClient::with_error("quota exceeded"));
        let use_case = RequestAdviceUseCase::new(client.clone(), configured_settings());

        let err = use_case.execute(&sample_record(), None).await.unwrap_err();

        assert!(err.is_remote_call());
        assert_eq!(err.detail(), "quota exceeded");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_model_prompt_and_config() {
        let client = Arc::new(ScriptedGenerativeClient::with_text("- Mulch"));
        let settings = configured_settings().with_generation(GenerationConfig::new(0.3, 500));
        let use_case = RequestAdviceUseCase::new(client.clone(), settings);

        use_case.execute(&sample_record(), None).await.unwrap();

        let request = client.last_request().unwrap();
        assert_eq!(request.model(), "gemini-1.5-flash");
        assert!(request.prompt().contains("How to save fuel during irrigation?"));
        assert_eq!(request.config().temperature(), 0.3);
        assert_eq!(request.config().max_output_tokens(), 500);
    }
}
