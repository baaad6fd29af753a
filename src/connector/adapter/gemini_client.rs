use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::GenerativeClient;
use crate::domain::{ApiKey, DomainError, GenerationRequest};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODELS_PATH: &str = "/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    generation_config: ApiGenerationConfig,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    role: &'a str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Minimal subset of the `generateContent` response we care about.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// HTTP client for the Gemini `generateContent` REST operation.
///
/// Implements [`GenerativeClient`] so the use cases stay decoupled from
/// transport and serialization details.
///
/// The key travels in the `x-goog-api-key` header, never in the URL, so it
/// cannot surface in transport error messages. A blocked prompt or a
/// candidate without parts yields an empty string rather than an error.
pub struct GeminiClient {
    client: reqwest::Client,
    /// Base URL without trailing slash (e.g. `https://generativelanguage.googleapis.com`).
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> Result<String, DomainError> {
        let model = model.trim().trim_start_matches("models/");
        if model.is_empty() || model.contains('/') {
            return Err(DomainError::configuration(format!(
                "invalid model name {model:?}"
            )));
        }
        Ok(format!(
            "{}{MODELS_PATH}/{model}:generateContent",
            self.base_url
        ))
    }

    fn extract_text(response: ApiResponse) -> String {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            warn!("GeminiClient: prompt blocked ({reason})");
        }

        let Some(candidate) = response.candidates.into_iter().next() else {
            return String::new();
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            debug!("GeminiClient: finish reason {reason}");
        }

        candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    fn error_message(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .map(|b| b.error.message)
            .filter(|m| !m.trim().is_empty())
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: &GenerationRequest,
    ) -> Result<String, DomainError> {
        let url = self.endpoint(request.model())?;

        let body = ApiRequest {
            contents: vec![ApiContent {
                role: "user",
                parts: vec![ApiPart {
                    text: request.prompt(),
                }],
            }],
            generation_config: ApiGenerationConfig {
                temperature: request.config().temperature(),
                max_output_tokens: request.config().max_output_tokens(),
            },
        };

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::remote_call("Gemini API request timed out")
                } else {
                    DomainError::remote_call(format!("Gemini API request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(match Self::error_message(&body) {
                Some(message) => {
                    DomainError::remote_call(format!("Gemini API returned {status}: {message}"))
                }
                None => DomainError::remote_call(format!("Gemini API returned {status}")),
            });
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::remote_call(format!("failed to parse Gemini API response: {e}"))
        })?;

        Ok(Self::extract_text(api_response))
    }
}
