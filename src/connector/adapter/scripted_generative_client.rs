use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::GenerativeClient;
use crate::domain::{ApiKey, DomainError, GenerationRequest};

pub const OFFLINE_REPLY: &str = "\
- Irrigate in the early morning or evening.
  Why: less water evaporates, so the diesel pump runs for a shorter time.
- Service the pump and check the pipes for leaks.
  Why: a well-tuned engine and tight pipes use noticeably less fuel per hour.
- Mulch the field with crop residue.
  Why: the soil stays moist longer, so you need fewer irrigation rounds.";

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Error(String),
}

/// In-process [`GenerativeClient`] that answers every request with a fixed
/// reply and records what it was asked.
///
/// Used for offline demos and for testing everything above the HTTP adapter.
pub struct ScriptedGenerativeClient {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
    last_key: Mutex<Option<String>>,
}

impl ScriptedGenerativeClient {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            last_key: Mutex::new(None),
        }
    }

    pub fn new() -> Self {
        Self::with_text(OFFLINE_REPLY)
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    /// Succeeds with no text, like a provider that blocked its output.
    pub fn empty() -> Self {
        Self::with_text("")
    }

    pub fn with_error(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Error(message.into()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }

    pub fn last_key(&self) -> Option<String> {
        self.last_key.lock().ok().and_then(|k| k.clone())
    }
}

impl Default for ScriptedGenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeClient for ScriptedGenerativeClient {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: &GenerationRequest,
    ) -> Result<String, DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Scripted client call #{} for model {} ({} prompt chars)",
            call,
            request.model(),
            request.prompt().len()
        );

        if let Ok(mut slot) = self.last_request.lock() {
            *slot = Some(request.clone());
        }
        if let Ok(mut slot) = self.last_key.lock() {
            *slot = Some(api_key.expose().to_string());
        }

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Error(message) => Err(DomainError::remote_call(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GenerationConfig;

    fn request() -> GenerationRequest {
        GenerationRequest::new("test-model", "prompt", GenerationConfig::default())
    }

    #[tokio::test]
    async fn test_counts_calls_and_records_request() {
        let client = ScriptedGenerativeClient::with_text("hello");
        let key = ApiKey::parse("k").unwrap();

        assert_eq!(client.generate(&key, &request()).await.unwrap(), "hello");
        assert_eq!(client.generate(&key, &request()).await.unwrap(), "hello");

        assert_eq!(client.call_count(), 2);
        assert_eq!(client.last_request().unwrap().model(), "test-model");
        assert_eq!(client.last_key().as_deref(), Some("k"));
    }

    #[tokio::test]
    async fn test_error_reply() {
        let client = ScriptedGenerativeClient::with_error("network down");
        let key = ApiKey::parse("k").unwrap();

        let err = client.generate(&key, &request()).await.unwrap_err();
        assert!(err.is_remote_call());
    }

    #[test]
    fn test_default_reply_is_offline_advice() {
        assert!(matches!(ScriptedGenerativeClient::new().reply, Reply::Text(ref t) if t == OFFLINE_REPLY));
    }
}
