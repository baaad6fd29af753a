use async_trait::async_trait;

use crate::domain::{ApiKey, DomainError, GenerationRequest};

/// An interface for sending a single prompt to a hosted generative-text API.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Consumers (e.g. [`crate::application::RequestAdviceUseCase`])
/// remain decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Generate text for `request.prompt()` and return it unmodified.
    ///
    /// A successful call may return an empty string (e.g. the provider blocked
    /// the output); callers decide how to treat that. Transport, auth and quota
    /// failures come back as [`DomainError::RemoteCall`]. Implementations must
    /// not retry.
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: &GenerationRequest,
    ) -> Result<String, DomainError>;
}
