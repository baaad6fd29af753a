use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const MISSING_INPUT_WARNING: &str =
    "Please ensure you have entered your district and a question.";
pub const MISSING_KEY_MESSAGE: &str =
    "Please enter your Gemini API key in the sidebar to begin.";
pub const EMPTY_RESPONSE_WARNING: &str =
    "The assistant returned no advice. Please try rephrasing your question.";

/// Generated advice text, exactly as returned by the generative API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    text: String,
}

impl Advice {
    /// Returns `None` when the text is blank; an empty reply is not advice.
    pub fn from_text(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// What the output panel shows after a submission.
///
/// Every submission ends in exactly one of these; the presentation layer
/// matches on it instead of catching errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdviceOutcome {
    Recommendations { text: String },
    ValidationWarning { message: String },
    ConfigurationError { message: String },
    RemoteFailure { message: String },
    EmptyResponse { message: String },
}

impl AdviceOutcome {
    pub fn recommendations(advice: Advice) -> Self {
        Self::Recommendations {
            text: advice.into_text(),
        }
    }

    pub fn validation_warning(message: impl Into<String>) -> Self {
        Self::ValidationWarning {
            message: message.into(),
        }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn from_result(result: Result<Advice, DomainError>) -> Self {
        match result {
            Ok(advice) => Self::recommendations(advice),
            Err(DomainError::MissingCredential(_)) => {
                Self::configuration_error(MISSING_KEY_MESSAGE)
            }
            Err(DomainError::InvalidInput(msg)) => Self::ValidationWarning { message: msg },
            Err(DomainError::EmptyResponse(_)) => Self::EmptyResponse {
                message: EMPTY_RESPONSE_WARNING.to_string(),
            },
            Err(DomainError::Configuration(msg)) => Self::ConfigurationError { message: msg },
            Err(e) => Self::RemoteFailure { message: e.detail() },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Recommendations { .. } => "recommendations",
            Self::ValidationWarning { .. } => "validation_warning",
            Self::ConfigurationError { .. } => "configuration_error",
            Self::RemoteFailure { .. } => "remote_failure",
            Self::EmptyResponse { .. } => "empty_response",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Recommendations { .. })
    }

    pub fn advice_text(&self) -> Option<&str> {
        match self {
            Self::Recommendations { text } => Some(text),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Recommendations { .. } => None,
            Self::ValidationWarning { message }
            | Self::ConfigurationError { message }
            | Self::RemoteFailure { message }
            | Self::EmptyResponse { message } => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_not_advice() {
        assert!(Advice::from_text("").is_none());
        assert!(Advice::from_text(" \n\t").is_none());
    }

    #[test]
    fn test_advice_text_is_verbatim() {
        let text = "  - Use drip irrigation.\n  Why: reduces diesel pump runtime.\n";
        let advice = Advice::from_text(text).unwrap();
        assert_eq!(advice.text(), text);
    }

    #[test]
    fn test_from_result_maps_every_error_kind() {
        let cases = [
            (DomainError::missing_credential("no key"), "configuration_error"),
            (DomainError::invalid_input("empty"), "validation_warning"),
            (DomainError::remote_call("boom"), "remote_failure"),
            (DomainError::empty_response("nothing"), "empty_response"),
            (DomainError::configuration("bad model"), "configuration_error"),
            (DomainError::internal("oops"), "remote_failure"),
        ];

        for (err, kind) in cases {
            assert_eq!(AdviceOutcome::from_result(Err(err)).kind(), kind);
        }
    }

    #[test]
    fn test_remote_failure_carries_underlying_message() {
        let outcome =
            AdviceOutcome::from_result(Err(DomainError::remote_call("API key not valid")));
        assert_eq!(outcome.message(), Some("API key not valid"));
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let outcome = AdviceOutcome::recommendations(Advice::from_text("- Mulch").unwrap());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "recommendations");
        assert_eq!(json["text"], "- Mulch");
    }
}
