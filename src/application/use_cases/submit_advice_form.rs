use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::RequestAdviceUseCase;
use crate::domain::{AdviceOutcome, DomainError, FormInput, ValidationPolicy, MISSING_KEY_MESSAGE};

/// The submit action of the advice form.
///
/// Checks run in a fixed order: credential, then required fields, then the
/// single API call. The first failing check decides the outcome and nothing
/// after it runs.
pub struct SubmitAdviceFormUseCase {
    request_advice: Arc<RequestAdviceUseCase>,
    policy: ValidationPolicy,
}

impl SubmitAdviceFormUseCase {
    pub fn new(request_advice: Arc<RequestAdviceUseCase>, policy: ValidationPolicy) -> Self {
        Self {
            request_advice,
            policy,
        }
    }

    pub fn has_configured_key(&self) -> bool {
        self.request_advice.settings().has_api_key()
    }

    pub async fn submit(&self, input: &FormInput) -> AdviceOutcome {
        let submission_id = Uuid::new_v4();
        info!("Submission {} received", submission_id);

        let outcome = self.run(input).await;
        info!("Submission {} finished: {}", submission_id, outcome.kind());
        outcome
    }

    async fn run(&self, input: &FormInput) -> AdviceOutcome {
        if self
            .request_advice
            .resolve_key(input.api_key.as_ref())
            .is_none()
        {
            return AdviceOutcome::configuration_error(MISSING_KEY_MESSAGE);
        }

        let record = match self.policy.validate(input) {
            Ok(record) => record,
            Err(e) => return AdviceOutcome::from_result(Err(e)),
        };

        let result = self
            .request_advice
            .execute(&record, input.api_key.as_ref())
            .await;
        AdviceOutcome::from_result(result)
    }

    /// The prompt a submission would send, without calling the API.
    pub fn preview_prompt(&self, input: &FormInput) -> Result<String, DomainError> {
        let record = self.policy.validate(input)?;
        Ok(self.request_advice.build_prompt(&record))
    }
}
