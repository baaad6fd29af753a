use anyhow::{bail, Result};

use crate::domain::{AdviceOutcome, FormInput};

use super::super::view::RECOMMENDATIONS_HEADING;
use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, input: FormInput) -> Result<String> {
        let outcome = self.container.submit_use_case().submit(&input).await;
        self.format_outcome(outcome)
    }

    fn format_outcome(&self, outcome: AdviceOutcome) -> Result<String> {
        match outcome {
            AdviceOutcome::Recommendations { text } => Ok(format!(
                "{RECOMMENDATIONS_HEADING}\n{}\n{text}",
                "=".repeat(RECOMMENDATIONS_HEADING.len())
            )),
            AdviceOutcome::ValidationWarning { message }
            | AdviceOutcome::EmptyResponse { message } => bail!("Warning: {message}"),
            AdviceOutcome::ConfigurationError { message } => {
                bail!("Configuration Error: {message}")
            }
            AdviceOutcome::RemoteFailure { message } => bail!("Could not get advice: {message}"),
        }
    }
}
