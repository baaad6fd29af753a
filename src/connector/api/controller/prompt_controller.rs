use anyhow::Result;

use crate::domain::FormInput;

use super::super::Container;

/// Shows the prompt a submission would send, without calling the API.
pub struct PromptController<'a> {
    container: &'a Container,
}

impl<'a> PromptController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn prompt(&self, input: FormInput) -> Result<String> {
        let prompt = self.container.submit_use_case().preview_prompt(&input)?;
        Ok(prompt)
    }
}
