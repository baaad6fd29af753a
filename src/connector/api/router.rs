use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, PromptController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    prompt_controller: PromptController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            prompt_controller: PromptController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { query } => self.ask_controller.ask(query.into_form_input()).await,
            Commands::Prompt { query } => self.prompt_controller.prompt(query.into_form_input()),
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}
