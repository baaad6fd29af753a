pub mod ask_controller;
pub mod prompt_controller;
pub mod web_controller;

pub use ask_controller::AskController;
pub use prompt_controller::PromptController;
pub use web_controller::WebState;
