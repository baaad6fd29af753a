mod gemini_client;
mod scripted_generative_client;

pub use gemini_client::*;
pub use scripted_generative_client::*;
