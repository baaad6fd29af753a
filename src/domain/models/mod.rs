mod advice;
mod advisor_settings;
mod api_key;
mod form_input;
mod generation_config;
mod query_record;

pub use advice::*;
pub use advisor_settings::*;
pub use api_key::*;
pub use form_input::*;
pub use generation_config::*;
pub use query_record::*;
