//! Domain services: pure transformations over domain models.

mod prompt_template;

pub use prompt_template::*;
