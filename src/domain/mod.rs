//! # Domain Layer
//!
//! Form records, credentials, decoding parameters, outcomes and the prompt
//! template. This layer performs no I/O.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
