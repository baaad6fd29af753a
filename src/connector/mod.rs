//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Generative-text clients (Gemini over HTTPS, scripted in-process fake)
//! - The web form surface and the controllers behind the CLI

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
