pub mod container;
pub mod controller;
pub mod router;
pub mod server;
pub mod view;

pub use container::{load_secrets_file, Container, ContainerConfig};
pub use router::Router;
pub use server::{build_web_router, serve};
