pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{GenerativeClient, RequestAdviceUseCase, SubmitAdviceFormUseCase};

pub use cli::{Commands, QueryArgs};

pub use connector::{
    build_web_router, load_secrets_file, serve, Container, ContainerConfig, GeminiClient, Router,
    ScriptedGenerativeClient,
};

pub use domain::{
    Advice, AdviceOutcome, AdvisorSettings, ApiKey, DomainError, FormInput, GenerationConfig,
    GenerationRequest, PromptTemplate, QueryRecord, ValidationPolicy,
};
