use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::{GenerativeClient, RequestAdviceUseCase, SubmitAdviceFormUseCase};
use crate::connector::adapter::{GeminiClient, ScriptedGenerativeClient, DEFAULT_BASE_URL};
use crate::domain::{
    AdvisorSettings, ApiKey, DomainError, GenerationConfig, ValidationPolicy, DEFAULT_MODEL,
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE,
};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const TEMPERATURE_VAR: &str = "KRISHI_TEMPERATURE";
pub const MAX_OUTPUT_TOKENS_VAR: &str = "KRISHI_MAX_OUTPUT_TOKENS";
pub const TIMEOUT_VAR: &str = "KRISHI_REQUEST_TIMEOUT_SECS";
pub const REQUIRE_CROP_STAGE_VAR: &str = "KRISHI_REQUIRE_CROP_STAGE";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub struct ContainerConfig {
    pub api_key: Option<ApiKey>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
    pub require_crop_stage: bool,
    /// Answer every request with the scripted client instead of calling the
    /// hosted API.
    pub offline: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            require_crop_stage: false,
            offline: false,
        }
    }
}

impl ContainerConfig {
    /// Build from the process environment, falling back to values from an
    /// optional secrets file. Variables already set in the environment win.
    ///
    /// | Variable                      | Default                                      |
    /// |-------------------------------|----------------------------------------------|
    /// | `GEMINI_API_KEY`              | unset                                        |
    /// | `GEMINI_MODEL`                | `gemini-1.5-flash`                           |
    /// | `GEMINI_BASE_URL`             | `https://generativelanguage.googleapis.com`  |
    /// | `KRISHI_TEMPERATURE`          | `0.2`                                        |
    /// | `KRISHI_MAX_OUTPUT_TOKENS`    | `400`                                        |
    /// | `KRISHI_REQUEST_TIMEOUT_SECS` | `60`                                         |
    /// | `KRISHI_REQUIRE_CROP_STAGE`   | `false`                                      |
    pub fn from_env(secrets: &HashMap<String, String>) -> Result<Self, DomainError> {
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .or_else(|| secrets.get(name).cloned())
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_key: get(API_KEY_VAR).as_deref().and_then(ApiKey::parse),
            model: get(MODEL_VAR)
                .map(|m| m.trim().to_string())
                .unwrap_or(defaults.model),
            base_url: get(BASE_URL_VAR)
                .map(|u| u.trim().to_string())
                .unwrap_or(defaults.base_url),
            temperature: parse_var(TEMPERATURE_VAR, get(TEMPERATURE_VAR))?
                .unwrap_or(defaults.temperature),
            max_output_tokens: parse_var(MAX_OUTPUT_TOKENS_VAR, get(MAX_OUTPUT_TOKENS_VAR))?
                .unwrap_or(defaults.max_output_tokens),
            timeout_secs: parse_var(TIMEOUT_VAR, get(TIMEOUT_VAR))?
                .unwrap_or(defaults.timeout_secs),
            require_crop_stage: match get(REQUIRE_CROP_STAGE_VAR) {
                Some(v) => parse_flag(REQUIRE_CROP_STAGE_VAR, &v)?,
                None => defaults.require_crop_stage,
            },
            offline: false,
        })
    }

    /// Apply command-line flags on top of the environment and secrets file.
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        temperature: Option<f32>,
        max_output_tokens: Option<u32>,
        offline: bool,
    ) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(temperature) = temperature {
            self.temperature = temperature;
        }
        if let Some(max_output_tokens) = max_output_tokens {
            self.max_output_tokens = max_output_tokens;
        }
        self.offline = offline;
        self
    }

    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig::new(self.temperature, self.max_output_tokens)
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy::new().with_require_crop_stage(self.require_crop_stage)
    }
}

/// Read `KEY=value` pairs from a secrets file without touching the process
/// environment.
pub fn load_secrets_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("failed to open secrets file {}", path.display()))?;

    let mut secrets = HashMap::new();
    for item in iter {
        let (key, value) =
            item.with_context(|| format!("failed to parse secrets file {}", path.display()))?;
        secrets.insert(key, value);
    }
    Ok(secrets)
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: Option<String>) -> Result<Option<T>, DomainError> {
    match raw {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| DomainError::configuration(format!("{name} has an invalid value"))),
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, DomainError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::configuration(format!(
            "{name} must be true or false"
        ))),
    }
}

pub struct Container {
    request_advice: Arc<RequestAdviceUseCase>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let client: Arc<dyn GenerativeClient> = if config.offline {
            debug!("Using scripted generative client");
            Arc::new(ScriptedGenerativeClient::new())
        } else {
            debug!("Using Gemini client at {}", config.base_url);
            Arc::new(GeminiClient::new(
                config.base_url.as_str(),
                Duration::from_secs(config.timeout_secs),
            ))
        };

        Ok(Self::with_client(config, client))
    }

    /// Wire the use cases around an explicit client.
    pub fn with_client(mut config: ContainerConfig, client: Arc<dyn GenerativeClient>) -> Self {
        // Offline mode needs no real credential.
        if config.offline && config.api_key.is_none() {
            config.api_key = ApiKey::parse("offline");
        }

        let settings = AdvisorSettings::new(config.model.as_str())
            .with_generation(config.generation())
            .with_api_key(config.api_key.clone());

        Self {
            request_advice: Arc::new(RequestAdviceUseCase::new(client, settings)),
            config,
        }
    }

    pub fn submit_use_case(&self) -> SubmitAdviceFormUseCase {
        SubmitAdviceFormUseCase::new(self.request_advice.clone(), self.config.policy())
    }

    pub fn has_configured_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn offline(&self) -> bool {
        self.config.offline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ContainerConfig::from_lookup(|_| None).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.generation(), GenerationConfig::default());
        assert_eq!(config.timeout_secs, 60);
        assert!(!config.require_crop_stage);
    }

    #[test]
    fn test_values_are_read() {
        let config = ContainerConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (MODEL_VAR, "gemini-2.0-flash"),
            (TEMPERATURE_VAR, "0.3"),
            (MAX_OUTPUT_TOKENS_VAR, "600"),
            (TIMEOUT_VAR, "15"),
            (REQUIRE_CROP_STAGE_VAR, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_ref().map(|k| k.expose()), Some("secret"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.generation(), GenerationConfig::new(0.3, 600));
        assert_eq!(config.timeout_secs, 15);
        assert!(config.policy().requires_crop_stage());
    }

    #[test]
    fn test_blank_key_counts_as_unset() {
        let config = ContainerConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_number_is_a_configuration_error() {
        let err = ContainerConfig::from_lookup(lookup_from(&[(TEMPERATURE_VAR, "warm")]))
            .err()
            .unwrap();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn test_invalid_flag_is_a_configuration_error() {
        assert!(ContainerConfig::from_lookup(lookup_from(&[(REQUIRE_CROP_STAGE_VAR, "maybe")])).is_err());
    }

    #[test]
    fn test_flags_override_environment() {
        let config = ContainerConfig::from_lookup(lookup_from(&[
            (MODEL_VAR, "gemini-1.5-pro"),
            (TEMPERATURE_VAR, "0.3"),
            (MAX_OUTPUT_TOKENS_VAR, "500"),
        ]))
        .unwrap()
        .with_overrides(Some("gemini-2.0-flash".to_string()), Some(0.4), None, true);

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.generation(), GenerationConfig::new(0.4, 500));
        assert!(config.offline);
    }

    #[test]
    fn test_absent_flags_keep_environment_values() {
        let config = ContainerConfig::from_lookup(lookup_from(&[
            (MODEL_VAR, "gemini-1.5-pro"),
            (TEMPERATURE_VAR, "0.3"),
        ]))
        .unwrap()
        .with_overrides(None, None, Some(9000), false);

        assert_eq!(config.model, "gemini-1.5-pro");
        // Out-of-range flags are still clamped.
        assert_eq!(config.generation(), GenerationConfig::new(0.3, 600));
        assert!(!config.offline);
    }

    #[test]
    fn test_load_secrets_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "GEMINI_API_KEY=from-file").unwrap();
        writeln!(file, "GEMINI_MODEL=gemini-1.5-pro").unwrap();

        let secrets = load_secrets_file(file.path()).unwrap();
        let config = ContainerConfig::from_lookup(|name| secrets.get(name).cloned()).unwrap();

        assert_eq!(config.api_key.as_ref().map(|k| k.expose()), Some("from-file"));
        assert_eq!(config.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_missing_secrets_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_secrets_file(&dir.path().join("missing.env")).is_err());
    }

    #[test]
    fn test_offline_container_has_a_key() {
        let config = ContainerConfig {
            offline: true,
            ..ContainerConfig::default()
        };
        let container = Container::new(config).unwrap();
        assert!(container.submit_use_case().has_configured_key());
    }
}
