//! Gateway configuration.
//!
//! Precedence: environment (`PROTOAI_*`) > TOML file (`PROTOAI_CONFIG` path, default
//! `config/gateway.toml`) > built-in defaults. The generation token is read from
//! `HUGGING_FACE_TOKEN`; leaving it unset is valid and disables the inference call.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::generation::{DEFAULT_MODEL_URL, DEFAULT_TIMEOUT};

pub const TOKEN_ENV: &str = "HUGGING_FACE_TOKEN";
const CONFIG_PATH_ENV: &str = "PROTOAI_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/gateway.toml";

/// Local front-end dev servers allowed by CORS.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config load: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// | Key / Env | Default | Description |
/// |-----------|---------|-------------|
/// | host / PROTOAI_HOST | 0.0.0.0 | Bind address. |
/// | port / PROTOAI_PORT | 8000 | Bind port. |
/// | model_url / PROTOAI_MODEL_URL | DialoGPT-medium | Inference endpoint. |
/// | generation_timeout_secs / PROTOAI_GENERATION_TIMEOUT_SECS | 30 | Per-call timeout. |
/// | max_idea_chars / PROTOAI_MAX_IDEA_CHARS | 2000 | Longest accepted idea. |
/// | allowed_origins / PROTOAI_ALLOWED_ORIGINS | localhost:3000 pair | Comma separated in env. |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub model_url: String,
    pub generation_timeout_secs: u64,
    pub max_idea_chars: usize,
    pub allowed_origins: Vec<String>,
    /// Bearer token for the inference API. Never serialized.
    #[serde(skip)]
    pub hf_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_url: DEFAULT_MODEL_URL.to_string(),
            generation_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_idea_chars: 2000,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            hf_token: None,
        }
    }
}

impl GatewayConfig {
    /// Load from file and environment (see module docs).
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let env = config::Environment::with_prefix("PROTOAI")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("allowed_origins");

        let mut cfg = Self::build(Some(Path::new(&path)), Some(env))?;
        cfg.hf_token = std::env::var(TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Ok(cfg)
    }

    fn build(file: Option<&Path>, env: Option<config::Environment>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("model_url", defaults.model_url)?
            .set_default("generation_timeout_secs", defaults.generation_timeout_secs)?
            .set_default("max_idea_chars", defaults.max_idea_chars as u64)?
            .set_default("allowed_origins", defaults.allowed_origins)?;

        if let Some(path) = file.filter(|p| p.exists()) {
            builder = builder.add_source(config::File::from(path));
        }
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.generation_timeout_secs == 0 {
            return Err(ConfigError::Invalid("generation_timeout_secs must be > 0".into()));
        }
        if self.max_idea_chars == 0 {
            return Err(ConfigError::Invalid("max_idea_chars must be > 0".into()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}
