use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::llm::{LLMConfig, LLMProvider};
use crate::video::youtube::{VideoSearchConfig, SAFE_SEARCH};

/// Environment variable for the video search key
pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Configuration for the MediAI assistant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generative-text service settings
    pub llm: LLMConfig,

    /// Video search settings
    pub video: VideoSearchConfig,

    /// HTTP API settings
    pub server: ServerConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Idle seconds before a session is dropped
    pub session_ttl_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            session_ttl_seconds: 30 * 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for this crate when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration: explicit file, then well-known locations, then
    /// defaults; environment variables are applied on top and the result is
    /// validated. Missing API keys are fatal.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_default_locations()?,
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    fn from_default_locations() -> Result<Self, ConfigError> {
        let config_paths = [
            "mediai.toml",
            "config/mediai.toml",
            "/etc/mediai/config.toml",
        ];

        for path in config_paths.iter().map(Path::new) {
            if path.is_file() {
                return Self::from_file(path);
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Override settings from environment variables. `lookup` is injected so
    /// tests need not touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("MEDIAI_LLM_PROVIDER") {
            match provider.to_lowercase().as_str() {
                "gemini" => self.set_provider(LLMProvider::Gemini),
                "openai" => self.set_provider(LLMProvider::OpenAI),
                other => tracing::warn!("Unknown MEDIAI_LLM_PROVIDER '{}', keeping {:?}", other, self.llm.provider),
            }
        }

        if let Some(model) = lookup("MEDIAI_LLM_MODEL") {
            self.llm.model = model;
        }

        if let Some(key) = lookup(self.llm.provider.api_key_var()) {
            self.llm.api_key = Some(key);
        }

        if let Some(key) = lookup(YOUTUBE_API_KEY_VAR) {
            self.video.api_key = Some(key);
        }

        if let Some(port) = lookup("MEDIAI_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid MEDIAI_PORT '{}'", port),
            }
        }

        if let Some(level) = lookup("MEDIAI_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    fn set_provider(&mut self, provider: LLMProvider) {
        if self.llm.provider != provider {
            self.llm.provider = provider;
            self.llm.model = provider.default_model().to_string();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !has_value(self.llm.api_key.as_deref()) {
            return Err(ConfigError::MissingSecret(
                self.llm.provider.api_key_var().to_string(),
            ));
        }

        if !has_value(self.video.api_key.as_deref()) {
            return Err(ConfigError::MissingSecret(YOUTUBE_API_KEY_VAR.to_string()));
        }

        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must not be empty".to_string()));
        }

        if self.llm.timeout_seconds == 0 || self.video.timeout_seconds == 0 {
            return Err(ConfigError::Invalid("timeouts must be greater than 0".to_string()));
        }

        if self.server.session_ttl_seconds == 0 {
            return Err(ConfigError::Invalid(
                "server.session_ttl_seconds must be greater than 0".to_string(),
            ));
        }

        if self.video.max_results == 0 {
            return Err(ConfigError::Invalid("video.max_results must be greater than 0".to_string()));
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "MediAI Configuration:\n\
            - LLM Provider: {:?}\n\
            - Model: {}\n\
            - Video results per lookup: {}\n\
            - Safe search: {}\n\
            - Listen: {}:{}",
            self.llm.provider,
            self.llm.model,
            self.video.max_results,
            SAFE_SEARCH,
            self.server.host,
            self.server.port,
        )
    }
}

fn has_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_provider(mut self, provider: LLMProvider) -> Self {
        self.config.set_provider(provider);
        self
    }

    pub fn with_llm_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.llm.api_key = Some(key.into());
        self
    }

    pub fn with_video_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.video.api_key = Some(key.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
