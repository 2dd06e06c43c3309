//! Layered configuration for the generation pipeline.
//!
//! Values come from, in increasing priority:
//!
//! 1. Built-in defaults
//! 2. `$CONFIG_DIR/sheetcraft/config.toml` (or an explicit file)
//! 3. `SHEETCRAFT_*` environment variables, e.g. `SHEETCRAFT_RELAY_BASE_URL`

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::Deserialize;
use sheetcraft_core::GenerationMode;
use sheetcraft_error::{ConfigError, SheetcraftResult};
use sheetcraft_transport::{
    DEFAULT_API_BASE, DEFAULT_API_KEY_ENV, DIRECT_TEMPERATURE, FailoverTransport, GeminiClient,
    RelayClient,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "SHEETCRAFT";

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
#[serde(default)]
pub struct SheetcraftConfig {
    /// Base URL of the same-origin relay; `None` disables the relay path
    relay_base_url: Option<String>,
    /// Whether to try the relay before the direct path
    use_relay: bool,
    /// Base URL of the generative-language API
    api_base_url: String,
    /// Environment variable holding the API key
    api_key_env: String,
    /// Sampling temperature for direct requests
    temperature: f32,
    /// Per-request timeout in seconds
    request_timeout_secs: u64,
    /// Mode used when a request does not name one
    default_mode: GenerationMode,
    /// TOML file of custom prompt templates
    templates_file: Option<PathBuf>,
}

impl Default for SheetcraftConfig {
    fn default() -> Self {
        Self {
            relay_base_url: None,
            use_relay: true,
            api_base_url: DEFAULT_API_BASE.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: DIRECT_TEMPERATURE,
            request_timeout_secs: 60,
            default_mode: GenerationMode::Ai,
            templates_file: None,
        }
    }
}

impl SheetcraftConfig {
    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sheetcraft").join("config.toml"))
    }

    /// Load from the default file (if present) and the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a source cannot be read or a value has
    /// the wrong type or range.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::build(Config::builder(), None),
        }
    }

    /// Load from `path` (optional on disk) and the process environment.
    ///
    /// # Errors
    ///
    /// See [`SheetcraftConfig::load`].
    #[instrument(fields(path = %path.display()))]
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration file");
        Self::build(
            Config::builder().add_source(File::from(path).required(false)),
            None,
        )
    }

    /// Parse TOML text, then apply `env` in place of the process environment.
    ///
    /// Keys in `env` carry the prefix, as in `SHEETCRAFT_TEMPERATURE`.
    ///
    /// # Errors
    ///
    /// See [`SheetcraftConfig::load`].
    pub fn from_toml_str(
        toml: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        Self::build(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
            Some(env.unwrap_or_default()),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;
        settings.validate()?;
        info!(
            relay = settings.relay_enabled(),
            default_mode = %settings.default_mode,
            "Configuration loaded"
        );
        Ok(settings)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.relay_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::new(format!(
                    "relay_base_url must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::new("api_base_url must not be empty"));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(ConfigError::new("api_key_env must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::new(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::new("request_timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Whether requests go to the relay first.
    pub fn relay_enabled(&self) -> bool {
        self.use_relay && self.relay_base_url.is_some()
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Build the relay-then-direct transport these settings describe.
    ///
    /// A missing API key is not an error here; direct requests then fail
    /// recoverably and generation falls back offline.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn build_transport(&self) -> SheetcraftResult<FailoverTransport> {
        let relay = match &self.relay_base_url {
            Some(url) if self.use_relay => Some(RelayClient::new(url, self.timeout())?),
            _ => None,
        };
        let direct = GeminiClient::from_env(
            &self.api_base_url,
            &self.api_key_env,
            self.temperature,
            self.timeout(),
        )?;
        Ok(FailoverTransport::new(relay, direct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SheetcraftConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.relay_enabled());
        assert_eq!(config.temperature(), &DIRECT_TEMPERATURE);
    }

    #[test]
    fn relay_needs_both_flag_and_url() {
        let config = SheetcraftConfig::from_toml_str(
            "relay_base_url = \"http://localhost:8080\"\nuse_relay = false",
            None,
        )
        .unwrap();
        assert!(!config.relay_enabled());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = SheetcraftConfig::from_toml_str("request_timeout_secs = 0", None).unwrap_err();
        assert!(err.message.contains("request_timeout_secs"));
    }
}
