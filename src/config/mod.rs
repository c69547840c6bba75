//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SOULCONNECT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use soulconnect_coach::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;
mod session;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;

use serde::Deserialize;

/// Provider-convention variable consulted when no AI key is configured.
pub const PROVIDER_API_KEY_VAR: &str = "ZHIPU_API_KEY";

/// Root application configuration
///
/// Every section has defaults except the AI key. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat-completion provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Session lifetime configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SOULCONNECT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    /// 5. Falls back to `ZHIPU_API_KEY` when no AI key was given
    ///
    /// # Environment Variable Format
    ///
    /// - `SOULCONNECT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SOULCONNECT__AI__MODEL=glm-4-flash` -> `ai.model = glm-4-flash`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SOULCONNECT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if !config.ai.has_api_key() {
            config.ai.api_key = std::env::var(PROVIDER_API_KEY_VAR).ok();
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.session.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
