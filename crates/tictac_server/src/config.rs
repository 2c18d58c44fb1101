//! Server configuration.
//!
//! Values are layered: defaults, then an optional TOML file, then environment
//! variables (a `.env` file is honoured), then command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::game::DEFAULT_MAX_ATTEMPTS;

/// Environment variable overriding the bind host.
pub const ENV_HOST: &str = "TICTAC_HOST";
/// Environment variable overriding the bind port.
pub const ENV_PORT: &str = "TICTAC_PORT";
/// Environment variable overriding the database path.
pub const ENV_DATABASE: &str = "TICTAC_DATABASE";
/// Environment variable holding the token secret.
pub const ENV_SECRET_KEY: &str = "TICTAC_SECRET_KEY";

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Runtime configuration for `tictac serve`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    #[setters(into)]
    host: String,

    /// TCP port to bind.
    port: u16,

    /// SQLite database file.
    #[setters(into)]
    database_path: String,

    /// HMAC secret for tokens. A random one is generated when unset.
    #[setters(strip_option, into)]
    secret_key: Option<String>,

    /// Token lifetime in minutes.
    token_ttl_minutes: i64,

    /// Attempts per move before a contended game reports failure.
    max_update_attempts: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: "tictac.db".to_string(),
            secret_key: None,
            token_ttl_minutes: 30,
            max_update_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Checks that values are usable by the server.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `token_ttl_minutes` is outside
    /// `1..=MAX_TOKEN_TTL_MINUTES` or `max_update_attempts` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.token_ttl_minutes) {
            return Err(ConfigError::new(format!(
                "token_ttl_minutes must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_MINUTES, self.token_ttl_minutes
            )));
        }
        if self.max_update_attempts == 0 {
            return Err(ConfigError::new("max_update_attempts must be at least 1"));
        }
        Ok(())
    }

    /// Applies `TICTAC_*` overrides from the process environment and `.env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `TICTAC_PORT` is not a port number or the
    /// result fails [`ServerConfig::validate`].
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|key| dotenvy::var(key).ok())
    }

    /// Applies `TICTAC_*` overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `TICTAC_PORT` is not a port number or the
    /// result fails [`ServerConfig::validate`].
    #[instrument(skip_all)]
    pub fn apply_env_with(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(ENV_HOST) {
            debug!(%host, "Host from environment");
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {}='{}': {}", ENV_PORT, port, e)))?;
            debug!(port = self.port, "Port from environment");
        }
        if let Some(path) = lookup(ENV_DATABASE) {
            debug!(%path, "Database path from environment");
            self.database_path = path;
        }
        if let Some(secret) = lookup(ENV_SECRET_KEY) {
            debug!("Secret key from environment");
            self.secret_key = Some(secret);
        }
        self.validate()?;
        Ok(self)
    }

    /// The configured secret, or a fresh random one if none is set.
    ///
    /// Tokens signed with a generated secret stop verifying after a restart.
    #[instrument(skip(self))]
    pub fn resolved_secret(&self) -> String {
        match &self.secret_key {
            Some(secret) if !secret.is_empty() => secret.clone(),
            _ => {
                warn!("No {} configured, generating an ephemeral secret", ENV_SECRET_KEY);
                let mut bytes = [0u8; 32];
                rand::thread_rng().fill_bytes(&mut bytes);
                hex::encode(bytes)
            }
        }
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
