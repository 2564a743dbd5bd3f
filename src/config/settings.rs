//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub geo: GeoConfig,
    pub logging: LoggingConfig,
}

/// Persistent store configuration
///
/// `url` is the single connection string selecting the backend. When it is
/// absent the engine runs without persistence.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub command_timeout_secs: u64,
}

/// Per-session behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Identity of the client participant outbound pushes go to
    pub participant_identity: Option<String>,
    /// Store-side user the session acts for
    pub user_id: Option<Uuid>,
    pub participant_wait_secs: u64,
    pub participant_poll_ms: u64,
    pub rpc_timeout_secs: u64,
    pub speak_flipped_cards: bool,
    pub usage_service_type: String,
}

/// Proximity search defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoConfig {
    pub default_max_distance_km: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_sources(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file plus the environment
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        Self::from_sources(config::File::with_name(path).required(true))
    }

    fn from_sources<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("KNUUT").separator("__"))
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;

        // DATABASE_URL is the conventional name for the connection string
        if settings.database.url.is_none() {
            settings.database.url = std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty());
        }

        Ok(settings)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::KnuutError> {
        super::validation::validate_settings(self)
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

impl SessionConfig {
    pub fn participant_wait(&self) -> Duration {
        Duration::from_secs(self.participant_wait_secs)
    }

    pub fn participant_poll(&self) -> Duration {
        Duration::from_millis(self.participant_poll_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 30,
            command_timeout_secs: 60,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            participant_identity: None,
            user_id: None,
            participant_wait_secs: 10,
            participant_poll_ms: 500,
            rpc_timeout_secs: 10,
            speak_flipped_cards: false,
            usage_service_type: "voice".to_string(),
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            default_max_distance_km: crate::services::geo::DEFAULT_MAX_DISTANCE_KM,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}
