//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all settings are usable before a session starts.

use crate::utils::errors::{KnuutError, Result};
use super::Settings;

/// Connection string schemes the engine knows how to open
pub const SUPPORTED_SCHEMES: [&str; 3] = ["postgres", "postgresql", "memory"];

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_session_config(&settings.session)?;
    validate_geo_config(&settings.geo)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if let Some(ref url) = config.url {
        let parsed = url::Url::parse(url)?;
        if !SUPPORTED_SCHEMES.contains(&parsed.scheme()) {
            return Err(KnuutError::Config(format!(
                "Unsupported database scheme: {}. Supported: {:?}",
                parsed.scheme(),
                SUPPORTED_SCHEMES
            )));
        }
    }

    if config.max_connections == 0 {
        return Err(KnuutError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(KnuutError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.command_timeout_secs == 0 {
        return Err(KnuutError::Config(
            "Command timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.rpc_timeout_secs == 0 {
        return Err(KnuutError::Config(
            "RPC timeout must be greater than 0".to_string()
        ));
    }

    if config.participant_poll_ms == 0 {
        return Err(KnuutError::Config(
            "Participant poll interval must be greater than 0".to_string()
        ));
    }

    if config.usage_service_type.trim().is_empty() {
        return Err(KnuutError::Config(
            "Usage service type is required".to_string()
        ));
    }

    Ok(())
}

fn validate_geo_config(config: &super::GeoConfig) -> Result<()> {
    if !config.default_max_distance_km.is_finite() || config.default_max_distance_km <= 0.0 {
        return Err(KnuutError::Config(
            "Default max distance must be a positive number of kilometres".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(KnuutError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(KnuutError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
