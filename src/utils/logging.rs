//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Knuut engine.

use std::path::Path;
use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{KnuutError, Result};

/// Initialize logging based on configuration
///
/// Console output goes to stderr so that stdout stays free for the wire
/// protocol of the stdio transport. The returned guard must be kept alive
/// for the file writer to flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| KnuutError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let (file_layer, guard) = match config.file_path {
        Some(ref file_path) => {
            let path = Path::new(file_path);
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "knuut.log".to_string());

            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| KnuutError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log session lifecycle and learning events
pub fn log_session_event(session_id: &str, event: &str, details: Option<&str>) {
    info!(
        session_id = session_id,
        event = event,
        details = details,
        "Session event occurred"
    );
}

/// Log community actions (joins, RSVPs, creations)
pub fn log_community_action(entity_id: &str, action: &str, member: Option<&str>, persisted: bool) {
    info!(
        entity_id = entity_id,
        action = action,
        member = member,
        persisted = persisted,
        "Community action performed"
    );
}

/// Log an outbound push to the client
pub fn log_outbound_push(method: &str, destination: &str, success: bool, details: Option<&str>) {
    if success {
        debug!(
            method = method,
            destination = destination,
            "Outbound push delivered"
        );
    } else {
        warn!(
            method = method,
            destination = destination,
            details = details,
            "Outbound push failed"
        );
    }
}

/// Log a store failure that was absorbed by the persistence adapter
pub fn log_store_failure(operation: &str, error: &str) {
    error!(
        operation = operation,
        error = error,
        "Store operation failed, continuing without persistence"
    );
}

/// Log store operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
