//! Error handling for Knuut
//!
//! This module defines the main error types used throughout the engine
//! and the conversion of errors into the `"error: ..."` RPC reply contract.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for the Knuut engine
#[derive(Error, Debug)]
pub enum KnuutError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid quiz: {0}")]
    InvalidQuiz(String),

    #[error("Quiz not found: {quiz_id}")]
    QuizNotFound { quiz_id: Uuid },

    #[error("Flash card not found: {card_id}")]
    FlashCardNotFound { card_id: Uuid },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: Uuid },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("No participant bound to the session")]
    NoParticipant,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Session cancelled")]
    Cancelled,

    #[error("Unknown method {0}")]
    UnknownMethod(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for Knuut operations
pub type Result<T> = std::result::Result<T, KnuutError>;

impl KnuutError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            KnuutError::Database(_) => true,
            KnuutError::Migration(_) => false,
            KnuutError::Config(_) => false,
            KnuutError::ConfigSource(_) => false,
            KnuutError::InvalidInput(_) => false,
            KnuutError::InvalidQuiz(_) => false,
            KnuutError::QuizNotFound { .. } => false,
            KnuutError::FlashCardNotFound { .. } => false,
            KnuutError::GroupNotFound { .. } => false,
            KnuutError::EventNotFound { .. } => false,
            KnuutError::NoParticipant => true,
            KnuutError::Transport(_) => true,
            KnuutError::Timeout(_) => true,
            KnuutError::Cancelled => false,
            KnuutError::UnknownMethod(_) => false,
            KnuutError::Serialization(_) => false,
            KnuutError::Io(_) => true,
            KnuutError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            KnuutError::Migration(_) => ErrorSeverity::Critical,
            KnuutError::Config(_) => ErrorSeverity::Critical,
            KnuutError::ConfigSource(_) => ErrorSeverity::Critical,
            KnuutError::InvalidInput(_) => ErrorSeverity::Info,
            KnuutError::InvalidQuiz(_) => ErrorSeverity::Info,
            KnuutError::Serialization(_) => ErrorSeverity::Info,
            KnuutError::UnknownMethod(_) => ErrorSeverity::Info,
            KnuutError::QuizNotFound { .. }
            | KnuutError::FlashCardNotFound { .. }
            | KnuutError::GroupNotFound { .. }
            | KnuutError::EventNotFound { .. } => ErrorSeverity::Warning,
            KnuutError::NoParticipant => ErrorSeverity::Warning,
            KnuutError::Cancelled => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Render the error as an inbound RPC reply
    pub fn to_rpc_error(&self) -> String {
        let reason = match self {
            KnuutError::QuizNotFound { .. } => "quiz not found".to_string(),
            KnuutError::FlashCardNotFound { .. } => "flash card not found".to_string(),
            KnuutError::GroupNotFound { .. } => "group not found".to_string(),
            KnuutError::EventNotFound { .. } => "event not found".to_string(),
            KnuutError::Serialization(e) => format!("invalid payload: {}", e),
            KnuutError::InvalidInput(msg) => msg.clone(),
            KnuutError::InvalidQuiz(msg) => format!("invalid quiz: {}", msg),
            KnuutError::UnknownMethod(method) => format!("unknown method {}", method),
            other => other.to_string(),
        };
        format!("error: {}", reason)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
