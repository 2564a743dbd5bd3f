//! Knuut session engine
//!
//! Backend logic for a voice-driven assistant that teaches language skills
//! and organizes community groups and events. This library provides the
//! per-session entity store, the client RPC protocol, the dual-write
//! persistence adapter, proximity filtering and quiz grading.

pub mod config;
pub mod database;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{KnuutError, Result};

// Re-export main components for easy access
pub use gateway::{Creation, InboundCall, ParticipantId, SyncGateway};
pub use services::PersistenceAdapter;
pub use state::EntityStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
