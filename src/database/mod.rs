//! Database module
//!
//! This module handles store connections and operations

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::utils::errors::{KnuutError, Result};

// Re-export commonly used database components
pub use connection::{Backend, DatabasePool, create_pool, run_migrations, health_check};
pub use memory::MemoryStore;
pub use repositories::{UserRepository, GroupRepository, EventRepository, UsageRepository};
pub use service::DatabaseService;
pub use store::{CommunityStore, FIND_LIMIT};

/// Open the store named by `config.url`
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn CommunityStore>> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| KnuutError::Config("database url is not set".to_string()))?;

    let store: Arc<dyn CommunityStore> = match Backend::from_url(url)? {
        Backend::Postgres => Arc::new(DatabaseService::connect(config).await?),
        Backend::Memory => Arc::new(MemoryStore::new()),
    };

    tracing::info!(backend = store.backend(), "Community store opened");
    Ok(store)
}
