//! Persistence adapter
//!
//! Wraps an optional community store. Without a store every operation is a
//! silent no-op; with one, failures and timeouts are logged and turned into
//! the operation's empty result. Nothing here returns a store error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::{self, CommunityStore};
use crate::models::*;
use crate::utils::errors::Result;
use crate::utils::helpers::start_of_month;
use crate::utils::logging::log_store_failure;

#[derive(Clone)]
pub struct PersistenceAdapter {
    store: Option<Arc<dyn CommunityStore>>,
    command_timeout: Duration,
}

impl PersistenceAdapter {
    /// Adapter in degraded mode
    pub fn disabled() -> Self {
        Self {
            store: None,
            command_timeout: DatabaseConfig::default().command_timeout(),
        }
    }

    pub fn new(store: Arc<dyn CommunityStore>, command_timeout: Duration) -> Self {
        Self {
            store: Some(store),
            command_timeout,
        }
    }

    /// Open the configured store; a missing url yields a disabled adapter
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if config.url.is_none() {
            info!("No database configured, running without persistence");
            return Ok(Self::disabled());
        }

        let store = database::open_store(config).await?;
        Ok(Self::new(store, config.command_timeout()))
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn backend(&self) -> Option<&'static str> {
        self.store.as_ref().map(|store| store.backend())
    }

    async fn run<T, F, Fut>(&self, operation: &'static str, call: F) -> Option<T>
    where
        F: FnOnce(Arc<dyn CommunityStore>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let Some(store) = self.store.clone() else {
            debug!(operation, "Store not configured, skipping");
            return None;
        };

        match tokio::time::timeout(self.command_timeout, call(store)).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                log_store_failure(operation, &e.to_string());
                None
            }
            Err(_) => {
                log_store_failure(
                    operation,
                    &format!("timed out after {:?}", self.command_timeout),
                );
                None
            }
        }
    }

    /// Insert a group; the result carries `member_count = 0`
    pub async fn create_group(&self, request: &CreateGroupRequest) -> Option<PersistedGroup> {
        self.run("create_group", |store| async move { store.create_group(request).await })
            .await
    }

    /// Insert an event; the result carries `rsvp_count = 0`
    pub async fn create_event(&self, request: &CreateEventRequest) -> Option<PersistedEvent> {
        self.run("create_event", |store| async move { store.create_event(request).await })
            .await
    }

    pub async fn find_groups(&self, query: &GroupQuery) -> Vec<PersistedGroup> {
        self.run("find_groups", |store| async move { store.find_groups(query).await })
            .await
            .unwrap_or_default()
    }

    pub async fn find_events(&self, query: &EventQuery) -> Vec<PersistedEvent> {
        self.run("find_events", |store| async move { store.find_events(query).await })
            .await
            .unwrap_or_default()
    }

    /// Stored member count after the join; re-joining is a successful no-op
    pub async fn join_group(&self, group_id: Uuid, user_id: Uuid) -> Option<i64> {
        self.run("join_group", |store| async move {
            store.join_group(group_id, user_id).await
        })
        .await
    }

    /// Stored `going` count after the RSVP; re-RSVP updates the existing row
    pub async fn rsvp_event(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: RsvpStatus,
    ) -> Option<i64> {
        self.run("rsvp_event", |store| async move {
            store.rsvp_event(event_id, user_id, status).await
        })
        .await
    }

    pub async fn track_usage(
        &self,
        user_id: Uuid,
        session_id: &str,
        minutes_used: i32,
        service_type: &str,
    ) -> bool {
        let request = TrackUsageRequest {
            user_id,
            session_id: session_id.to_string(),
            minutes_used,
            service_type: service_type.to_string(),
        };
        self.run("track_usage", |store| async move { store.track_usage(&request).await })
            .await
            .is_some()
    }

    /// Minutes used since `month_start`, defaulting to the start of the current month
    pub async fn get_user_usage(&self, user_id: Uuid, month_start: Option<DateTime<Utc>>) -> i64 {
        let since = month_start.unwrap_or_else(|| start_of_month(Utc::now()));
        self.run("get_user_usage", |store| async move {
            store.usage_since(user_id, since).await
        })
        .await
        .unwrap_or(0)
    }

    pub async fn create_user(
        &self,
        email: Option<String>,
        name: Option<String>,
        country: Option<String>,
    ) -> Option<Uuid> {
        let request = CreateUserRequest { email, name, country };
        self.run("create_user", |store| async move { store.create_user(&request).await })
            .await
            .map(|user| user.id)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Option<User> {
        self.run("get_user", |store| async move { store.get_user(user_id).await })
            .await
            .flatten()
    }

    pub async fn health_check(&self) -> bool {
        self.run("health_check", |store| async move { store.health_check().await })
            .await
            .is_some()
    }

    pub async fn close(&self) {
        if let Some(store) = &self.store {
            store.close().await;
        }
    }
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("backend", &self.backend())
            .field("command_timeout", &self.command_timeout)
            .finish()
    }
}
