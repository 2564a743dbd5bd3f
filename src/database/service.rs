//! Database service layer
//!
//! This module provides the PostgreSQL-backed community store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::connection::{self, DatabasePool};
use crate::database::store::CommunityStore;
use crate::database::{EventRepository, GroupRepository, UsageRepository, UserRepository};
use crate::models::*;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub groups: GroupRepository,
    pub events: EventRepository,
    pub usage: UsageRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            usage: UsageRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open a pool and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = connection::create_pool(config).await?;
        connection::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CommunityStore for DatabaseService {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create_group(&self, request: &CreateGroupRequest) -> Result<PersistedGroup> {
        self.groups.create(request).await
    }

    async fn create_event(&self, request: &CreateEventRequest) -> Result<PersistedEvent> {
        self.events.create(request).await
    }

    async fn find_groups(&self, query: &GroupQuery) -> Result<Vec<PersistedGroup>> {
        self.groups.find(query).await
    }

    async fn find_events(&self, query: &EventQuery) -> Result<Vec<PersistedEvent>> {
        self.events.find(query).await
    }

    async fn join_group(&self, group_id: Uuid, user_id: Uuid) -> Result<i64> {
        self.groups.add_member(group_id, user_id).await
    }

    async fn rsvp_event(&self, event_id: Uuid, user_id: Uuid, status: RsvpStatus) -> Result<i64> {
        self.events.upsert_rsvp(event_id, user_id, status).await
    }

    async fn track_usage(&self, request: &TrackUsageRequest) -> Result<()> {
        self.usage.record(request).await
    }

    async fn usage_since(&self, user_id: Uuid, since: DateTime<Utc>) -> Result<i64> {
        self.usage.minutes_since(user_id, since).await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        self.users.create(request).await
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        self.users.find_by_id(user_id).await
    }

    async fn health_check(&self) -> Result<()> {
        connection::health_check(&self.pool).await
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
