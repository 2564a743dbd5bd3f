//! Community store that is configured but unreachable

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use knuut_agent::database::CommunityStore;
use knuut_agent::models::{
    CreateEventRequest, CreateGroupRequest, CreateUserRequest, EventQuery, GroupQuery,
    PersistedEvent, PersistedGroup, RsvpStatus, TrackUsageRequest, User,
};
use knuut_agent::{KnuutError, Result};

/// Every call fails the way an exhausted pool does
pub struct UnreachableStore;

fn unreachable<T>() -> Result<T> {
    Err(KnuutError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl CommunityStore for UnreachableStore {
    fn backend(&self) -> &'static str {
        "unreachable"
    }

    async fn create_group(&self, _: &CreateGroupRequest) -> Result<PersistedGroup> {
        unreachable()
    }

    async fn create_event(&self, _: &CreateEventRequest) -> Result<PersistedEvent> {
        unreachable()
    }

    async fn find_groups(&self, _: &GroupQuery) -> Result<Vec<PersistedGroup>> {
        unreachable()
    }

    async fn find_events(&self, _: &EventQuery) -> Result<Vec<PersistedEvent>> {
        unreachable()
    }

    async fn join_group(&self, _: Uuid, _: Uuid) -> Result<i64> {
        unreachable()
    }

    async fn rsvp_event(&self, _: Uuid, _: Uuid, _: RsvpStatus) -> Result<i64> {
        unreachable()
    }

    async fn track_usage(&self, _: &TrackUsageRequest) -> Result<()> {
        unreachable()
    }

    async fn usage_since(&self, _: Uuid, _: DateTime<Utc>) -> Result<i64> {
        unreachable()
    }

    async fn create_user(&self, _: &CreateUserRequest) -> Result<User> {
        unreachable()
    }

    async fn get_user(&self, _: Uuid) -> Result<Option<User>> {
        unreachable()
    }

    async fn health_check(&self) -> Result<()> {
        unreachable()
    }

    async fn close(&self) {}
}
