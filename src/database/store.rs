//! Store contract shared by the PostgreSQL and in-memory backends
//!
//! Backends return real errors; turning them into degraded results is the
//! job of `services::persistence`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    CreateEventRequest, CreateGroupRequest, CreateUserRequest, EventQuery, GroupQuery,
    PersistedEvent, PersistedGroup, RsvpStatus, TrackUsageRequest, User,
};
use crate::utils::errors::Result;

/// Maximum rows returned by a find
pub const FIND_LIMIT: i64 = 50;

#[async_trait]
pub trait CommunityStore: Send + Sync {
    /// Backend name for logs
    fn backend(&self) -> &'static str;

    /// Insert a group; the returned row carries `member_count = 0`
    async fn create_group(&self, request: &CreateGroupRequest) -> Result<PersistedGroup>;

    /// Insert an event; the returned row carries `rsvp_count = 0`
    async fn create_event(&self, request: &CreateEventRequest) -> Result<PersistedEvent>;

    /// Newest first, at most [`FIND_LIMIT`] rows, with aggregated member counts
    async fn find_groups(&self, query: &GroupQuery) -> Result<Vec<PersistedGroup>>;

    /// Soonest first, at most [`FIND_LIMIT`] rows, counting only `going` RSVPs
    async fn find_events(&self, query: &EventQuery) -> Result<Vec<PersistedEvent>>;

    /// Idempotent membership insert; returns the group's member count after the write
    async fn join_group(&self, group_id: Uuid, user_id: Uuid) -> Result<i64>;

    /// Insert or update the single RSVP row for `(event_id, user_id)`;
    /// returns the event's `going` count after the write
    async fn rsvp_event(&self, event_id: Uuid, user_id: Uuid, status: RsvpStatus) -> Result<i64>;

    async fn track_usage(&self, request: &TrackUsageRequest) -> Result<()>;

    /// Total minutes recorded for `user_id` at or after `since`
    async fn usage_since(&self, user_id: Uuid, since: DateTime<Utc>) -> Result<i64>;

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User>;

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>>;

    async fn health_check(&self) -> Result<()>;

    async fn close(&self);
}
