//! Process-local community store selected by `memory://`
//!
//! Mirrors the PostgreSQL backend's semantics: unique membership and RSVP
//! keys, aggregated counts on find, newest-first groups, soonest-first events
//! and the 50-row cap. Every operation runs inside one write or read lock, so
//! a check and its insert never interleave with another caller.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::store::{CommunityStore, FIND_LIMIT};
use crate::models::*;
use crate::services::geo;
use crate::utils::errors::{KnuutError, Result};
use crate::utils::helpers::{generate_id, normalize_group_type};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    groups: Vec<PersistedGroup>,
    members: HashSet<(Uuid, Uuid)>,
    events: Vec<PersistedEvent>,
    rsvps: HashMap<(Uuid, Uuid), EventRsvp>,
    usage: Vec<UsageRecord>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of membership rows for a group
    pub async fn membership_rows(&self, group_id: Uuid) -> usize {
        let tables = self.tables.read().await;
        tables.members.iter().filter(|(group, _)| *group == group_id).count()
    }

    /// All RSVP rows for an event
    pub async fn rsvp_rows(&self, event_id: Uuid) -> Vec<EventRsvp> {
        let tables = self.tables.read().await;
        tables
            .rsvps
            .values()
            .filter(|rsvp| rsvp.event_id == event_id)
            .cloned()
            .collect()
    }
}

impl Tables {
    fn member_count(&self, group_id: Uuid) -> i64 {
        self.members.iter().filter(|(group, _)| *group == group_id).count() as i64
    }

    fn going_count(&self, event_id: Uuid) -> i64 {
        self.rsvps
            .values()
            .filter(|rsvp| rsvp.event_id == event_id && rsvp.status == RsvpStatus::Going.as_str())
            .count() as i64
    }
}

#[async_trait]
impl CommunityStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_group(&self, request: &CreateGroupRequest) -> Result<PersistedGroup> {
        let group = PersistedGroup {
            id: generate_id(),
            name: request.name.clone(),
            description: request.description.clone(),
            group_type: normalize_group_type(&request.group_type),
            location_name: request.location_name.clone(),
            location_lat: request.location_lat,
            location_lng: request.location_lng,
            created_by: request.created_by,
            created_at: Utc::now(),
            member_count: 0,
        };
        self.tables.write().await.groups.push(group.clone());
        Ok(group)
    }

    async fn create_event(&self, request: &CreateEventRequest) -> Result<PersistedEvent> {
        let event = PersistedEvent {
            id: generate_id(),
            title: request.title.clone(),
            description: request.description.clone(),
            event_date: request.event_date,
            location_name: request.location_name.clone(),
            location_lat: request.location_lat,
            location_lng: request.location_lng,
            group_id: request.group_id,
            created_by: request.created_by,
            created_at: Utc::now(),
            rsvp_count: 0,
        };
        self.tables.write().await.events.push(event.clone());
        Ok(event)
    }

    async fn find_groups(&self, query: &GroupQuery) -> Result<Vec<PersistedGroup>> {
        let tables = self.tables.read().await;
        let group_type = query.group_type.as_deref().map(normalize_group_type);

        // Later inserts win ties on created_at
        let groups = tables
            .groups
            .iter()
            .rev()
            .filter(|group| group_type.as_ref().map_or(true, |t| &group.group_type == t))
            .filter(|group| geo::passes(query.near.as_ref(), group.coordinates()))
            .map(|group| PersistedGroup {
                member_count: tables.member_count(group.id),
                ..group.clone()
            });
        let mut groups: Vec<PersistedGroup> = groups.collect();
        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        groups.truncate(FIND_LIMIT as usize);
        Ok(groups)
    }

    async fn find_events(&self, query: &EventQuery) -> Result<Vec<PersistedEvent>> {
        let tables = self.tables.read().await;
        let now = Utc::now();

        let mut events: Vec<PersistedEvent> = tables
            .events
            .iter()
            .filter(|event| query.group_id.map_or(true, |id| event.group_id == Some(id)))
            .filter(|event| !query.upcoming_only || event.event_date > now)
            .filter(|event| geo::passes(query.near.as_ref(), event.coordinates()))
            .map(|event| PersistedEvent {
                rsvp_count: tables.going_count(event.id),
                ..event.clone()
            })
            .collect();
        events.sort_by(|a, b| a.event_date.cmp(&b.event_date));
        events.truncate(FIND_LIMIT as usize);
        Ok(events)
    }

    async fn join_group(&self, group_id: Uuid, user_id: Uuid) -> Result<i64> {
        let mut tables = self.tables.write().await;
        if !tables.groups.iter().any(|group| group.id == group_id) {
            return Err(KnuutError::GroupNotFound { group_id });
        }
        tables.members.insert((group_id, user_id));
        Ok(tables.member_count(group_id))
    }

    async fn rsvp_event(&self, event_id: Uuid, user_id: Uuid, status: RsvpStatus) -> Result<i64> {
        let mut tables = self.tables.write().await;
        if !tables.events.iter().any(|event| event.id == event_id) {
            return Err(KnuutError::EventNotFound { event_id });
        }
        tables.rsvps.insert(
            (event_id, user_id),
            EventRsvp {
                event_id,
                user_id,
                status: status.as_str().to_string(),
                rsvp_at: Utc::now(),
            },
        );
        Ok(tables.going_count(event_id))
    }

    async fn track_usage(&self, request: &TrackUsageRequest) -> Result<()> {
        self.tables.write().await.usage.push(UsageRecord {
            user_id: request.user_id,
            session_id: request.session_id.clone(),
            minutes_used: request.minutes_used,
            service_type: request.service_type.clone(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn usage_since(&self, user_id: Uuid, since: DateTime<Utc>) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .usage
            .iter()
            .filter(|record| record.user_id == user_id && record.timestamp >= since)
            .map(|record| i64::from(record.minutes_used))
            .sum())
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        let user = User {
            id: generate_id(),
            email: request.email.clone(),
            name: request.name.clone(),
            country: request.country.clone(),
            created_at: Utc::now(),
        };
        self.tables.write().await.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&user_id).cloned())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {}
}
