//! Event model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::services::geo::{Coordinates, GeoFilter};
use crate::utils::errors::KnuutError;

/// An event or meetup as held by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location_name: String,
    pub coordinates: Option<Coordinates>,
    /// Weak reference, not checked against the session's groups
    pub group_id: Option<Uuid>,
    pub rsvp_count: i64,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// An event row with its count of "going" RSVPs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PersistedEvent {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location_name: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub group_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub rsvp_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location_name: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub group_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct EventQuery {
    pub group_id: Option<Uuid>,
    pub near: Option<GeoFilter>,
    pub upcoming_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventRsvp {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub rsvp_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    #[default]
    Going,
    Maybe,
    NotGoing,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Going => "going",
            RsvpStatus::Maybe => "maybe",
            RsvpStatus::NotGoing => "not_going",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = KnuutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "going" => Ok(RsvpStatus::Going),
            "maybe" => Ok(RsvpStatus::Maybe),
            "not_going" | "not going" => Ok(RsvpStatus::NotGoing),
            other => Err(KnuutError::InvalidInput(format!("invalid status: {}", other))),
        }
    }
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            group_id: None,
            near: None,
            upcoming_only: true,
        }
    }
}

impl CreateEventRequest {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.location_lat, self.location_lng)
    }
}

impl PersistedEvent {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.location_lat, self.location_lng)
    }
}

impl From<PersistedEvent> for Event {
    fn from(row: PersistedEvent) -> Self {
        Self {
            coordinates: row.coordinates(),
            id: row.id,
            title: row.title,
            description: row.description,
            event_date: row.event_date,
            location_name: row.location_name,
            group_id: row.group_id,
            rsvp_count: row.rsvp_count,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}
