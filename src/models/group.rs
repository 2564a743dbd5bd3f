//! Group model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::services::geo::{Coordinates, GeoFilter};

/// A community group as held by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub group_type: String,
    pub location_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub member_count: i64,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A group row with its aggregated membership count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PersistedGroup {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub group_type: String,
    pub location_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub member_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub group_type: String,
    pub location_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupQuery {
    pub group_type: Option<String>,
    pub near: Option<GeoFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupMember {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

impl CreateGroupRequest {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.location_lat, self.location_lng)
    }
}

impl PersistedGroup {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.location_lat, self.location_lng)
    }
}

impl From<PersistedGroup> for Group {
    fn from(row: PersistedGroup) -> Self {
        Self {
            coordinates: row.coordinates(),
            id: row.id,
            name: row.name,
            description: row.description,
            group_type: row.group_type,
            location_name: row.location_name,
            member_count: row.member_count,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}
