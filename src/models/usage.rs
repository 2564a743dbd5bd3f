//! Usage ledger model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UsageRecord {
    pub user_id: Uuid,
    pub session_id: String,
    pub minutes_used: i32,
    pub service_type: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUsageRequest {
    pub user_id: Uuid,
    pub session_id: String,
    pub minutes_used: i32,
    pub service_type: String,
}
