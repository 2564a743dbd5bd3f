//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod user;
pub mod group;
pub mod event;
pub mod usage;

use sqlx::{Postgres, QueryBuilder};

use crate::services::geo::{GeoFilter, EARTH_RADIUS_KM};

// Re-export repositories
pub use user::UserRepository;
pub use group::GroupRepository;
pub use event::EventRepository;
pub use usage::UsageRepository;

/// Append a haversine distance predicate on `{alias}.location_lat/lng`
///
/// Rows without coordinates never match.
pub(crate) fn push_within_distance(
    builder: &mut QueryBuilder<'_, Postgres>,
    alias: &str,
    filter: &GeoFilter,
) {
    let lat = filter.center.lat;
    let lng = filter.center.lng;

    builder
        .push(format!(
            " AND {alias}.location_lat IS NOT NULL AND {alias}.location_lng IS NOT NULL AND 2 * "
        ))
        .push_bind(EARTH_RADIUS_KM)
        .push(format!(
            " * ASIN(LEAST(1.0::float8, SQRT(POWER(SIN(RADIANS({alias}.location_lat - "
        ))
        .push_bind(lat)
        .push(") / 2), 2) + COS(RADIANS(")
        .push_bind(lat)
        .push(format!(
            ")) * COS(RADIANS({alias}.location_lat)) * POWER(SIN(RADIANS({alias}.location_lng - "
        ))
        .push_bind(lng)
        .push(") / 2), 2)))) <= ")
        .push_bind(filter.threshold_km());
}
