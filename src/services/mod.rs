//! Services module
//!
//! This module contains the pure domain services and the persistence adapter

pub mod geo;
pub mod grader;
pub mod persistence;

// Re-export commonly used services
pub use geo::{Coordinates, GeoFilter, haversine_km};
pub use grader::{grade, GradeResult, QuestionResult};
pub use persistence::PersistenceAdapter;
