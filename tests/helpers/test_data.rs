//! Test data fixtures
//!
//! Places, groups, events and quizzes used across the integration tests.

use chrono::{Duration, Utc};
use uuid::Uuid;

use knuut_agent::models::{CreateEventRequest, CreateGroupRequest, NewQuizAnswer, NewQuizQuestion};

pub const HELSINKI: (f64, f64) = (60.1699, 24.9384);
pub const ESPOO: (f64, f64) = (60.2055, 24.6559);
pub const KAJAANI: (f64, f64) = (64.2245, 27.7285);
pub const OULU: (f64, f64) = (65.0121, 25.4651);

pub fn group_request(name: &str, group_type: &str, place: (f64, f64)) -> CreateGroupRequest {
    CreateGroupRequest {
        name: name.to_string(),
        description: format!("{} meets every week", name),
        group_type: group_type.to_string(),
        location_name: Some("Library".to_string()),
        location_lat: Some(place.0),
        location_lng: Some(place.1),
        created_by: None,
    }
}

/// An event `days` from now; negative values lie in the past
pub fn event_request(title: &str, days: i64, group_id: Option<Uuid>) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        description: String::new(),
        event_date: Utc::now() + Duration::days(days),
        location_name: "Community hall".to_string(),
        location_lat: Some(HELSINKI.0),
        location_lng: Some(HELSINKI.1),
        group_id,
        created_by: None,
    }
}

/// Two Finnish vocabulary questions, first answer correct in each
pub fn vocabulary_quiz() -> Vec<NewQuizQuestion> {
    vec![
        NewQuizQuestion::new(
            "What does 'kiitos' mean?",
            vec![
                NewQuizAnswer::new("Thank you", true),
                NewQuizAnswer::new("Hello", false),
                NewQuizAnswer::new("Goodbye", false),
            ],
        ),
        NewQuizQuestion::new(
            "What does 'koira' mean?",
            vec![
                NewQuizAnswer::new("Dog", true),
                NewQuizAnswer::new("Cat", false),
            ],
        ),
    ]
}
