//! Data models module
//!
//! This module contains all data structures used throughout the engine:
//! session learning artifacts, community artifacts and their persisted rows.

pub mod flashcard;
pub mod quiz;
pub mod group;
pub mod event;
pub mod user;
pub mod usage;

// Re-export commonly used models
pub use flashcard::FlashCard;
pub use quiz::{Quiz, QuizQuestion, QuizAnswer, NewQuizQuestion, NewQuizAnswer};
pub use group::{Group, PersistedGroup, CreateGroupRequest, GroupQuery, GroupMember};
pub use event::{Event, PersistedEvent, CreateEventRequest, EventQuery, EventRsvp, RsvpStatus};
pub use user::{User, CreateUserRequest};
pub use usage::{UsageRecord, TrackUsageRequest};
