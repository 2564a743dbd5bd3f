//! Session state module
//!
//! This module holds the in-memory view of one session's artifacts.

pub mod entity_store;

pub use entity_store::{EntityStore, CountUpdate};
