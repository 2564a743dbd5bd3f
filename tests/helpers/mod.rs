//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Knuut engine.
//! It includes a recording transport and voice layer, an unreachable store,
//! session test context setup and data fixtures.

#![allow(dead_code)]

pub mod failing_store;
pub mod test_context;
pub mod test_data;
pub mod transport_mock;

pub use failing_store::*;
pub use test_context::*;
pub use test_data::*;
pub use transport_mock::*;
