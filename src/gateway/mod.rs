//! Session gateway module
//!
//! This module contains the transport contract, the client wire protocol,
//! the per-session synchronization gateway and a JSON-lines transport.

pub mod protocol;
pub mod session;
pub mod stdio;
pub mod transport;

pub use session::{Creation, EventSearch, GroupSearch, Panel, SyncGateway, ToolOutcome};
pub use transport::{Conversation, InboundCall, ParticipantId, Transport};
