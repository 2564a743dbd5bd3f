//! Transport and conversation contracts
//!
//! The physical transport and the voice pipeline live outside this crate.
//! The gateway only sees these two traits.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::errors::Result;

/// Identity of a remote participant in the room
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(identity: &str) -> Self {
        Self::new(identity)
    }
}

impl From<String> for ParticipantId {
    fn from(identity: String) -> Self {
        Self(identity)
    }
}

/// Addressed request/response channel to remote participants
#[async_trait]
pub trait Transport: Send + Sync {
    /// Call `method` on `destination` with a JSON payload and return its reply
    async fn perform_rpc(
        &self,
        destination: &ParticipantId,
        method: &str,
        payload: String,
    ) -> Result<String>;

    /// Participants currently present in the room
    async fn remote_participants(&self) -> Vec<ParticipantId>;
}

/// The voice side of the session
#[async_trait]
pub trait Conversation: Send + Sync {
    /// Speak `text` to the user
    async fn say(&self, text: &str) -> Result<()>;

    /// Feed free text into the conversation turn pipeline
    async fn submit_user_input(&self, text: &str) -> Result<()>;
}

/// One inbound remote call as delivered by the transport
#[derive(Debug, Clone)]
pub struct InboundCall {
    pub method: String,
    pub caller: ParticipantId,
    pub payload: Vec<u8>,
}

impl InboundCall {
    pub fn new(method: &str, caller: impl Into<ParticipantId>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            method: method.to_string(),
            caller: caller.into(),
            payload: payload.into(),
        }
    }
}
