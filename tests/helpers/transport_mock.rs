//! Recording transport and voice layer for testing
//!
//! Every outbound call and utterance is kept so tests can assert on what the
//! client would have seen and heard.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use knuut_agent::gateway::{Conversation, ParticipantId, Transport};
use knuut_agent::{KnuutError, Result};

/// One outbound call as the client received it
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub destination: ParticipantId,
    pub method: String,
    pub payload: Value,
}

/// Transport that records calls and answers `"success"`
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    participants: Mutex<Vec<ParticipantId>>,
    failure: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
}

impl RecordingTransport {
    pub fn new(participants: &[&str]) -> Self {
        let transport = Self::default();
        for participant in participants {
            transport.join(participant);
        }
        transport
    }

    /// A participant enters the room
    pub fn join(&self, identity: &str) {
        self.participants.lock().unwrap().push(ParticipantId::new(identity));
    }

    /// Make every following call fail with `reason`
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock().unwrap() = Some(reason.to_string());
    }

    /// Make every following call take `delay` before answering
    pub fn stall_for(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, method: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    pub fn last_call(&self, method: &str) -> Option<RecordedCall> {
        self.calls_for(method).pop()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn perform_rpc(
        &self,
        destination: &ParticipantId,
        method: &str,
        payload: String,
    ) -> Result<String> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failure.lock().unwrap().clone();
        if let Some(reason) = failure {
            return Err(KnuutError::Transport(reason));
        }

        self.calls.lock().unwrap().push(RecordedCall {
            destination: destination.clone(),
            method: method.to_string(),
            payload: serde_json::from_str(&payload)?,
        });
        Ok("success".to_string())
    }

    async fn remote_participants(&self) -> Vec<ParticipantId> {
        self.participants.lock().unwrap().clone()
    }
}

/// Voice layer that records what was said and forwarded
#[derive(Default)]
pub struct RecordingConversation {
    said: Mutex<Vec<String>>,
    inputs: Mutex<Vec<String>>,
}

impl RecordingConversation {
    pub fn said(&self) -> Vec<String> {
        self.said.lock().unwrap().clone()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Conversation for RecordingConversation {
    async fn say(&self, text: &str) -> Result<()> {
        self.said.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn submit_user_input(&self, text: &str) -> Result<()> {
        self.inputs.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
