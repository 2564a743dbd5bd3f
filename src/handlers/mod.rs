//! Inbound call handlers
//!
//! This module routes `agent.*` calls to handlers organized by area:
//! - Learning handlers for flash cards and quizzes
//! - Community handlers for groups and events
//! - Conversation handlers for free text
//!
//! Handlers return `Ok(Some(reply))`, `Ok(None)` for calls without a reply,
//! or an error that [`dispatch`] renders as `"error: <reason>"`.

pub mod community;
pub mod conversation;
pub mod learning;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::gateway::protocol::*;
use crate::gateway::{InboundCall, SyncGateway};
use crate::utils::errors::{ErrorSeverity, KnuutError, Result};

pub type HandlerResult = Result<Option<String>>;

/// Route one inbound call and convert any failure into the reply string
pub async fn dispatch(gateway: &SyncGateway, call: &InboundCall) -> Option<String> {
    debug!(
        session_id = gateway.session_id(),
        method = %call.method,
        caller = %call.caller,
        payload_len = call.payload.len(),
        "Processing inbound call"
    );

    let outcome = match call.method.as_str() {
        AGENT_FLIP_FLASHCARD => learning::handle_flip_flash_card(gateway, call).await,
        AGENT_SUBMIT_QUIZ => learning::handle_submit_quiz(gateway, call).await,
        AGENT_JOIN_GROUP => community::handle_join_group(gateway, call).await,
        AGENT_RSVP_EVENT => community::handle_rsvp_event(gateway, call).await,
        AGENT_CREATE_EVENT => community::handle_create_event(gateway, call).await,
        AGENT_PROCESS_USER_INPUT => conversation::handle_process_user_input(gateway, call).await,
        other => Err(KnuutError::UnknownMethod(other.to_string())),
    };

    match outcome {
        Ok(reply) => reply,
        Err(e) => {
            match e.severity() {
                ErrorSeverity::Info => info!(method = %call.method, error = %e, "Inbound call rejected"),
                _ => warn!(
                    method = %call.method,
                    error = %e,
                    severity = %e.severity(),
                    recoverable = e.is_recoverable(),
                    "Inbound call failed"
                ),
            }
            Some(e.to_rpc_error())
        }
    }
}

/// Decode the JSON payload of an inbound call
pub(crate) fn parse_payload<T: DeserializeOwned>(call: &InboundCall) -> Result<T> {
    Ok(serde_json::from_slice(&call.payload)?)
}

pub(crate) fn success() -> HandlerResult {
    Ok(Some(SUCCESS.to_string()))
}
