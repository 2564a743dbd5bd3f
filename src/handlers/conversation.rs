//! Free text handler

use crate::gateway::protocol::ProcessUserInputRequest;
use crate::gateway::{InboundCall, SyncGateway};
use crate::utils::errors::KnuutError;
use crate::utils::helpers::normalize_whitespace;

use super::{parse_payload, success, HandlerResult};

/// Handle `agent.processUserInput`
pub async fn handle_process_user_input(gateway: &SyncGateway, call: &InboundCall) -> HandlerResult {
    let request: ProcessUserInputRequest = parse_payload(call)?;
    let text = normalize_whitespace(&request.text);
    if text.is_empty() {
        return Err(KnuutError::InvalidInput("text is required".to_string()));
    }

    gateway.process_user_input(&text).await?;
    success()
}
