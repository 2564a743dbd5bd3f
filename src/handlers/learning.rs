//! Flash card and quiz handlers

use std::collections::HashMap;

use uuid::Uuid;

use crate::gateway::protocol::{FlipFlashCardRequest, SubmitQuizRequest};
use crate::gateway::{InboundCall, SyncGateway};
use crate::utils::helpers::parse_id;

use super::{parse_payload, success, HandlerResult};

/// Handle `agent.flipFlashCard`
pub async fn handle_flip_flash_card(gateway: &SyncGateway, call: &InboundCall) -> HandlerResult {
    let request: FlipFlashCardRequest = parse_payload(call)?;
    let card_id = parse_id("id", &request.id)?;

    gateway.flip_flash_card(card_id).await?;
    success()
}

/// Handle `agent.submitQuiz`; the spoken summary is the reply, so nothing is returned
pub async fn handle_submit_quiz(gateway: &SyncGateway, call: &InboundCall) -> HandlerResult {
    let request: SubmitQuizRequest = parse_payload(call)?;
    let quiz_id = parse_id("id", &request.id)?;

    let answers = request
        .answers
        .iter()
        .map(|(question, answer)| {
            Ok((
                parse_id("question id", question)?,
                parse_id("answer id", answer)?,
            ))
        })
        .collect::<crate::utils::errors::Result<HashMap<Uuid, Uuid>>>()?;

    gateway.submit_quiz(quiz_id, &answers, &call.caller).await?;
    Ok(None)
}
