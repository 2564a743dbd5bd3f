//! Group and event handlers

use crate::gateway::protocol::{CreateEventPayload, JoinGroupRequest, RsvpEventRequest};
use crate::gateway::{InboundCall, SyncGateway};
use crate::models::{CreateEventRequest, RsvpStatus};
use crate::utils::errors::KnuutError;
use crate::utils::helpers::{parse_event_date, parse_id};

use super::{parse_payload, success, HandlerResult};

/// Handle `agent.joinGroup`
pub async fn handle_join_group(gateway: &SyncGateway, call: &InboundCall) -> HandlerResult {
    let request: JoinGroupRequest = parse_payload(call)?;
    let group_id = parse_id("group_id", &request.group_id)?;
    let user_id = request
        .user_id
        .as_deref()
        .map(|user| parse_id("user_id", user))
        .transpose()?;

    gateway.join_group(group_id, user_id, &call.caller).await?;
    success()
}

/// Handle `agent.rsvpEvent`; a missing status means "going"
pub async fn handle_rsvp_event(gateway: &SyncGateway, call: &InboundCall) -> HandlerResult {
    let request: RsvpEventRequest = parse_payload(call)?;
    let event_id = parse_id("event_id", &request.event_id)?;
    let status = match request.status.as_deref() {
        Some(status) => status.parse::<RsvpStatus>()?,
        None => RsvpStatus::default(),
    };
    let user_id = request
        .user_id
        .as_deref()
        .map(|user| parse_id("user_id", user))
        .transpose()?;

    gateway.rsvp_event(event_id, status, user_id, &call.caller).await?;
    success()
}

/// Handle `agent.createEvent`; the new event is shown to the caller
pub async fn handle_create_event(gateway: &SyncGateway, call: &InboundCall) -> HandlerResult {
    let payload: CreateEventPayload = parse_payload(call)?;
    if payload.title.trim().is_empty() {
        return Err(KnuutError::InvalidInput("title is required".to_string()));
    }

    let request = CreateEventRequest {
        title: payload.title.trim().to_string(),
        description: payload.description,
        event_date: parse_event_date(&payload.event_date)?,
        location_name: payload.location_name,
        location_lat: payload.location_lat,
        location_lng: payload.location_lng,
        group_id: payload
            .group_id
            .as_deref()
            .map(|group| parse_id("group_id", group))
            .transpose()?,
        created_by: gateway.user_id(),
    };

    gateway.create_event_for(request, Some(&call.caller)).await;
    success()
}
