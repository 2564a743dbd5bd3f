//! Group and event flows with an in-memory community store

mod helpers;

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use helpers::*;
use knuut_agent::database::CommunityStore;
use knuut_agent::gateway::{EventSearch, GroupSearch};
use knuut_agent::models::RsvpStatus;

#[tokio::test]
async fn test_join_after_create_counts_one_member() {
    let ctx = TestContext::new_with_config(TestConfig {
        with_user: true,
        ..TestConfig::default()
    })
    .await;
    let by_type = || GroupSearch {
        group_type: Some("mothers_with_kids".to_string()),
        ..GroupSearch::default()
    };

    let outcome = ctx
        .gateway
        .create_group(group_request("Mums Kajaani", "Mothers with kids", KAJAANI))
        .await;
    assert!(outcome.value.is_persisted());
    assert_eq!(outcome.message, "Group 'Mums Kajaani' created and displayed!");

    let group = outcome.value.into_inner();
    assert_eq!(group.group_type, "mothers_with_kids");
    assert_eq!(group.created_by, ctx.user_id);

    let shown = ctx.transport.last_call("client.group").unwrap();
    assert_eq!(shown.payload["action"], "show");
    assert_eq!(shown.payload["name"], "Mums Kajaani");
    assert_eq!(shown.payload["member_count"], 0);

    let before = ctx.gateway.find_groups(by_type()).await.value;
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].id, group.id);
    assert_eq!(before[0].member_count, 0);

    let reply = ctx
        .call("agent.joinGroup", json!({ "group_id": group.id.to_string() }))
        .await;
    assert_eq!(reply.as_deref(), Some("success"));
    assert_eq!(ctx.gateway.group(group.id).await.unwrap().member_count, 1);

    let after = ctx.gateway.find_groups(by_type()).await.value;
    assert_eq!(after[0].member_count, 1);
    assert_eq!(ctx.store().membership_rows(group.id).await, 1);
}

#[tokio::test]
async fn test_joining_twice_is_idempotent() {
    let ctx = TestContext::new_with_config(TestConfig {
        with_user: true,
        ..TestConfig::default()
    })
    .await;
    let group = ctx
        .gateway
        .create_group(group_request("Kielikahvila", "language exchange", HELSINKI))
        .await
        .value
        .into_inner();

    let first = ctx.gateway.join_group(group.id, None, &ctx.client).await.unwrap();
    let second = ctx.gateway.join_group(group.id, None, &ctx.client).await.unwrap();

    assert!(first.changed);
    assert!(!second.changed);
    assert_eq!(second.count, 1);
    assert_eq!(ctx.store().membership_rows(group.id).await, 1);
}

#[tokio::test]
async fn test_join_rejects_unknown_group_and_bad_payload() {
    let ctx = TestContext::new().await;

    let unknown = ctx
        .call("agent.joinGroup", json!({ "group_id": Uuid::new_v4().to_string() }))
        .await;
    assert_eq!(unknown.as_deref(), Some("error: group not found"));

    let missing = ctx.call("agent.joinGroup", json!({})).await.unwrap();
    assert!(missing.starts_with("error: invalid payload"));

    let bad_user = ctx
        .call(
            "agent.joinGroup",
            json!({ "group_id": Uuid::new_v4().to_string(), "user_id": "me" }),
        )
        .await;
    assert_eq!(bad_user.as_deref(), Some("error: invalid user_id: me"));
}

#[tokio::test]
async fn test_find_groups_filters_by_type_and_distance() {
    let ctx = TestContext::new().await;
    for (name, group_type, place) in [
        ("Helsinki talk", "Language Exchange", HELSINKI),
        ("Oulu talk", "language exchange", OULU),
        ("Helsinki runners", "sports", HELSINKI),
        ("Espoo talk", "language-exchange", ESPOO),
    ] {
        ctx.gateway
            .create_group(group_request(name, group_type, place))
            .await;
    }

    let found = ctx
        .gateway
        .find_groups(GroupSearch {
            group_type: Some("Language Exchange".to_string()),
            lat: Some(HELSINKI.0),
            lng: Some(HELSINKI.1),
            max_km: Some(30.0),
        })
        .await;

    let names: Vec<&str> = found.value.iter().map(|group| group.name.as_str()).collect();
    assert_eq!(names, vec!["Espoo talk", "Helsinki talk"]);
    assert_eq!(found.message, "Found 2 groups: Espoo talk, Helsinki talk.");

    let listed = ctx.transport.last_call("client.group").unwrap();
    assert_eq!(listed.payload["action"], "show_list");
    assert_eq!(listed.payload["groups"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_found_groups_can_be_joined() {
    let ctx = TestContext::new().await;

    // Stored by an earlier session, so this one only learns of it by searching
    let row = ctx
        .store()
        .create_group(&group_request("Oulu readers", "book club", OULU))
        .await
        .unwrap();

    let unseen = ctx.call("agent.joinGroup", json!({ "group_id": row.id.to_string() })).await;
    assert_eq!(unseen.as_deref(), Some("error: group not found"));

    let found = ctx.gateway.find_groups(GroupSearch::default()).await;
    assert_eq!(found.value.len(), 1);
    assert_eq!(found.message, "Found 1 group: Oulu readers.");

    let joined = ctx.call("agent.joinGroup", json!({ "group_id": row.id.to_string() })).await;
    assert_eq!(joined.as_deref(), Some("success"));
    assert_eq!(ctx.gateway.group(row.id).await.unwrap().member_count, 1);
}

#[tokio::test]
async fn test_rejoin_from_an_earlier_session_is_not_counted_twice() {
    let ctx = TestContext::new_with_config(TestConfig {
        with_user: true,
        ..TestConfig::default()
    })
    .await;
    let user = ctx.user_id.unwrap();

    // The user joined while talking to a previous session
    let row = ctx
        .store()
        .create_group(&group_request("Mums Kajaani", "Parent", KAJAANI))
        .await
        .unwrap();
    ctx.store().join_group(row.id, user).await.unwrap();

    let found = ctx.gateway.find_groups(GroupSearch::default()).await.value;
    assert_eq!(found[0].member_count, 1);

    let reply = ctx.call("agent.joinGroup", json!({ "group_id": row.id.to_string() })).await;
    assert_eq!(reply.as_deref(), Some("success"));
    assert_eq!(ctx.gateway.group(row.id).await.unwrap().member_count, 1);
    assert_eq!(ctx.store().membership_rows(row.id).await, 1);

    let update = ctx.gateway.join_group(row.id, None, &ctx.client).await.unwrap();
    assert!(!update.changed);
}

#[tokio::test]
async fn test_declining_a_stored_rsvp_lowers_the_count() {
    let ctx = TestContext::new_with_config(TestConfig {
        with_user: true,
        ..TestConfig::default()
    })
    .await;
    let user = ctx.user_id.unwrap();

    let row = ctx
        .store()
        .create_event(&event_request("Sauna evening", 3, None))
        .await
        .unwrap();
    ctx.store().rsvp_event(row.id, user, RsvpStatus::Going).await.unwrap();

    let found = ctx.gateway.find_events(EventSearch::default()).await.value;
    assert_eq!(found[0].rsvp_count, 1);

    let reply = ctx
        .call("agent.rsvpEvent", json!({ "event_id": row.id.to_string(), "status": "not_going" }))
        .await;
    assert_eq!(reply.as_deref(), Some("success"));
    assert_eq!(ctx.gateway.event(row.id).await.unwrap().rsvp_count, 0);

    let rows = ctx.store().rsvp_rows(row.id).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "not_going");
}

#[tokio::test]
async fn test_rsvp_counts_only_going() {
    let ctx = TestContext::new_with_config(TestConfig {
        with_user: true,
        ..TestConfig::default()
    })
    .await;
    let event = ctx
        .gateway
        .create_event(event_request("Sauna evening", 3, None))
        .await
        .value
        .into_inner();
    let id = event.id.to_string();

    let going = ctx.call("agent.rsvpEvent", json!({ "event_id": id })).await;
    assert_eq!(going.as_deref(), Some("success"));
    assert_eq!(ctx.gateway.event(event.id).await.unwrap().rsvp_count, 1);

    ctx.call("agent.rsvpEvent", json!({ "event_id": id, "status": "maybe" })).await;
    assert_eq!(ctx.gateway.event(event.id).await.unwrap().rsvp_count, 0);

    let rows = ctx.store().rsvp_rows(event.id).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "maybe");

    let invalid = ctx
        .call("agent.rsvpEvent", json!({ "event_id": id, "status": "perhaps" }))
        .await;
    assert_eq!(invalid.as_deref(), Some("error: invalid status: perhaps"));
}

#[tokio::test]
async fn test_create_event_from_client_is_shown_to_caller() {
    let ctx = TestContext::new().await;

    let reply = ctx
        .call_as(
            "kiosk",
            "agent.createEvent",
            json!({
                "title": "  Board games  ",
                "event_date": "2031-05-01T18:00",
                "location_name": "Kirjasto",
                "location_lat": HELSINKI.0,
                "location_lng": HELSINKI.1
            }),
        )
        .await;
    assert_eq!(reply.as_deref(), Some("success"));

    let shown = ctx.transport.last_call("client.event").unwrap();
    assert_eq!(shown.destination.as_str(), "kiosk");
    assert_eq!(shown.payload["action"], "show");
    assert_eq!(shown.payload["title"], "Board games");
    assert_eq!(shown.payload["rsvp_count"], 0);

    let found = ctx.gateway.find_events(EventSearch::default()).await;
    assert_eq!(found.value.len(), 1);
    assert_eq!(found.value[0].title, "Board games");
}

#[tokio::test]
async fn test_create_event_validates_payload() {
    let ctx = TestContext::new().await;

    let untitled = ctx
        .call("agent.createEvent", json!({ "title": " ", "event_date": "2031-05-01" }))
        .await;
    assert_eq!(untitled.as_deref(), Some("error: title is required"));

    let undated = ctx
        .call("agent.createEvent", json!({ "title": "Picnic", "event_date": "next friday" }))
        .await;
    assert_eq!(undated.as_deref(), Some("error: invalid event_date: next friday"));
    assert!(ctx.transport.calls_for("client.event").is_empty());
}

#[tokio::test]
async fn test_find_events_lists_upcoming_soonest_first() {
    let ctx = TestContext::new().await;
    let group = ctx
        .gateway
        .create_group(group_request("Choir", "music", HELSINKI))
        .await
        .value
        .into_inner();

    ctx.gateway.create_event(event_request("Concert", 10, Some(group.id))).await;
    ctx.gateway.create_event(event_request("Rehearsal", 2, Some(group.id))).await;
    ctx.gateway.create_event(event_request("Last season", -5, Some(group.id))).await;
    ctx.gateway.create_event(event_request("Unrelated", 1, None)).await;

    let found = ctx
        .gateway
        .find_events(EventSearch {
            group_id: Some(group.id),
            ..EventSearch::default()
        })
        .await;
    let titles: Vec<&str> = found.value.iter().map(|event| event.title.as_str()).collect();
    assert_eq!(titles, vec!["Rehearsal", "Concert"]);

    let listed = ctx.transport.last_call("client.event").unwrap();
    assert_eq!(listed.payload["action"], "show_list");
    assert_eq!(listed.payload["events"][0]["title"], "Rehearsal");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rsvps_are_all_counted() {
    let ctx = TestContext::new().await;
    let event = ctx
        .gateway
        .create_event(event_request("Midsummer party", 7, None))
        .await
        .value
        .into_inner();

    let attendees = 25;
    let mut tasks = Vec::new();
    for attendee in 0..attendees {
        let gateway = Arc::clone(&ctx.gateway);
        let payload = json!({
            "event_id": event.id.to_string(),
            "user_id": Uuid::new_v4().to_string(),
        });
        tasks.push(tokio::spawn(async move {
            let call = knuut_agent::InboundCall::new(
                "agent.rsvpEvent",
                format!("guest-{}", attendee),
                payload.to_string(),
            );
            gateway.handle_call(&call).await
        }));
    }

    for reply in futures::future::join_all(tasks).await {
        assert_eq!(reply.unwrap().as_deref(), Some("success"));
    }

    assert_eq!(ctx.gateway.event(event.id).await.unwrap().rsvp_count, attendees);
    assert_eq!(ctx.store().rsvp_rows(event.id).await.len(), attendees as usize);
}

#[tokio::test]
async fn test_close_records_session_usage() {
    let ctx = TestContext::new_with_config(TestConfig {
        with_user: true,
        ..TestConfig::default()
    })
    .await;
    let user = ctx.user_id.unwrap();

    assert_eq!(ctx.gateway.close().await, Some(1));
    assert_eq!(ctx.gateway.persistence().get_user_usage(user, None).await, 1);
    assert!(ctx.gateway.is_cancelled());
}
