//! Wire protocol between the agent and the client
//!
//! Outbound payloads are JSON objects tagged by `action`. Inbound payloads
//! are the JSON bodies of the `agent.*` methods.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Event, FlashCard, Group, Quiz};

pub const CLIENT_FLASHCARD: &str = "client.flashcard";
pub const CLIENT_QUIZ: &str = "client.quiz";
pub const CLIENT_GROUP: &str = "client.group";
pub const CLIENT_EVENT: &str = "client.event";

pub const AGENT_FLIP_FLASHCARD: &str = "agent.flipFlashCard";
pub const AGENT_SUBMIT_QUIZ: &str = "agent.submitQuiz";
pub const AGENT_JOIN_GROUP: &str = "agent.joinGroup";
pub const AGENT_RSVP_EVENT: &str = "agent.rsvpEvent";
pub const AGENT_CREATE_EVENT: &str = "agent.createEvent";
pub const AGENT_PROCESS_USER_INPUT: &str = "agent.processUserInput";

pub const SUCCESS: &str = "success";

// Outbound

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FlashCardPush {
    Show {
        id: Uuid,
        question: String,
        answer: String,
        index: usize,
    },
    Flip {
        id: Uuid,
    },
    Hide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum QuizPush {
    Show {
        id: Uuid,
        questions: Vec<QuizQuestionView>,
    },
    Hide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GroupPush {
    Show(GroupView),
    ShowList { groups: Vec<GroupView> },
    Hide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EventPush {
    Show(EventView),
    ShowList { events: Vec<EventView> },
    Hide,
}

/// Question as shown to the client, without the correctness flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestionView {
    pub id: Uuid,
    pub text: String,
    pub answers: Vec<QuizAnswerView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizAnswerView {
    pub id: Uuid,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub group_type: String,
    pub location_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location_name: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub group_id: Option<Uuid>,
    pub rsvp_count: i64,
    pub created_at: DateTime<Utc>,
}

impl FlashCardPush {
    pub fn show(card: &FlashCard, index: usize) -> Self {
        FlashCardPush::Show {
            id: card.id,
            question: card.question.clone(),
            answer: card.answer.clone(),
            index,
        }
    }
}

impl QuizPush {
    pub fn show(quiz: &Quiz) -> Self {
        QuizPush::Show {
            id: quiz.id,
            questions: quiz
                .questions
                .iter()
                .map(|question| QuizQuestionView {
                    id: question.id,
                    text: question.text.clone(),
                    answers: question
                        .answers
                        .iter()
                        .map(|answer| QuizAnswerView {
                            id: answer.id,
                            text: answer.text.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<&Group> for GroupView {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            description: group.description.clone(),
            group_type: group.group_type.clone(),
            location_name: group.location_name.clone(),
            location_lat: group.coordinates.map(|c| c.lat),
            location_lng: group.coordinates.map(|c| c.lng),
            member_count: group.member_count,
            created_at: group.created_at,
        }
    }
}

impl From<&Event> for EventView {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            event_date: event.event_date,
            location_name: event.location_name.clone(),
            location_lat: event.coordinates.map(|c| c.lat),
            location_lng: event.coordinates.map(|c| c.lng),
            group_id: event.group_id,
            rsvp_count: event.rsvp_count,
            created_at: event.created_at,
        }
    }
}

// Inbound

#[derive(Debug, Clone, Deserialize)]
pub struct FlipFlashCardRequest {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQuizRequest {
    pub id: String,
    /// Question id -> chosen answer id
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinGroupRequest {
    pub group_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RsvpEventRequest {
    pub event_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
    #[serde(default)]
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessUserInputRequest {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuizAnswer, QuizQuestion};
    use serde_json::{json, Value};

    #[test]
    fn test_flash_card_show_payload() {
        let card = FlashCard::new(Uuid::nil(), "Hei".to_string(), "Hello".to_string());
        let payload = serde_json::to_value(FlashCardPush::show(&card, 2)).unwrap();
        assert_eq!(
            payload,
            json!({
                "action": "show",
                "id": Uuid::nil(),
                "question": "Hei",
                "answer": "Hello",
                "index": 2
            })
        );
    }

    #[test]
    fn test_quiz_payload_hides_correctness() {
        let quiz = Quiz {
            id: Uuid::new_v4(),
            questions: vec![QuizQuestion {
                id: Uuid::new_v4(),
                text: "What does 'Hei' mean?".to_string(),
                answers: vec![QuizAnswer {
                    id: Uuid::new_v4(),
                    text: "Hello".to_string(),
                    is_correct: true,
                }],
            }],
        };
        let payload = serde_json::to_value(QuizPush::show(&quiz)).unwrap();
        assert_eq!(payload["action"], "show");
        let answer = &payload["questions"][0]["answers"][0];
        assert_eq!(answer["text"], "Hello");
        assert!(answer.get("is_correct").is_none());
    }

    #[test]
    fn test_list_payloads_use_plural_keys() {
        let groups = serde_json::to_value(GroupPush::ShowList { groups: vec![] }).unwrap();
        assert_eq!(groups, json!({"action": "show_list", "groups": []}));
        let events = serde_json::to_value(EventPush::ShowList { events: vec![] }).unwrap();
        assert_eq!(events["events"], Value::Array(vec![]));
    }

    #[test]
    fn test_inbound_payloads() {
        let rsvp: RsvpEventRequest =
            serde_json::from_str(r#"{"event_id":"abc","status":"maybe"}"#).unwrap();
        assert_eq!(rsvp.status.as_deref(), Some("maybe"));
        assert!(rsvp.user_id.is_none());

        let missing = serde_json::from_str::<JoinGroupRequest>("{}").unwrap_err();
        assert!(missing.to_string().contains("group_id"));
    }
}
