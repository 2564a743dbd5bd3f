//! Flash card model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashCard {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub is_flipped: bool,
}

impl FlashCard {
    pub fn new(id: Uuid, question: String, answer: String) -> Self {
        Self {
            id,
            question,
            answer,
            is_flipped: false,
        }
    }

    /// The side currently facing the learner
    pub fn visible_side(&self) -> &str {
        if self.is_flipped {
            &self.answer
        } else {
            &self.question
        }
    }
}
