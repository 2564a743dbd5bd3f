//! Quiz model
//!
//! A quiz owns its questions and every question owns its answers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub id: Uuid,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub text: String,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub questions: Vec<QuizQuestion>,
}

/// Answer option as supplied by the language model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuizAnswer {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Question as supplied by the language model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuizQuestion {
    pub text: String,
    #[serde(default)]
    pub answers: Vec<NewQuizAnswer>,
}

impl QuizQuestion {
    pub fn answer(&self, answer_id: Uuid) -> Option<&QuizAnswer> {
        self.answers.iter().find(|answer| answer.id == answer_id)
    }

    pub fn correct_answer(&self) -> Option<&QuizAnswer> {
        self.answers.iter().find(|answer| answer.is_correct)
    }
}

impl Quiz {
    pub fn question(&self, question_id: Uuid) -> Option<&QuizQuestion> {
        self.questions.iter().find(|question| question.id == question_id)
    }
}

impl NewQuizAnswer {
    pub fn new(text: &str, is_correct: bool) -> Self {
        Self {
            text: text.to_string(),
            is_correct,
        }
    }
}

impl NewQuizQuestion {
    pub fn new(text: &str, answers: Vec<NewQuizAnswer>) -> Self {
        Self {
            text: text.to_string(),
            answers,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_correct).count()
    }
}
