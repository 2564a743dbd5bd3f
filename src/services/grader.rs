//! Quiz grading
//!
//! Grading is pure: it scores the submitted answers and lists the misses.
//! Turning misses into remediation flash cards is left to the caller.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Quiz, QuizAnswer, QuizQuestion};

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionResult {
    pub question: QuizQuestion,
    pub selected: Option<QuizAnswer>,
    pub correct: Option<QuizAnswer>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeResult {
    pub quiz_id: Uuid,
    pub results: Vec<QuestionResult>,
    pub correct_count: usize,
}

/// Score `submitted` (question id -> answer id) against `quiz`
pub fn grade(quiz: &Quiz, submitted: &HashMap<Uuid, Uuid>) -> GradeResult {
    let results: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .map(|question| {
            let selected = submitted
                .get(&question.id)
                .and_then(|answer_id| question.answer(*answer_id))
                .cloned();
            let correct = question.correct_answer().cloned();
            let is_correct = matches!(
                (&selected, &correct),
                (Some(selected), Some(correct)) if selected.id == correct.id
            );

            QuestionResult {
                question: question.clone(),
                selected,
                correct,
                is_correct,
            }
        })
        .collect();

    let correct_count = results.iter().filter(|result| result.is_correct).count();

    GradeResult {
        quiz_id: quiz.id,
        results,
        correct_count,
    }
}

impl GradeResult {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Fraction of questions answered correctly; an empty quiz scores 0
    pub fn score(&self) -> f64 {
        if self.results.is_empty() {
            0.0
        } else {
            self.correct_count as f64 / self.results.len() as f64
        }
    }

    pub fn misses(&self) -> impl Iterator<Item = &QuestionResult> {
        self.results.iter().filter(|result| !result.is_correct)
    }

    /// `(question, correct answer)` pairs to teach again
    pub fn remediation_cards(&self) -> Vec<(String, String)> {
        self.misses()
            .filter_map(|result| {
                result
                    .correct
                    .as_ref()
                    .map(|correct| (result.question.text.clone(), correct.text.clone()))
            })
            .collect()
    }

    /// Spoken summary followed by per-question feedback
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "You got {} out of {} questions correct.",
            self.correct_count,
            self.total()
        );

        if self.total() > 0 && self.correct_count == self.total() {
            summary.push_str(" Perfect score, excellent work!");
        }

        for (index, result) in self.results.iter().enumerate() {
            let number = index + 1;
            let line = match (&result.selected, &result.correct) {
                _ if result.is_correct => format!(" Question {}: correct!", number),
                (None, Some(correct)) => format!(
                    " Question {}: not answered. The correct answer is {}.",
                    number, correct.text
                ),
                (Some(selected), Some(correct)) => format!(
                    " Question {}: you answered {}, but the correct answer is {}.",
                    number, selected.text, correct.text
                ),
                (_, None) => format!(" Question {}: no correct answer is defined.", number),
            };
            summary.push_str(&line);
        }

        if self.misses().next().is_some() {
            summary.push_str(" I've made flash cards for the ones you missed.");
        }

        summary
    }
}
