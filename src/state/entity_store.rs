//! Per-session entity store
//!
//! Holds the flash cards, quizzes, groups and events of one session in
//! insertion order, which is also display order. The store exclusively owns
//! its records; callers get clones or shared borrows.
//!
//! Membership and RSVP bookkeeping is kept here too so that count changes
//! happen in the same critical section as the idempotence check.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    CreateEventRequest, CreateGroupRequest, Event, FlashCard, Group, NewQuizQuestion, Quiz,
    QuizAnswer, QuizQuestion, RsvpStatus,
};
use crate::services::grader::{self, GradeResult};
use crate::utils::errors::{KnuutError, Result};
use crate::utils::helpers::{generate_id, normalize_group_type};

#[derive(Debug, Default)]
pub struct EntityStore {
    flash_cards: Vec<FlashCard>,
    quizzes: Vec<Quiz>,
    groups: Vec<Group>,
    events: Vec<Event>,
    members: HashMap<Uuid, HashSet<String>>,
    rsvps: HashMap<Uuid, HashMap<String, RsvpStatus>>,
}

/// Outcome of recording a membership or RSVP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountUpdate {
    pub count: i64,
    pub changed: bool,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Flash cards

    pub fn add_flash_card(&mut self, question: &str, answer: &str) -> FlashCard {
        let card = FlashCard::new(generate_id(), question.to_string(), answer.to_string());
        self.flash_cards.push(card.clone());
        card
    }

    pub fn get_flash_card(&self, card_id: Uuid) -> Option<&FlashCard> {
        self.flash_cards.iter().find(|card| card.id == card_id)
    }

    pub fn flash_card_index(&self, card_id: Uuid) -> Option<usize> {
        self.flash_cards.iter().position(|card| card.id == card_id)
    }

    pub fn flip_flash_card(&mut self, card_id: Uuid) -> Option<FlashCard> {
        let card = self.flash_cards.iter_mut().find(|card| card.id == card_id)?;
        card.is_flipped = !card.is_flipped;
        Some(card.clone())
    }

    pub fn flash_cards(&self) -> &[FlashCard] {
        &self.flash_cards
    }

    // Quizzes

    /// Build a quiz with fresh ids, rejecting questions without exactly one correct answer
    pub fn add_quiz(&mut self, questions: Vec<NewQuizQuestion>) -> Result<Quiz> {
        for (index, question) in questions.iter().enumerate() {
            if question.answers.is_empty() {
                return Err(KnuutError::InvalidQuiz(format!(
                    "question {} has no answers",
                    index + 1
                )));
            }
            let correct = question.correct_count();
            if correct != 1 {
                return Err(KnuutError::InvalidQuiz(format!(
                    "question {} has {} correct answers, expected exactly one",
                    index + 1,
                    correct
                )));
            }
        }

        let quiz = Quiz {
            id: generate_id(),
            questions: questions
                .into_iter()
                .map(|question| QuizQuestion {
                    id: generate_id(),
                    text: question.text,
                    answers: question
                        .answers
                        .into_iter()
                        .map(|answer| QuizAnswer {
                            id: generate_id(),
                            text: answer.text,
                            is_correct: answer.is_correct,
                        })
                        .collect(),
                })
                .collect(),
        };

        self.quizzes.push(quiz.clone());
        Ok(quiz)
    }

    pub fn get_quiz(&self, quiz_id: Uuid) -> Option<&Quiz> {
        self.quizzes.iter().find(|quiz| quiz.id == quiz_id)
    }

    /// Grade a submission; unknown quiz ids are an error, not an empty result
    pub fn check_quiz_answers(
        &self,
        quiz_id: Uuid,
        answers: &HashMap<Uuid, Uuid>,
    ) -> Result<GradeResult> {
        let quiz = self
            .get_quiz(quiz_id)
            .ok_or(KnuutError::QuizNotFound { quiz_id })?;
        Ok(grader::grade(quiz, answers))
    }

    // Groups

    pub fn add_group(&mut self, request: &CreateGroupRequest) -> Group {
        let group = Group {
            id: generate_id(),
            name: request.name.clone(),
            description: request.description.clone(),
            group_type: normalize_group_type(&request.group_type),
            location_name: request.location_name.clone(),
            coordinates: request.coordinates(),
            member_count: 0,
            created_by: request.created_by,
            created_at: Utc::now(),
        };
        self.groups.push(group.clone());
        group
    }

    pub fn get_group(&self, group_id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Insert or refresh a group seen in a search result
    pub fn merge_group(&mut self, group: Group) {
        match self.groups.iter_mut().find(|existing| existing.id == group.id) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
    }

    /// Record `member` as joined; a repeated join leaves the count unchanged
    pub fn record_membership(&mut self, group_id: Uuid, member: &str) -> Option<CountUpdate> {
        let group = self.groups.iter_mut().find(|group| group.id == group_id)?;
        let changed = self
            .members
            .entry(group_id)
            .or_default()
            .insert(member.to_string());
        if changed {
            group.member_count += 1;
        }
        Some(CountUpdate {
            count: group.member_count,
            changed,
        })
    }

    /// Record `member` as joined and take `stored` as the group's member count
    pub fn apply_stored_membership(
        &mut self,
        group_id: Uuid,
        member: &str,
        stored: i64,
    ) -> Option<CountUpdate> {
        let group = self.groups.iter_mut().find(|group| group.id == group_id)?;
        self.members
            .entry(group_id)
            .or_default()
            .insert(member.to_string());
        Some(replace_count(&mut group.member_count, stored))
    }

    // Events

    pub fn add_event(&mut self, request: &CreateEventRequest) -> Event {
        let event = Event {
            id: generate_id(),
            title: request.title.clone(),
            description: request.description.clone(),
            event_date: request.event_date,
            location_name: request.location_name.clone(),
            coordinates: request.coordinates(),
            group_id: request.group_id,
            rsvp_count: 0,
            created_by: request.created_by,
            created_at: Utc::now(),
        };
        self.events.push(event.clone());
        event
    }

    pub fn get_event(&self, event_id: Uuid) -> Option<&Event> {
        self.events.iter().find(|event| event.id == event_id)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn merge_event(&mut self, event: Event) {
        match self.events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    /// Record an RSVP; only `going` counts, and moving away from it decrements
    pub fn record_rsvp(
        &mut self,
        event_id: Uuid,
        member: &str,
        status: RsvpStatus,
    ) -> Option<CountUpdate> {
        let event = self.events.iter_mut().find(|event| event.id == event_id)?;
        let previous = self
            .rsvps
            .entry(event_id)
            .or_default()
            .insert(member.to_string(), status);

        let was_going = previous == Some(RsvpStatus::Going);
        let is_going = status == RsvpStatus::Going;
        let changed = was_going != is_going;
        if changed {
            event.rsvp_count += if is_going { 1 } else { -1 };
            event.rsvp_count = event.rsvp_count.max(0);
        }

        Some(CountUpdate {
            count: event.rsvp_count,
            changed,
        })
    }

    /// Record an RSVP and take `stored` as the event's `going` count
    pub fn apply_stored_rsvp(
        &mut self,
        event_id: Uuid,
        member: &str,
        status: RsvpStatus,
        stored: i64,
    ) -> Option<CountUpdate> {
        let event = self.events.iter_mut().find(|event| event.id == event_id)?;
        self.rsvps
            .entry(event_id)
            .or_default()
            .insert(member.to_string(), status);
        Some(replace_count(&mut event.rsvp_count, stored))
    }
}

fn replace_count(count: &mut i64, stored: i64) -> CountUpdate {
    let stored = stored.max(0);
    let changed = *count != stored;
    *count = stored;
    CountUpdate { count: stored, changed }
}
