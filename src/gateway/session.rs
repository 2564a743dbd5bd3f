//! Session synchronization gateway
//!
//! One `SyncGateway` serves one session. It owns the session's entity store,
//! mirrors community artifacts into the persistence adapter and pushes state
//! changes to the client.
//!
//! Outbound addressing is explicit: follow-ups of an inbound call go to its
//! caller, tool operations go to the participant bound with
//! [`SyncGateway::bind_participant`] or [`SyncGateway::wait_for_participant`].
//!
//! The entity store mutex is never held across an `.await`. Every suspension
//! point also races the session shutdown signal.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{GeoConfig, SessionConfig};
use crate::models::*;
use crate::services::geo::{self, GeoFilter};
use crate::services::grader::GradeResult;
use crate::services::persistence::PersistenceAdapter;
use crate::state::{CountUpdate, EntityStore};
use crate::utils::errors::{KnuutError, Result};
use crate::utils::helpers::{billable_minutes, format_event_date, normalize_group_type, truncate_text};
use crate::utils::logging::{log_community_action, log_outbound_push, log_session_event};

use super::protocol::*;
use super::transport::{Conversation, InboundCall, ParticipantId, Transport};

/// Where a created entity ended up
#[derive(Debug, Clone, PartialEq)]
pub enum Creation<T> {
    /// Session-local only; the store was unavailable or failed
    Local(T),
    /// Written to the store; the id is the store's id
    Persisted(T),
}

impl<T> Creation<T> {
    pub fn value(&self) -> &T {
        match self {
            Creation::Local(value) | Creation::Persisted(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Creation::Local(value) | Creation::Persisted(value) => value,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Creation::Persisted(_))
    }
}

/// Result of a voice-triggered tool call plus the text relayed to the user
#[derive(Debug, Clone)]
pub struct ToolOutcome<T> {
    pub value: T,
    pub message: String,
}

/// Panel of the client UI a tool can clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    FlashCard,
    Quiz,
    Group,
    Event,
}

impl Panel {
    fn label(self) -> &'static str {
        match self {
            Panel::FlashCard => "flash card",
            Panel::Quiz => "quiz",
            Panel::Group => "group panel",
            Panel::Event => "event panel",
        }
    }
}

/// Arguments of a group search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupSearch {
    pub group_type: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub max_km: Option<f64>,
}

/// Arguments of an event search
#[derive(Debug, Clone, Deserialize)]
pub struct EventSearch {
    pub group_id: Option<Uuid>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub max_km: Option<f64>,
    #[serde(default = "upcoming_default")]
    pub upcoming_only: bool,
}

fn upcoming_default() -> bool {
    true
}

impl Default for EventSearch {
    fn default() -> Self {
        Self {
            group_id: None,
            lat: None,
            lng: None,
            max_km: None,
            upcoming_only: true,
        }
    }
}

pub struct SyncGateway {
    session_id: String,
    user_id: Option<Uuid>,
    config: SessionConfig,
    default_max_km: f64,
    entities: Mutex<EntityStore>,
    // Held across a join or RSVP write and its count update, so stored counts apply in write order
    community_writes: Mutex<()>,
    persistence: PersistenceAdapter,
    transport: Arc<dyn Transport>,
    conversation: Arc<dyn Conversation>,
    participant: RwLock<Option<ParticipantId>>,
    shutdown: watch::Sender<bool>,
    started_at: Instant,
}

impl SyncGateway {
    pub fn new(
        session_id: impl Into<String>,
        config: SessionConfig,
        geo: GeoConfig,
        persistence: PersistenceAdapter,
        transport: Arc<dyn Transport>,
        conversation: Arc<dyn Conversation>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        let session_id = session_id.into();
        log_session_event(&session_id, "started", persistence.backend());

        Self {
            session_id,
            user_id: config.user_id,
            default_max_km: geo.default_max_distance_km,
            config,
            entities: Mutex::new(EntityStore::new()),
            community_writes: Mutex::new(()),
            persistence,
            transport,
            conversation,
            participant: RwLock::new(None),
            shutdown,
            started_at: Instant::now(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn persistence(&self) -> &PersistenceAdapter {
        &self.persistence
    }

    // Participant binding

    /// Address tool pushes to `participant` from now on
    pub async fn bind_participant(&self, participant: ParticipantId) {
        info!(session_id = %self.session_id, participant = %participant, "Participant bound");
        *self.participant.write().await = Some(participant);
    }

    pub async fn participant(&self) -> Option<ParticipantId> {
        self.participant.read().await.clone()
    }

    /// Poll the room until `identity` is present, then bind it
    pub async fn wait_for_participant(&self, identity: &ParticipantId) -> Result<ParticipantId> {
        let deadline = tokio::time::Instant::now() + self.config.participant_wait();

        loop {
            let present = self.until_cancelled(self.transport.remote_participants()).await?;
            if present.contains(identity) {
                self.bind_participant(identity.clone()).await;
                return Ok(identity.clone());
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                warn!(session_id = %self.session_id, participant = %identity, "Participant did not join in time");
                return Err(KnuutError::Timeout(format!(
                    "participant {} did not join",
                    identity
                )));
            }

            let pause = self.config.participant_poll().min(deadline - now);
            self.until_cancelled(tokio::time::sleep(pause)).await?;
        }
    }

    // Cancellation

    /// Signal every pending wait and push of this session to stop
    pub fn cancel(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.shutdown.borrow()
    }

    async fn cancelled(&self) {
        let mut shutdown = self.shutdown.subscribe();
        let signalled = shutdown.wait_for(|stopped| *stopped).await.is_ok();
        if !signalled {
            std::future::pending::<()>().await;
        }
    }

    async fn until_cancelled<F: Future>(&self, future: F) -> Result<F::Output> {
        tokio::select! {
            output = future => Ok(output),
            _ = self.cancelled() => Err(KnuutError::Cancelled),
        }
    }

    // Outbound

    async fn push<P: Serialize>(
        &self,
        destination: &ParticipantId,
        method: &str,
        payload: &P,
    ) -> Result<()> {
        let body = serde_json::to_string(payload)?;
        let call = tokio::time::timeout(
            self.config.rpc_timeout(),
            self.transport.perform_rpc(destination, method, body),
        );

        let outcome = match self.until_cancelled(call).await {
            Ok(Ok(reply)) => reply.map(|_| ()),
            Ok(Err(_)) => Err(KnuutError::Timeout(format!("{} to {}", method, destination))),
            Err(e) => Err(e),
        };

        let details = outcome.as_ref().err().map(ToString::to_string);
        log_outbound_push(method, destination.as_str(), outcome.is_ok(), details.as_deref());
        outcome
    }

    /// Push to `to`, or to the bound participant when `to` is `None`
    async fn deliver<P: Serialize>(
        &self,
        to: Option<&ParticipantId>,
        method: &str,
        payload: &P,
    ) -> Result<()> {
        match to {
            Some(destination) => self.push(destination, method, payload).await,
            None => {
                let destination = self.participant().await.ok_or(KnuutError::NoParticipant)?;
                self.push(&destination, method, payload).await
            }
        }
    }

    async fn speak(&self, text: &str) {
        match self.until_cancelled(self.conversation.say(text)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) | Err(e) => warn!(session_id = %self.session_id, error = %e, "Failed to speak"),
        }
    }

    // Learning artifacts

    async fn add_flash_card(&self, question: &str, answer: &str) -> (FlashCard, usize) {
        let mut entities = self.entities.lock().await;
        let card = entities.add_flash_card(question, answer);
        let index = entities.flash_card_index(card.id).unwrap_or_default();
        (card, index)
    }

    /// Create a flash card and show it to the bound participant
    pub async fn create_flash_card(&self, question: &str, answer: &str) -> ToolOutcome<FlashCard> {
        let (card, index) = self.add_flash_card(question, answer).await;
        log_session_event(
            &self.session_id,
            "flash_card_created",
            Some(&truncate_text(question, 60)),
        );

        let message = match self.deliver(None, CLIENT_FLASHCARD, &FlashCardPush::show(&card, index)).await {
            Ok(()) => format!("Flashcard created and displayed! Question: '{}'", question),
            Err(e) => delivery_warning("a flash card", &e),
        };

        ToolOutcome { value: card, message }
    }

    /// Create a quiz and show it to the bound participant
    pub async fn create_quiz(&self, questions: Vec<NewQuizQuestion>) -> ToolOutcome<Option<Quiz>> {
        if questions.is_empty() {
            return ToolOutcome {
                value: None,
                message: "Error: a quiz needs at least one question.".to_string(),
            };
        }

        let created = self.entities.lock().await.add_quiz(questions);
        let quiz = match created {
            Ok(quiz) => quiz,
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "Rejected quiz");
                return ToolOutcome {
                    value: None,
                    message: format!("Error creating quiz: {}", e),
                };
            }
        };
        log_session_event(&self.session_id, "quiz_created", None);

        let message = match self.deliver(None, CLIENT_QUIZ, &QuizPush::show(&quiz)).await {
            Ok(()) => format!(
                "Quiz created and displayed! It has {} questions. Answer them when you're ready!",
                quiz.questions.len()
            ),
            Err(e) => delivery_warning("a quiz", &e),
        };

        ToolOutcome { value: Some(quiz), message }
    }

    /// Toggle a flash card; optionally speak the side now facing the learner
    pub async fn flip_flash_card(&self, card_id: Uuid) -> Result<FlashCard> {
        let flipped = self.entities.lock().await.flip_flash_card(card_id);
        let Some(card) = flipped else {
            warn!(session_id = %self.session_id, card_id = %card_id, "Flash card not found");
            return Err(KnuutError::FlashCardNotFound { card_id });
        };

        debug!(card_id = %card.id, is_flipped = card.is_flipped, "Flash card flipped");
        if self.config.speak_flipped_cards {
            self.speak(card.visible_side()).await;
        }
        Ok(card)
    }

    /// Flip a card from the tutor's side and turn it over on the client
    pub async fn turn_flash_card(&self, card_id: Uuid) -> Result<ToolOutcome<FlashCard>> {
        let card = self.flip_flash_card(card_id).await?;
        let message = match self
            .deliver(None, CLIENT_FLASHCARD, &FlashCardPush::Flip { id: card.id })
            .await
        {
            Ok(()) => format!("Flipped the flash card. It now shows '{}'.", card.visible_side()),
            Err(e) => format!("Flipped the flash card but couldn't update the screen: {}", e),
        };
        Ok(ToolOutcome { value: card, message })
    }

    /// Clear one panel of the client UI; session state is left as is
    pub async fn hide_panel(&self, panel: Panel) -> ToolOutcome<()> {
        let hidden = match panel {
            Panel::FlashCard => self.deliver(None, CLIENT_FLASHCARD, &FlashCardPush::Hide).await,
            Panel::Quiz => self.deliver(None, CLIENT_QUIZ, &QuizPush::Hide).await,
            Panel::Group => self.deliver(None, CLIENT_GROUP, &GroupPush::Hide).await,
            Panel::Event => self.deliver(None, CLIENT_EVENT, &EventPush::Hide).await,
        };
        let message = match hidden {
            Ok(()) => format!("The {} is hidden.", panel.label()),
            Err(e) => format!("Couldn't hide the {}: {}", panel.label(), e),
        };
        ToolOutcome { value: (), message }
    }

    /// Grade a submission, teach the misses as flash cards and speak the summary
    pub async fn submit_quiz(
        &self,
        quiz_id: Uuid,
        answers: &HashMap<Uuid, Uuid>,
        caller: &ParticipantId,
    ) -> Result<GradeResult> {
        let graded = self.entities.lock().await.check_quiz_answers(quiz_id, answers);
        let result = graded.map_err(|e| {
            warn!(session_id = %self.session_id, quiz_id = %quiz_id, "Quiz not found");
            e
        })?;

        for (question, answer) in result.remediation_cards() {
            let (card, index) = self.add_flash_card(&question, &answer).await;
            if let Err(e) = self
                .deliver(Some(caller), CLIENT_FLASHCARD, &FlashCardPush::show(&card, index))
                .await
            {
                warn!(session_id = %self.session_id, card_id = %card.id, error = %e, "Remediation card not shown");
            }
        }

        self.speak(&result.summary()).await;
        log_session_event(
            &self.session_id,
            "quiz_submitted",
            Some(&format!("{}/{}", result.correct_count, result.total())),
        );
        Ok(result)
    }

    // Community artifacts

    async fn persist_group(&self, mut request: CreateGroupRequest) -> Creation<Group> {
        request.created_by = request.created_by.or(self.user_id);
        let stored = self
            .until_cancelled(self.persistence.create_group(&request))
            .await
            .ok()
            .flatten();

        let creation = match stored {
            Some(row) => {
                let group = Group::from(row);
                self.entities.lock().await.merge_group(group.clone());
                Creation::Persisted(group)
            }
            None => Creation::Local(self.entities.lock().await.add_group(&request)),
        };

        log_community_action(
            &creation.value().id.to_string(),
            "create_group",
            None,
            creation.is_persisted(),
        );
        creation
    }

    async fn persist_event(&self, mut request: CreateEventRequest) -> Creation<Event> {
        request.created_by = request.created_by.or(self.user_id);
        let stored = self
            .until_cancelled(self.persistence.create_event(&request))
            .await
            .ok()
            .flatten();

        let creation = match stored {
            Some(row) => {
                let event = Event::from(row);
                self.entities.lock().await.merge_event(event.clone());
                Creation::Persisted(event)
            }
            None => Creation::Local(self.entities.lock().await.add_event(&request)),
        };

        log_community_action(
            &creation.value().id.to_string(),
            "create_event",
            None,
            creation.is_persisted(),
        );
        creation
    }

    /// Create a group and show it to the bound participant
    pub async fn create_group(&self, request: CreateGroupRequest) -> ToolOutcome<Creation<Group>> {
        let creation = self.persist_group(request).await;
        let group = creation.value();

        let mut message = match self
            .deliver(None, CLIENT_GROUP, &GroupPush::Show(GroupView::from(group)))
            .await
        {
            Ok(()) => format!("Group '{}' created and displayed!", group.name),
            Err(e) => delivery_warning(&format!("the group '{}'", group.name), &e),
        };
        if !creation.is_persisted() {
            message.push_str(" It is saved for this session only.");
        }

        ToolOutcome { value: creation, message }
    }

    /// Create an event and show it to the bound participant
    pub async fn create_event(&self, request: CreateEventRequest) -> ToolOutcome<Creation<Event>> {
        self.create_event_for(request, None).await
    }

    /// Create an event and show it to `to`, or to the bound participant
    pub async fn create_event_for(
        &self,
        request: CreateEventRequest,
        to: Option<&ParticipantId>,
    ) -> ToolOutcome<Creation<Event>> {
        let creation = self.persist_event(request).await;
        let event = creation.value();

        let mut message = match self
            .deliver(to, CLIENT_EVENT, &EventPush::Show(EventView::from(event)))
            .await
        {
            Ok(()) => format!(
                "Event '{}' created for {}!",
                event.title,
                format_event_date(event.event_date)
            ),
            Err(e) => delivery_warning(&format!("the event '{}'", event.title), &e),
        };
        if !creation.is_persisted() {
            message.push_str(" It is saved for this session only.");
        }

        ToolOutcome { value: creation, message }
    }

    /// Search groups, bring the results into the session and list them
    pub async fn find_groups(&self, search: GroupSearch) -> ToolOutcome<Vec<Group>> {
        let query = GroupQuery {
            group_type: search.group_type.as_deref().map(normalize_group_type),
            near: GeoFilter::new(
                search.lat,
                search.lng,
                search.max_km.unwrap_or(self.default_max_km),
            ),
        };

        let groups: Vec<Group> = if self.persistence.is_enabled() {
            let rows = self
                .until_cancelled(self.persistence.find_groups(&query))
                .await
                .unwrap_or_default();
            let groups: Vec<Group> = rows.into_iter().map(Group::from).collect();
            let mut entities = self.entities.lock().await;
            for group in &groups {
                entities.merge_group(group.clone());
            }
            groups
        } else {
            let entities = self.entities.lock().await;
            let mut groups: Vec<Group> = entities
                .groups()
                .iter()
                .rev()
                .filter(|group| query.group_type.as_ref().map_or(true, |t| &group.group_type == t))
                .filter(|group| geo::passes(query.near.as_ref(), group.coordinates))
                .cloned()
                .collect();
            groups.truncate(crate::database::FIND_LIMIT as usize);
            groups
        };

        let views = groups.iter().map(GroupView::from).collect();
        let delivered = self
            .deliver(None, CLIENT_GROUP, &GroupPush::ShowList { groups: views })
            .await;

        let names: Vec<&str> = groups.iter().map(|group| group.name.as_str()).collect();
        let message = list_message("group", "groups", &names, delivered);
        ToolOutcome { value: groups, message }
    }

    /// Search events, bring the results into the session and list them
    pub async fn find_events(&self, search: EventSearch) -> ToolOutcome<Vec<Event>> {
        let query = EventQuery {
            group_id: search.group_id,
            near: GeoFilter::new(
                search.lat,
                search.lng,
                search.max_km.unwrap_or(self.default_max_km),
            ),
            upcoming_only: search.upcoming_only,
        };

        let events: Vec<Event> = if self.persistence.is_enabled() {
            let rows = self
                .until_cancelled(self.persistence.find_events(&query))
                .await
                .unwrap_or_default();
            let events: Vec<Event> = rows.into_iter().map(Event::from).collect();
            let mut entities = self.entities.lock().await;
            for event in &events {
                entities.merge_event(event.clone());
            }
            events
        } else {
            let now = chrono::Utc::now();
            let entities = self.entities.lock().await;
            let mut events: Vec<Event> = entities
                .events()
                .iter()
                .filter(|event| query.group_id.map_or(true, |id| event.group_id == Some(id)))
                .filter(|event| !query.upcoming_only || event.event_date > now)
                .filter(|event| geo::passes(query.near.as_ref(), event.coordinates))
                .cloned()
                .collect();
            events.sort_by(|a, b| a.event_date.cmp(&b.event_date));
            events.truncate(crate::database::FIND_LIMIT as usize);
            events
        };

        let views = events.iter().map(EventView::from).collect();
        let delivered = self
            .deliver(None, CLIENT_EVENT, &EventPush::ShowList { events: views })
            .await;

        let titles: Vec<&str> = events.iter().map(|event| event.title.as_str()).collect();
        let message = list_message("event", "events", &titles, delivered);
        ToolOutcome { value: events, message }
    }

    /// Record a membership; the member is the user if known, else the caller.
    /// A stored join makes the store's count authoritative.
    pub async fn join_group(
        &self,
        group_id: Uuid,
        user_id: Option<Uuid>,
        caller: &ParticipantId,
    ) -> Result<CountUpdate> {
        let known = self.entities.lock().await.get_group(group_id).is_some();
        if !known {
            warn!(session_id = %self.session_id, group_id = %group_id, "Join for unknown group");
            return Err(KnuutError::GroupNotFound { group_id });
        }

        let user_id = user_id.or(self.user_id);
        let _ordered = self.community_writes.lock().await;
        let stored = match user_id {
            Some(user) => self
                .until_cancelled(self.persistence.join_group(group_id, user))
                .await?,
            None => {
                debug!(group_id = %group_id, "No user for this session, membership kept in memory");
                None
            }
        };

        let member = member_key(user_id, caller);
        let update = {
            let mut entities = self.entities.lock().await;
            match stored {
                Some(count) => entities.apply_stored_membership(group_id, &member, count),
                None => entities.record_membership(group_id, &member),
            }
        }
        .ok_or(KnuutError::GroupNotFound { group_id })?;

        log_community_action(
            &group_id.to_string(),
            "join_group",
            Some(&member),
            stored.is_some(),
        );
        Ok(update)
    }

    /// Record an RSVP; only `going` counts towards the event's RSVP count
    pub async fn rsvp_event(
        &self,
        event_id: Uuid,
        status: RsvpStatus,
        user_id: Option<Uuid>,
        caller: &ParticipantId,
    ) -> Result<CountUpdate> {
        let known = self.entities.lock().await.get_event(event_id).is_some();
        if !known {
            warn!(session_id = %self.session_id, event_id = %event_id, "RSVP for unknown event");
            return Err(KnuutError::EventNotFound { event_id });
        }

        let user_id = user_id.or(self.user_id);
        let _ordered = self.community_writes.lock().await;
        let stored = match user_id {
            Some(user) => self
                .until_cancelled(self.persistence.rsvp_event(event_id, user, status))
                .await?,
            None => {
                debug!(event_id = %event_id, "No user for this session, RSVP kept in memory");
                None
            }
        };

        let member = member_key(user_id, caller);
        let update = {
            let mut entities = self.entities.lock().await;
            match stored {
                Some(count) => entities.apply_stored_rsvp(event_id, &member, status, count),
                None => entities.record_rsvp(event_id, &member, status),
            }
        }
        .ok_or(KnuutError::EventNotFound { event_id })?;

        log_community_action(
            &event_id.to_string(),
            status.as_str(),
            Some(&member),
            stored.is_some(),
        );
        Ok(update)
    }

    /// Forward free text into the conversation
    pub async fn process_user_input(&self, text: &str) -> Result<()> {
        let forwarded = self.until_cancelled(self.conversation.submit_user_input(text)).await?;
        if forwarded.is_ok() {
            debug!(session_id = %self.session_id, "User input forwarded");
        }
        forwarded
    }

    // Inbound

    /// Answer one inbound call; errors come back as `"error: ..."` strings
    pub async fn handle_call(&self, call: &InboundCall) -> Option<String> {
        crate::handlers::dispatch(self, call).await
    }

    // Snapshots

    pub async fn flash_card(&self, card_id: Uuid) -> Option<FlashCard> {
        self.entities.lock().await.get_flash_card(card_id).cloned()
    }

    pub async fn flash_cards(&self) -> Vec<FlashCard> {
        self.entities.lock().await.flash_cards().to_vec()
    }

    pub async fn quiz(&self, quiz_id: Uuid) -> Option<Quiz> {
        self.entities.lock().await.get_quiz(quiz_id).cloned()
    }

    pub async fn group(&self, group_id: Uuid) -> Option<Group> {
        self.entities.lock().await.get_group(group_id).cloned()
    }

    pub async fn event(&self, event_id: Uuid) -> Option<Event> {
        self.entities.lock().await.get_event(event_id).cloned()
    }

    // Lifecycle

    /// Record the session's usage and stop outstanding waits
    ///
    /// Returns the minutes recorded, or `None` when nothing was tracked.
    pub async fn close(&self) -> Option<i32> {
        let minutes = billable_minutes(self.started_at.elapsed());
        let tracked = match self.user_id {
            Some(user) => {
                self.persistence
                    .track_usage(user, &self.session_id, minutes, &self.config.usage_service_type)
                    .await
            }
            None => false,
        };

        self.cancel();
        log_session_event(
            &self.session_id,
            "closed",
            Some(&format!("minutes={} tracked={}", minutes, tracked)),
        );
        tracked.then_some(minutes)
    }
}

impl std::fmt::Debug for SyncGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncGateway")
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id)
            .field("persistence", &self.persistence)
            .finish()
    }
}

fn member_key(user_id: Option<Uuid>, caller: &ParticipantId) -> String {
    user_id
        .map(|user| user.to_string())
        .unwrap_or_else(|| caller.to_string())
}

fn delivery_warning(created: &str, error: &KnuutError) -> String {
    match error {
        KnuutError::NoParticipant => format!(
            "Created {}, but no participant is connected to show it to.",
            created
        ),
        other => format!("Created {} but failed to send it: {}", created, other),
    }
}

fn list_message(singular: &str, plural: &str, names: &[&str], delivered: Result<()>) -> String {
    let mut message = match names.len() {
        0 => format!("I couldn't find any {} matching that.", plural),
        1 => format!("Found 1 {}: {}.", singular, names[0]),
        count => format!("Found {} {}: {}.", count, plural, names.join(", ")),
    };
    if let Err(e) = delivered {
        message.push_str(&format!(" I couldn't show them on screen: {}", e));
    }
    message
}
