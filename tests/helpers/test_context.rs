//! Test context for unified test setup
//!
//! This module provides a unified test context that wires a session gateway
//! to a recording transport, a recording voice layer and, unless the test
//! runs degraded, an in-memory community store or an unreachable one.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use knuut_agent::config::{GeoConfig, SessionConfig};
use knuut_agent::database::{CommunityStore, MemoryStore};
use knuut_agent::gateway::{InboundCall, ParticipantId, SyncGateway};
use knuut_agent::models::CreateUserRequest;
use knuut_agent::PersistenceAdapter;

use super::failing_store::UnreachableStore;
use super::transport_mock::{RecordingConversation, RecordingTransport};

/// Identity the test client joins the room with
pub const CLIENT: &str = "web-client";

/// Configuration for test context creation
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub use_store: bool,
    pub store_outage: bool,
    pub bind_participant: bool,
    pub client_present: bool,
    pub with_user: bool,
    pub speak_flipped_cards: bool,
    pub rpc_timeout: Duration,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            use_store: true,
            store_outage: false,
            bind_participant: true,
            client_present: true,
            with_user: false,
            speak_flipped_cards: false,
            rpc_timeout: Duration::from_secs(2),
        }
    }
}

impl TestConfig {
    pub fn degraded() -> Self {
        Self {
            use_store: false,
            ..Self::default()
        }
    }

    /// A store is configured, but every call to it fails
    pub fn store_outage() -> Self {
        Self {
            use_store: false,
            store_outage: true,
            with_user: true,
            ..Self::default()
        }
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub gateway: Arc<SyncGateway>,
    pub transport: Arc<RecordingTransport>,
    pub conversation: Arc<RecordingConversation>,
    pub store: Option<Arc<MemoryStore>>,
    pub user_id: Option<Uuid>,
    pub client: ParticipantId,
}

impl TestContext {
    /// Session backed by an in-memory store with the client bound
    pub async fn new() -> Self {
        Self::new_with_config(TestConfig::default()).await
    }

    /// Session without persistence
    pub async fn degraded() -> Self {
        Self::new_with_config(TestConfig::degraded()).await
    }

    /// Session whose configured store fails every call
    pub async fn store_outage() -> Self {
        Self::new_with_config(TestConfig::store_outage()).await
    }

    pub async fn new_with_config(config: TestConfig) -> Self {
        // Initialize logging once
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let store = config.use_store.then(|| Arc::new(MemoryStore::new()));

        let user_id = match (&store, config.with_user) {
            (Some(store), true) => {
                let user = store
                    .create_user(&CreateUserRequest {
                        email: Some("learner@example.com".to_string()),
                        name: Some("Aino".to_string()),
                        country: Some("FI".to_string()),
                    })
                    .await
                    .expect("Failed to create test user");
                Some(user.id)
            }
            // The user exists, the store just cannot be reached
            (None, true) if config.store_outage => Some(Uuid::new_v4()),
            _ => None,
        };

        let persistence = match &store {
            Some(store) => {
                let store: Arc<dyn CommunityStore> = store.clone();
                PersistenceAdapter::new(store, Duration::from_secs(2))
            }
            None if config.store_outage => {
                PersistenceAdapter::new(Arc::new(UnreachableStore), Duration::from_millis(200))
            }
            None => PersistenceAdapter::disabled(),
        };

        let session = Self::create_test_session_config(&config, user_id);
        let present: &[&str] = if config.client_present { &[CLIENT] } else { &[] };
        let transport = Arc::new(RecordingTransport::new(present));
        let conversation = Arc::new(RecordingConversation::default());
        let gateway = Arc::new(SyncGateway::new(
            Uuid::new_v4().to_string(),
            session,
            GeoConfig::default(),
            persistence,
            transport.clone(),
            conversation.clone(),
        ));

        let client = ParticipantId::new(CLIENT);
        if config.bind_participant {
            gateway.bind_participant(client.clone()).await;
        }

        Self {
            gateway,
            transport,
            conversation,
            store,
            user_id,
            client,
        }
    }

    /// Create test-specific session settings
    fn create_test_session_config(config: &TestConfig, user_id: Option<Uuid>) -> SessionConfig {
        SessionConfig {
            participant_identity: Some(CLIENT.to_string()),
            user_id,
            participant_wait_secs: 1,
            participant_poll_ms: 20,
            rpc_timeout_secs: config.rpc_timeout.as_secs().max(1),
            speak_flipped_cards: config.speak_flipped_cards,
            ..SessionConfig::default()
        }
    }

    /// Deliver an inbound call from the test client
    pub async fn call(&self, method: &str, payload: Value) -> Option<String> {
        self.call_as(CLIENT, method, payload).await
    }

    /// Deliver an inbound call from another participant
    pub async fn call_as(&self, caller: &str, method: &str, payload: Value) -> Option<String> {
        let call = InboundCall::new(method, caller, payload.to_string());
        self.gateway.handle_call(&call).await
    }

    pub fn store(&self) -> &MemoryStore {
        self.store.as_deref().expect("test context has no store")
    }
}
