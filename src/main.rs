//! Knuut session agent
//!
//! Runs one session over stdin/stdout: inbound RPC calls are read as JSON
//! lines and every outbound push, utterance and response is written back as
//! a JSON line.

use std::sync::Arc;

use tokio::io::BufReader;
use tracing::{error, info, warn};
use uuid::Uuid;

use knuut_agent::{
    config::Settings,
    gateway::{
        stdio::{serve_lines, JsonLineWriter, StdioConversation, StdioTransport},
        ParticipantId, SyncGateway,
    },
    services::PersistenceAdapter,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", knuut_agent::info());

    // A store that cannot be reached leaves the session in degraded mode
    let persistence = match PersistenceAdapter::connect(&settings.database).await {
        Ok(persistence) => persistence,
        Err(e) => {
            error!(error = %e, "Failed to open persistent store, continuing without persistence");
            PersistenceAdapter::disabled()
        }
    };

    let out = Arc::new(JsonLineWriter::new(tokio::io::stdout()));
    let identity = settings
        .session
        .participant_identity
        .clone()
        .map(ParticipantId::new);
    let transport = Arc::new(StdioTransport::new(
        Arc::clone(&out),
        identity.iter().cloned().collect(),
    ));
    let conversation = Arc::new(StdioConversation::new(Arc::clone(&out)));

    let session_id = Uuid::new_v4().to_string();
    let gateway = Arc::new(SyncGateway::new(
        session_id,
        settings.session.clone(),
        settings.geo.clone(),
        persistence.clone(),
        transport,
        conversation,
    ));

    if let Some(identity) = &identity {
        match gateway.wait_for_participant(identity).await {
            Ok(participant) => info!(participant = %participant, "Client participant connected"),
            Err(e) => warn!(error = %e, "Client participant did not join, pushes will be skipped"),
        }
    }

    info!(session_id = gateway.session_id(), "Session is ready");

    let served = serve_lines(
        Arc::clone(&gateway),
        BufReader::new(tokio::io::stdin()),
        out,
    )
    .await?;

    gateway.close().await;
    persistence.close().await;

    info!(served, "Session has been shut down.");

    Ok(())
}
