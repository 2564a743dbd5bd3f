//! JSON-lines transport for running a session over stdin/stdout
//!
//! Inbound lines look like
//! `{"id": 1, "method": "agent.joinGroup", "caller": "web-1", "payload": {...}}`;
//! the payload may also be a JSON-encoded string. Outbound calls, speech and
//! responses are written as lines tagged by `type`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::utils::errors::Result;

use super::protocol::SUCCESS;
use super::session::SyncGateway;
use super::transport::{Conversation, InboundCall, ParticipantId, Transport};

#[derive(Debug, Deserialize)]
pub struct InboundLine {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    pub caller: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundLine<'a> {
    Rpc {
        destination: &'a str,
        method: &'a str,
        payload: Value,
    },
    Say {
        text: &'a str,
    },
    UserInput {
        text: &'a str,
    },
    Response {
        id: Option<Value>,
        method: &'a str,
        response: Option<String>,
    },
}

impl InboundLine {
    pub fn into_call(self) -> (Option<Value>, InboundCall) {
        let payload = match self.payload {
            Value::String(text) => text.into_bytes(),
            Value::Null => b"{}".to_vec(),
            other => other.to_string().into_bytes(),
        };
        let call = InboundCall {
            method: self.method,
            caller: ParticipantId::new(self.caller),
            payload,
        };
        (self.id, call)
    }
}

/// Serializes whole lines onto a shared writer
pub struct JsonLineWriter<W> {
    writer: Mutex<W>,
}

impl<W: AsyncWrite + Unpin + Send> JsonLineWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub async fn write<T: Serialize + Sync>(&self, value: &T) -> Result<()> {
        let mut line = serde_json::to_vec(value)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        writer.flush().await?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Outbound calls are written as `rpc` lines and acknowledged immediately
pub struct StdioTransport<W> {
    out: Arc<JsonLineWriter<W>>,
    participants: Vec<ParticipantId>,
}

impl<W> StdioTransport<W> {
    pub fn new(out: Arc<JsonLineWriter<W>>, participants: Vec<ParticipantId>) -> Self {
        Self { out, participants }
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send + Sync> Transport for StdioTransport<W> {
    async fn perform_rpc(
        &self,
        destination: &ParticipantId,
        method: &str,
        payload: String,
    ) -> Result<String> {
        let payload: Value = serde_json::from_str(&payload)?;
        self.out
            .write(&OutboundLine::Rpc {
                destination: destination.as_str(),
                method,
                payload,
            })
            .await?;
        Ok(SUCCESS.to_string())
    }

    async fn remote_participants(&self) -> Vec<ParticipantId> {
        self.participants.clone()
    }
}

/// Speech and forwarded input are written as `say` and `user_input` lines
pub struct StdioConversation<W> {
    out: Arc<JsonLineWriter<W>>,
}

impl<W> StdioConversation<W> {
    pub fn new(out: Arc<JsonLineWriter<W>>) -> Self {
        Self { out }
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send + Sync> Conversation for StdioConversation<W> {
    async fn say(&self, text: &str) -> Result<()> {
        self.out.write(&OutboundLine::Say { text }).await
    }

    async fn submit_user_input(&self, text: &str) -> Result<()> {
        self.out.write(&OutboundLine::UserInput { text }).await
    }
}

/// Serve inbound lines until end of input, answering each on `out`
///
/// Calls run concurrently; responses are written as they complete.
pub async fn serve_lines<R, W>(
    gateway: Arc<SyncGateway>,
    reader: R,
    out: Arc<JsonLineWriter<W>>,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + Sync + 'static,
{
    let mut lines = reader.lines();
    let mut in_flight = JoinSet::new();
    let mut served = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let inbound: InboundLine = match serde_json::from_str(&line) {
            Ok(inbound) => inbound,
            Err(e) => {
                warn!(error = %e, "Skipping malformed inbound line");
                continue;
            }
        };

        served += 1;
        let gateway = Arc::clone(&gateway);
        let out = Arc::clone(&out);
        in_flight.spawn(async move {
            let (id, call) = inbound.into_call();
            let response = gateway.handle_call(&call).await;
            let line = OutboundLine::Response {
                id,
                method: &call.method,
                response,
            };
            if let Err(e) = out.write(&line).await {
                warn!(error = %e, "Failed to write response");
            }
        });
    }

    debug!(served, "End of input, waiting for in-flight calls");
    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "Inbound call task failed");
        }
    }

    info!(served, "Stdio session finished");
    Ok(served)
}
