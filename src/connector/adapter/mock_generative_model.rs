use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::GenerativeModel;
use crate::domain::{ChatSession, DomainError, Turn};

/// One `send_message` call as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub message: String,
    pub history: Vec<Turn>,
    pub persona: String,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone)]
enum Behavior {
    Echo,
    Reply(String),
    Fail(String),
}

/// Offline [`GenerativeModel`] for local runs and tests.
///
/// Echoes the message by default; can be fixed to one reply or to a provider
/// failure. Every call is recorded.
pub struct MockGenerativeModel {
    behavior: Behavior,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockGenerativeModel {
    pub fn new() -> Self {
        Self {
            behavior: Behavior::Echo,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Reply(reply.into()),
            ..Self::new()
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(reason.into()),
            ..Self::new()
        }
    }

    /// Shared handle to the recorded calls.
    pub fn calls(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        self.calls.clone()
    }
}

impl Default for MockGenerativeModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeModel for MockGenerativeModel {
    async fn send_message(
        &self,
        session: &ChatSession,
        message: &str,
    ) -> Result<String, DomainError> {
        self.calls.lock().await.push(RecordedCall {
            message: message.to_string(),
            history: session.history().to_vec(),
            persona: session.config().persona().to_string(),
            max_output_tokens: session.config().max_output_tokens(),
        });
        debug!("MockGenerativeModel received: {}", message);

        match &self.behavior {
            Behavior::Echo => Ok(format!("You said: {message}")),
            Behavior::Reply(reply) => Ok(reply.clone()),
            Behavior::Fail(reason) => Err(DomainError::provider(reason.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
