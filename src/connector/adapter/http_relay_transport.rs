use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::application::RelayTransport;
use crate::domain::{DomainError, Feedback, Transcript};

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000";
const CHAT_PATH: &str = "/api/chat";
const FEEDBACK_PATH: &str = "/api/feedback";

/// [`RelayTransport`] over HTTP, posting JSON to a running relay server.
pub struct HttpRelayTransport {
    client: reqwest::Client,
    chat_url: String,
    feedback_url: String,
}

impl HttpRelayTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let trimmed = base.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            chat_url: format!("{trimmed}{CHAT_PATH}"),
            feedback_url: format!("{trimmed}{FEEDBACK_PATH}"),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

impl Default for HttpRelayTransport {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_URL)
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn post_transcript(&self, transcript: &Transcript) -> Result<Value, DomainError> {
        debug!("Posting {} turns to {}", transcript.len(), self.chat_url);

        let response = self
            .client
            .post(&self.chat_url)
            .json(transcript)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("request failed: {e}")))?;

        // The relay signals failure in the body, not the status, so any status
        // with a JSON body is handed back to the caller.
        response
            .json::<Value>()
            .await
            .map_err(|e| DomainError::transport(format!("failed to decode response: {e}")))
    }

    async fn post_feedback(&self, feedback: &Feedback) -> Result<(), DomainError> {
        let response = self
            .client
            .post(&self.feedback_url)
            .json(feedback)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::transport(format!(
                "feedback rejected with {status}: {body}"
            )));
        }
        Ok(())
    }
}
