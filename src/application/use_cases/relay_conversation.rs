use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::GenerativeModel;
use crate::domain::{ChatSession, DomainError, GenerationConfig, Transcript};

/// Body returned by the relay in place of a completion whenever anything fails.
pub const ERROR_SENTINEL: &str = "error, check console";

/// Forwards the latest user turn of a transcript to the generative model.
pub struct RelayConversationUseCase {
    model: Arc<dyn GenerativeModel>,
    config: GenerationConfig,
}

impl RelayConversationUseCase {
    pub fn new(model: Arc<dyn GenerativeModel>, config: GenerationConfig) -> Self {
        Self { model, config }
    }

    /// Parse a raw request body and relay it.
    pub async fn execute_raw(&self, body: &[u8]) -> Result<String, DomainError> {
        let transcript = Transcript::from_slice(body)?;
        self.execute(&transcript).await
    }

    /// Submit the last turn's text in a fresh session and return the completion.
    ///
    /// Exactly one provider call is made; failures are returned, never retried.
    pub async fn execute(&self, transcript: &Transcript) -> Result<String, DomainError> {
        let message = transcript.latest_message()?;

        let session = ChatSession::new(self.config.clone()).with_history(transcript.preceding());

        info!(
            "Relaying message to {} ({} turns of history, max {} output tokens)",
            self.model.model_name(),
            session.history().len(),
            self.config.max_output_tokens()
        );
        debug!("Outbound message: {}", message);

        let start_time = Instant::now();
        let completion = self.model.send_message(&session, message).await?;

        debug!("Completion: {}", completion);
        info!(
            "Received {} chars in {:.2}s",
            completion.chars().count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(completion)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}
