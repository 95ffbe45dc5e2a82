use async_trait::async_trait;

use crate::domain::{ChatSession, DomainError};

/// A hosted generative-language model that answers one text message per call.
///
/// Implementors own transport and vendor wire formats. The session carries the
/// persona, the output-token cap, and the history the provider should replay
/// before `message`.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Submit `message` within `session` and return the completion text.
    async fn send_message(&self, session: &ChatSession, message: &str)
        -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
