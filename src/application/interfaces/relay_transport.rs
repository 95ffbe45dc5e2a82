use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DomainError, Feedback, Transcript};

/// Client-side connection to the relay endpoints.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// POST the full transcript and return the decoded JSON response body.
    ///
    /// The body is returned untyped: a well-formed reply is a JSON string, and
    /// deciding what to do with anything else is the caller's job.
    /// Network and decoding failures map to [`DomainError::Transport`].
    async fn post_transcript(&self, transcript: &Transcript) -> Result<Value, DomainError>;

    async fn post_feedback(&self, feedback: &Feedback) -> Result<(), DomainError>;
}
