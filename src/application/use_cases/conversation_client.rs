use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::application::RelayTransport;
use crate::domain::{DomainError, Feedback, Transcript};

/// Greeting shown before the first exchange. Never part of the transcript.
pub const WELCOME_MESSAGE: &str =
    "Hi there! I'm the Headstarter virtual assistant. How can I help?";

/// Model turn appended when the relay could not be reached.
pub const TRANSPORT_ERROR_TEXT: &str = "Error occurred, please try again later.";

/// Model turn appended for a non-string relay reply under [`MalformedResponsePolicy::Surface`].
pub const MALFORMED_RESPONSE_TEXT: &str = "Received an unexpected response, please try again.";

/// What to do when the relay answers with something other than a JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedResponsePolicy {
    /// Append a visible error turn so every user turn gets an answer.
    #[default]
    Surface,
    /// Log and leave the transcript untouched.
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    Busy,
}

/// Result of one `send_message` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was appended and nothing was sent.
    Rejected(RejectReason),
    /// The relay answered; the reply was appended as a model turn.
    Replied(String),
    /// The relay answered with a non-string body.
    MalformedResponse { surfaced: bool },
    /// The relay could not be reached; the error turn was appended.
    TransportFailed,
}

impl SendOutcome {
    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied(_))
    }
}

/// Single-slot guard: at most one exchange in flight per client.
#[derive(Debug, Default)]
struct InFlightSlot {
    busy: AtomicBool,
}

impl InFlightSlot {
    fn try_acquire(&self) -> Option<InFlightPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightPermit { slot: self })
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the slot when dropped, on every exit path.
struct InFlightPermit<'a> {
    slot: &'a InFlightSlot,
}

impl Drop for InFlightPermit<'_> {
    fn drop(&mut self) {
        self.slot.busy.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
struct ClientState {
    transcript: Transcript,
    /// Index of the latest model reply that can still be rated.
    pending_rating: Option<usize>,
}

/// Holds one conversation and exchanges it with the relay.
pub struct ConversationClient {
    transport: Arc<dyn RelayTransport>,
    policy: MalformedResponsePolicy,
    slot: InFlightSlot,
    state: Mutex<ClientState>,
}

impl ConversationClient {
    pub fn new(transport: Arc<dyn RelayTransport>) -> Self {
        Self {
            transport,
            policy: MalformedResponsePolicy::default(),
            slot: InFlightSlot::default(),
            state: Mutex::new(ClientState::default()),
        }
    }

    pub fn with_malformed_response_policy(mut self, policy: MalformedResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.slot.is_busy()
    }

    pub async fn transcript(&self) -> Transcript {
        self.state.lock().await.transcript.clone()
    }

    /// Index of the latest reply that `submit_feedback` would rate.
    pub async fn pending_rating(&self) -> Option<usize> {
        self.state.lock().await.pending_rating
    }

    /// Append `text` as a user turn, relay the transcript, and append the answer.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Rejected(RejectReason::Empty);
        }
        let Some(_permit) = self.slot.try_acquire() else {
            debug!("send_message ignored: an exchange is already in flight");
            return SendOutcome::Rejected(RejectReason::Busy);
        };

        let snapshot = {
            let mut state = self.state.lock().await;
            state.transcript.push_user(text);
            state.transcript.clone()
        };

        let response = self.transport.post_transcript(&snapshot).await;

        let mut state = self.state.lock().await;
        match response {
            Ok(Value::String(reply)) => {
                let index = state.transcript.push_model(reply.clone());
                state.pending_rating = Some(index);
                SendOutcome::Replied(reply)
            }
            Ok(other) => {
                error!("Relay returned a non-string body: {}", other);
                let surfaced = self.policy == MalformedResponsePolicy::Surface;
                if surfaced {
                    state.transcript.push_model(MALFORMED_RESPONSE_TEXT);
                }
                SendOutcome::MalformedResponse { surfaced }
            }
            Err(e) => {
                error!("Relay request failed: {}", e);
                state.transcript.push_model(TRANSPORT_ERROR_TEXT);
                SendOutcome::TransportFailed
            }
        }
    }

    /// Rate the latest model reply.
    ///
    /// Clears the pending reply on success. Failures are logged and returned;
    /// the transcript is never touched.
    pub async fn submit_feedback(&self, rating: u8) -> Result<Feedback, DomainError> {
        let index = self
            .pending_rating()
            .await
            .ok_or_else(|| DomainError::invalid_input("there is no response to rate"))?;
        let feedback = Feedback::new(rating, index)?;

        if let Err(e) = self.transport.post_feedback(&feedback).await {
            warn!("Failed to submit feedback: {}", e);
            return Err(e);
        }

        let mut state = self.state.lock().await;
        if state.pending_rating == Some(index) {
            state.pending_rating = None;
        }
        debug!("Feedback submitted for response {}", index);
        Ok(feedback)
    }
}
