use serde::{Deserialize, Serialize};

use super::Turn;
use crate::domain::DomainError;

/// Ordered, append-only sequence of turns. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Parse a transcript from a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(body)
            .map_err(|e| DomainError::invalid_request(format!("transcript is not a turn array: {e}")))
    }

    /// Append a turn and return its index.
    pub fn push(&mut self, turn: Turn) -> usize {
        self.turns.push(turn);
        self.turns.len() - 1
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> usize {
        self.push(Turn::user(text))
    }

    pub fn push_model(&mut self, text: impl Into<String>) -> usize {
        self.push(Turn::model(text))
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Text of the last turn, which is the message the relay forwards.
    ///
    /// Fails when the transcript is empty or the last turn has no `parts[0].text`.
    pub fn latest_message(&self) -> Result<&str, DomainError> {
        let last = self
            .turns
            .last()
            .ok_or_else(|| DomainError::invalid_request("transcript is empty"))?;
        last.text()
            .ok_or_else(|| DomainError::invalid_request("last turn has no parts[0].text"))
    }

    /// Every turn before the last one.
    pub fn preceding(&self) -> &[Turn] {
        match self.turns.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

impl From<Vec<Turn>> for Transcript {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}
