use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A star rating for one model response. Transmitted, logged, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    rating: u8,
    response_index: usize,
}

impl Feedback {
    pub fn new(rating: u8, response_index: usize) -> Result<Self, DomainError> {
        let feedback = Self {
            rating,
            response_index,
        };
        feedback.validate()?;
        Ok(feedback)
    }

    /// Parse and validate a feedback body.
    pub fn from_slice(body: &[u8]) -> Result<Self, DomainError> {
        let feedback: Self = serde_json::from_slice(body)
            .map_err(|e| DomainError::invalid_input(format!("malformed feedback: {e}")))?;
        feedback.validate()?;
        Ok(feedback)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(DomainError::invalid_input(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                self.rating
            )));
        }
        Ok(())
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn response_index(&self) -> usize {
        self.response_index
    }
}
