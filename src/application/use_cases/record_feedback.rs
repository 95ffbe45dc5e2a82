use tracing::info;

use crate::domain::{DomainError, Feedback};

/// Accepts a rating for a response. Nothing is stored; the rating is logged
/// and dropped.
#[derive(Default)]
pub struct RecordFeedbackUseCase;

impl RecordFeedbackUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute_raw(&self, body: &[u8]) -> Result<Feedback, DomainError> {
        let feedback = Feedback::from_slice(body)?;
        self.execute(&feedback)?;
        Ok(feedback)
    }

    pub fn execute(&self, feedback: &Feedback) -> Result<(), DomainError> {
        feedback.validate()?;
        info!(
            rating = feedback.rating(),
            response_index = feedback.response_index(),
            "Feedback received"
        );
        Ok(())
    }
}
