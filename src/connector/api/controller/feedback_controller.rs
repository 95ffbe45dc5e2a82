use axum::http::StatusCode;
use tracing::warn;

use super::super::error::ApiResult;
use super::super::Container;

pub struct FeedbackController<'a> {
    container: &'a Container,
}

impl<'a> FeedbackController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn feedback(&self, body: &[u8]) -> ApiResult<StatusCode> {
        let use_case = self.container.feedback_use_case();
        use_case.execute_raw(body).map_err(|e| {
            warn!("Rejected feedback: {}", e);
            e
        })?;
        Ok(StatusCode::NO_CONTENT)
    }
}
