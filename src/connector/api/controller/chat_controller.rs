use tracing::{error, info_span, Instrument};
use uuid::Uuid;

use crate::application::ERROR_SENTINEL;

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Relay a raw transcript body and return the completion text.
    ///
    /// Never fails: any error is logged here and replaced by [`ERROR_SENTINEL`].
    pub async fn chat(&self, body: &[u8]) -> String {
        let request_id = Uuid::new_v4();
        let use_case = self.container.relay_use_case();

        async move {
            match use_case.execute_raw(body).await {
                Ok(completion) => completion,
                Err(e) => {
                    error!("Relay failed: {}", e);
                    ERROR_SENTINEL.to_string()
                }
            }
        }
        .instrument(info_span!("relay", %request_id))
        .await
    }
}
