mod conversation_client;
mod record_feedback;
mod relay_conversation;

pub use conversation_client::*;
pub use record_feedback::*;
pub use relay_conversation::*;
