pub mod chat_controller;
pub mod feedback_controller;

pub use chat_controller::ChatController;
pub use feedback_controller::FeedbackController;
