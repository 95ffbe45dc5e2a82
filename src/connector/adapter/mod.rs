mod gemini_client;
mod http_relay_transport;
mod mock_generative_model;

pub use gemini_client::*;
pub use http_relay_transport::*;
pub use mock_generative_model::*;
