mod generative_model;
mod relay_transport;

pub use generative_model::*;
pub use relay_transport::*;
