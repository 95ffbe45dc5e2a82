pub mod container;
pub mod controller;
pub mod error;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use error::{ApiError, ApiResult};
pub use router::{router, serve, CHAT_ROUTE, FEEDBACK_ROUTE};
