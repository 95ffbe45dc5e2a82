//! # Domain Layer
//!
//! Conversation models and the error taxonomy.
//! This layer is independent of HTTP frameworks and provider SDKs.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
