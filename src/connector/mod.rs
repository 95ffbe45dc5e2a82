//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Generative models (Gemini REST, offline mock)
//! - Relay transport (HTTP client side)
//! - HTTP API (axum router, controllers, dependency container)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
